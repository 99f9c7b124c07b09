//! Abstraction over where inventory data comes from.

use async_trait::async_trait;

use stockmap_core::inventory::{BomEntry, InventoryRow, Item, ItemDetails, Location};
use stockmap_core::types::Quantity;

use crate::api::{InventoryApi, InventoryApiError};

/// Operations the dashboard controllers consume.
///
/// Implemented by [`InventoryApi`] for the real server; tests provide
/// in-memory implementations.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn locations(&self) -> Result<Vec<Location>, InventoryApiError>;

    async fn items(&self) -> Result<Vec<Item>, InventoryApiError>;

    async fn item_details(&self, barcode: &str) -> Result<ItemDetails, InventoryApiError>;

    /// All BOM entries, or those matching `barcode` when given.
    async fn bom(&self, barcode: Option<&str>) -> Result<Vec<BomEntry>, InventoryApiError>;

    async fn inventory_report(&self) -> Result<Vec<InventoryRow>, InventoryApiError>;

    async fn update_safe_stock(
        &self,
        barcode: &str,
        safe_stock: Quantity,
    ) -> Result<(), InventoryApiError>;

    async fn delete_item(
        &self,
        barcode: &str,
        password: &str,
        token: Option<&str>,
    ) -> Result<(), InventoryApiError>;
}

#[async_trait]
impl InventorySource for InventoryApi {
    async fn locations(&self) -> Result<Vec<Location>, InventoryApiError> {
        self.get_locations().await
    }

    async fn items(&self) -> Result<Vec<Item>, InventoryApiError> {
        self.get_items().await
    }

    async fn item_details(&self, barcode: &str) -> Result<ItemDetails, InventoryApiError> {
        self.get_item_details(barcode).await
    }

    async fn bom(&self, barcode: Option<&str>) -> Result<Vec<BomEntry>, InventoryApiError> {
        self.get_bom(barcode).await
    }

    async fn inventory_report(&self) -> Result<Vec<InventoryRow>, InventoryApiError> {
        self.get_inventory_report().await
    }

    async fn update_safe_stock(
        &self,
        barcode: &str,
        safe_stock: Quantity,
    ) -> Result<(), InventoryApiError> {
        InventoryApi::update_safe_stock(self, barcode, safe_stock).await
    }

    async fn delete_item(
        &self,
        barcode: &str,
        password: &str,
        token: Option<&str>,
    ) -> Result<(), InventoryApiError> {
        InventoryApi::delete_item(self, barcode, password, token).await
    }
}
