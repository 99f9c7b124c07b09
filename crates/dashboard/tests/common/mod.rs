//! In-memory [`InventorySource`] shared by the dashboard integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use stockmap_client::{InventoryApiError, InventorySource};
use stockmap_core::inventory::{
    BomComponent, BomEntry, InventoryRow, Item, ItemDetails, Location,
};
use stockmap_core::types::Quantity;

pub const DELETE_PASSWORD: &str = "letmein";

/// Scriptable fake. `None` in a snapshot slot makes that call fail.
#[derive(Default)]
pub struct FakeSource {
    pub locations: Mutex<Option<Vec<Location>>>,
    pub report: Mutex<Option<Vec<InventoryRow>>>,
    pub bom: Mutex<Option<Vec<BomEntry>>>,
    pub items: Mutex<HashMap<String, ItemDetails>>,
    /// Artificial latency of `bom(Some(query))`, keyed by query.
    pub bom_delays: Mutex<HashMap<String, Duration>>,
    pub fail_safe_stock: Mutex<bool>,

    pub location_calls: AtomicUsize,
    pub report_calls: AtomicUsize,
    pub item_calls: AtomicUsize,
    pub bom_queries: Mutex<Vec<Option<String>>>,
    pub safe_stock_updates: Mutex<Vec<(String, Quantity)>>,
    pub deletes: Mutex<Vec<(String, String, Option<String>)>>,
}

pub fn api_error(status: u16, message: &str) -> InventoryApiError {
    InventoryApiError::ApiError {
        status,
        body: serde_json::json!({ "error": message }).to_string(),
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations(self, locations: Vec<Location>) -> Self {
        *self.locations.lock().unwrap() = Some(locations);
        self
    }

    pub fn with_report(self, rows: Vec<InventoryRow>) -> Self {
        *self.report.lock().unwrap() = Some(rows);
        self
    }

    pub fn with_bom(self, entries: Vec<BomEntry>) -> Self {
        *self.bom.lock().unwrap() = Some(entries);
        self
    }

    pub fn with_item(self, details: ItemDetails) -> Self {
        self.items
            .lock()
            .unwrap()
            .insert(details.item.barcode.clone(), details);
        self
    }

    pub fn with_bom_delay(self, query: &str, delay: Duration) -> Self {
        self.bom_delays
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
        self
    }

    pub fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    pub fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub fn bom_queries(&self) -> Vec<Option<String>> {
        self.bom_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventorySource for FakeSource {
    async fn locations(&self) -> Result<Vec<Location>, InventoryApiError> {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        self.locations
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| api_error(500, "locations unavailable"))
    }

    async fn items(&self) -> Result<Vec<Item>, InventoryApiError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .map(|d| d.item.clone())
            .collect())
    }

    async fn item_details(&self, barcode: &str) -> Result<ItemDetails, InventoryApiError> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        self.items
            .lock()
            .unwrap()
            .get(barcode)
            .cloned()
            .ok_or_else(|| api_error(404, "Item not found"))
    }

    async fn bom(&self, barcode: Option<&str>) -> Result<Vec<BomEntry>, InventoryApiError> {
        self.bom_queries
            .lock()
            .unwrap()
            .push(barcode.map(str::to_string));

        let delay = barcode.and_then(|q| self.bom_delays.lock().unwrap().get(q).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let entries = self
            .bom
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| api_error(500, "bom unavailable"))?;
        Ok(match barcode {
            Some(q) => entries
                .into_iter()
                .filter(|e| e.main_barcode.contains(q))
                .collect(),
            None => entries,
        })
    }

    async fn inventory_report(&self) -> Result<Vec<InventoryRow>, InventoryApiError> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        self.report
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| api_error(500, "report unavailable"))
    }

    async fn update_safe_stock(
        &self,
        barcode: &str,
        safe_stock: Quantity,
    ) -> Result<(), InventoryApiError> {
        if *self.fail_safe_stock.lock().unwrap() {
            return Err(api_error(500, "write failed"));
        }
        self.safe_stock_updates
            .lock()
            .unwrap()
            .push((barcode.to_string(), safe_stock));
        Ok(())
    }

    async fn delete_item(
        &self,
        barcode: &str,
        password: &str,
        token: Option<&str>,
    ) -> Result<(), InventoryApiError> {
        self.deletes.lock().unwrap().push((
            barcode.to_string(),
            password.to_string(),
            token.map(str::to_string),
        ));
        if password != DELETE_PASSWORD {
            return Err(api_error(403, "Invalid password"));
        }
        if let Some(rows) = self.report.lock().unwrap().as_mut() {
            rows.retain(|r| r.barcode != barcode);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn bom_entry(main: &str, components: &[(&str, Option<&str>)]) -> BomEntry {
    BomEntry {
        main_barcode: main.to_string(),
        components: components
            .iter()
            .map(|(barcode, locations)| BomComponent::new(*barcode, *locations))
            .collect(),
    }
}

pub fn item_details(barcode: &str, name: &str, rows: &[(&str, Quantity)]) -> ItemDetails {
    ItemDetails {
        item: Item {
            barcode: barcode.to_string(),
            name: name.to_string(),
            description: None,
            unit: None,
            category: None,
            safe_stock: 0,
        },
        inventory: rows
            .iter()
            .map(|(code, qty)| InventoryRow::new(barcode, Some(code), *qty).with_name(name))
            .collect(),
    }
}
