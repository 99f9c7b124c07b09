//! Report controller: inventory snapshot, projections, inline safe-stock
//! edits, password-gated deletion and spreadsheet export.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use stockmap_client::InventorySource;
use stockmap_core::delete_dialog::{DeleteDialog, DeleteTarget};
use stockmap_core::error::CoreError;
use stockmap_core::export::{build_export, ExportSheet};
use stockmap_core::inventory::{BomEntry, InventoryRow};
use stockmap_core::report::{
    flatten_bom, summarize_by_item, summarize_by_location, BomRow, ItemSummary, LocationRecord,
    ReportTab,
};
use stockmap_core::safe_stock::{EditState, FailurePolicy, SafeStockField, SAFE_STOCK_UPDATE_FAILED};
use stockmap_core::types::{Barcode, Quantity};

use crate::error::{DashboardError, DashboardResult};
use crate::xlsx;

pub struct ReportController {
    source: Arc<dyn InventorySource>,
    auth_token: Option<String>,
    failure_policy: FailurePolicy,
    rows: Vec<InventoryRow>,
    bom: Vec<BomEntry>,
    loading: bool,
    active_tab: ReportTab,
    safe_stock: HashMap<Barcode, SafeStockField>,
    delete_dialog: DeleteDialog,
    notice: Option<String>,
}

impl ReportController {
    pub fn new(
        source: Arc<dyn InventorySource>,
        auth_token: Option<String>,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            source,
            auth_token,
            failure_policy,
            rows: Vec::new(),
            bom: Vec::new(),
            loading: true,
            active_tab: ReportTab::default(),
            safe_stock: HashMap::new(),
            delete_dialog: DeleteDialog::default(),
            notice: None,
        }
    }

    // ---- snapshot ----

    /// Fetch the inventory report and the full BOM list concurrently.
    ///
    /// On failure the previous snapshot stays in place. Either way the
    /// controller is no longer loading afterwards.
    pub async fn fetch(&mut self) -> DashboardResult<()> {
        let result = tokio::try_join!(self.source.inventory_report(), self.source.bom(None));
        self.loading = false;

        match result {
            Ok((rows, bom)) => {
                tracing::info!(rows = rows.len(), bom_entries = bom.len(), "Report fetched");
                self.rows = rows;
                self.bom = bom;
                self.safe_stock.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Report fetch failed");
                Err(e.into())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn bom_entries(&self) -> &[BomEntry] {
        &self.bom
    }

    // ---- tabs ----

    pub fn active_tab(&self) -> ReportTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: ReportTab) {
        self.active_tab = tab;
    }

    /// Select a tab by name (e.g. from a `?tab=` parameter). Unknown names
    /// leave the current tab unchanged and return `false`.
    pub fn select_tab_named(&mut self, name: &str) -> bool {
        match name.parse::<ReportTab>() {
            Ok(tab) => {
                self.active_tab = tab;
                true
            }
            Err(_) => false,
        }
    }

    // ---- projections ----

    pub fn items(&self) -> Vec<ItemSummary> {
        summarize_by_item(&self.rows)
    }

    pub fn item(&self, barcode: &str) -> Option<ItemSummary> {
        self.items().into_iter().find(|i| i.barcode == barcode)
    }

    pub fn locations(&self) -> Vec<LocationRecord> {
        summarize_by_location(&self.rows)
    }

    pub fn bom_rows(&self) -> Vec<BomRow> {
        flatten_bom(&self.bom)
    }

    // ---- safe stock ----

    fn safe_stock_field(&mut self, barcode: &str) -> DashboardResult<&mut SafeStockField> {
        if !self.safe_stock.contains_key(barcode) {
            let committed = self
                .rows
                .iter()
                .find(|r| r.barcode == barcode)
                .map(|r| r.safe_stock)
                .ok_or_else(|| CoreError::NotFound {
                    entity: "item",
                    key: barcode.to_string(),
                })?;
            self.safe_stock.insert(
                barcode.to_string(),
                SafeStockField::new(barcode, committed, self.failure_policy),
            );
        }
        self.safe_stock
            .get_mut(barcode)
            .ok_or_else(|| DashboardError::Core(CoreError::NotFound {
                entity: "item",
                key: barcode.to_string(),
            }))
    }

    fn apply_safe_stock(&mut self, barcode: &str, value: Quantity) {
        for row in self.rows.iter_mut().filter(|r| r.barcode == barcode) {
            row.safe_stock = value;
        }
    }

    /// The input changed: show the new value right away.
    pub fn edit_safe_stock(&mut self, barcode: &str, raw: &str) -> DashboardResult<Quantity> {
        let value = self.safe_stock_field(barcode)?.edit(raw);
        self.apply_safe_stock(barcode, value);
        Ok(value)
    }

    /// The input lost focus: persist its value.
    ///
    /// On failure a notice is raised and the displayed value follows the
    /// configured [`FailurePolicy`].
    pub async fn commit_safe_stock(&mut self, barcode: &str, raw: &str) -> DashboardResult<()> {
        let commit = self.safe_stock_field(barcode)?.begin_commit(raw);
        self.apply_safe_stock(barcode, commit.value);

        let result = self
            .source
            .update_safe_stock(&commit.barcode, commit.value)
            .await;

        let field = self.safe_stock_field(barcode)?;
        match result {
            Ok(()) => {
                field.commit_succeeded(commit.value);
                tracing::info!(barcode, safe_stock = commit.value, "Safe stock updated");
                Ok(())
            }
            Err(e) => {
                let shown = field.commit_failed(commit.value);
                tracing::warn!(barcode, error = %e, "Safe stock update failed");
                if let Some(value) = shown {
                    self.apply_safe_stock(barcode, value);
                }
                self.notice = Some(SAFE_STOCK_UPDATE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn safe_stock_state(&self, barcode: &str) -> Option<EditState> {
        self.safe_stock.get(barcode).map(SafeStockField::state)
    }

    // ---- delete ----

    /// Open the delete dialog for an item. Only items whose aggregated
    /// quantity is zero can be deleted.
    pub fn open_delete(&mut self, barcode: &str) -> DashboardResult<()> {
        let item = self.item(barcode).ok_or_else(|| CoreError::NotFound {
            entity: "item",
            key: barcode.to_string(),
        })?;
        if !item.is_deletable() {
            return Err(CoreError::Validation(format!(
                "Item {barcode} still holds {} units and cannot be deleted",
                item.total_qty
            ))
            .into());
        }
        self.delete_dialog.open(DeleteTarget::from(&item));
        Ok(())
    }

    pub fn delete_dialog(&self) -> &DeleteDialog {
        &self.delete_dialog
    }

    pub fn set_delete_password(&mut self, password: impl Into<String>) {
        self.delete_dialog.set_password(password);
    }

    pub fn toggle_password_visibility(&mut self) {
        self.delete_dialog.toggle_password_visibility();
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog.cancel();
    }

    /// Send the delete request. Success closes the dialog and re-fetches
    /// the report; failure keeps the dialog open with the server's message.
    pub async fn submit_delete(&mut self) -> DashboardResult<()> {
        let request = self.delete_dialog.submit()?;

        let result = self
            .source
            .delete_item(&request.barcode, &request.password, self.auth_token.as_deref())
            .await;

        match result {
            Ok(()) => {
                tracing::info!(barcode = %request.barcode, "Item deleted");
                self.notice = Some(self.delete_dialog.succeeded().to_string());
                // The delete itself succeeded; a failed refresh is only logged.
                let _ = self.fetch().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(barcode = %request.barcode, error = %e, "Item delete failed");
                self.notice = Some(self.delete_dialog.failed(&e.user_message()));
                Err(e.into())
            }
        }
    }

    // ---- notices ----

    /// Latest user-facing notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // ---- export ----

    /// Shape the active projection for export, dated `date`.
    pub fn export_sheet(&self, date: NaiveDate) -> ExportSheet {
        build_export(self.active_tab, &self.rows, &self.bom, date)
    }

    /// Write the active projection to `dir`, dated today (UTC).
    pub fn export_to(&self, dir: &Path) -> DashboardResult<PathBuf> {
        let sheet = self.export_sheet(Utc::now().date_naive());
        xlsx::write_sheet(&sheet, dir)
    }
}
