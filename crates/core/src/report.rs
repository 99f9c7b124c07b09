//! Tabular report projections over a flat inventory snapshot.
//!
//! Three independent read-only views are derived from the same rows:
//! by item (one record per barcode, quantities summed), by location (one
//! record per stocked row) and by BOM (one record per main/component pair).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::inventory::{BomEntry, InventoryRow};
use crate::location_code::LocationQuantity;
use crate::natural_order::natural_cmp;
use crate::types::{Barcode, Quantity};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The report projection currently on display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTab {
    #[default]
    Item,
    Location,
    Bom,
}

impl ReportTab {
    pub const ALL: [ReportTab; 3] = [ReportTab::Item, ReportTab::Location, ReportTab::Bom];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTab::Item => "item",
            ReportTab::Location => "location",
            ReportTab::Bom => "bom",
        }
    }
}

impl fmt::Display for ReportTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportTab {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid report tab '{s}'. Must be one of: item, location, bom"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// By item
// ---------------------------------------------------------------------------

/// One item aggregated across all the locations it is stored in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub barcode: Barcode,
    pub name: String,
    pub description: String,
    pub unit: String,
    pub category: String,
    pub safe_stock: Quantity,
    pub total_qty: Quantity,
    /// In row encounter order.
    pub locations: Vec<LocationQuantity>,
}

impl ItemSummary {
    fn from_row(row: &InventoryRow) -> Self {
        Self {
            barcode: row.barcode.clone(),
            name: row.item_name.clone(),
            description: row.description.clone().unwrap_or_default(),
            unit: row.unit.clone().unwrap_or_default(),
            category: row.category.clone().unwrap_or_default(),
            safe_stock: row.safe_stock,
            total_qty: 0,
            locations: Vec::new(),
        }
    }

    fn absorb(&mut self, row: &InventoryRow) {
        self.total_qty += row.quantity;
        if let Some(code) = assigned_location(row) {
            self.locations.push(LocationQuantity::new(code, row.quantity));
        }
    }

    /// The delete affordance is only offered for items with no stock left.
    pub fn is_deletable(&self) -> bool {
        self.total_qty == 0
    }
}

/// `Some(code)` when the row is assigned to a non-empty location code.
fn assigned_location(row: &InventoryRow) -> Option<&str> {
    row.location_code.as_deref().filter(|code| !code.is_empty())
}

/// Group rows by barcode, summing quantities and collecting locations.
///
/// The first row seen for a barcode supplies the descriptive fields; later
/// rows only add to `total_qty` and `locations`. Sorted by barcode in
/// natural order.
pub fn summarize_by_item(rows: &[InventoryRow]) -> Vec<ItemSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<ItemSummary> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.barcode.as_str()).or_insert_with(|| {
            summaries.push(ItemSummary::from_row(row));
            summaries.len() - 1
        });
        summaries[slot].absorb(row);
    }

    summaries.sort_by(|a, b| natural_cmp(&a.barcode, &b.barcode));
    summaries
}

// ---------------------------------------------------------------------------
// By location
// ---------------------------------------------------------------------------

/// One stocked (location, item) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub code: String,
    pub barcode: Barcode,
    pub name: String,
    pub description: String,
    pub unit: String,
    pub category: String,
    pub quantity: Quantity,
}

/// One record per row that has a location and positive quantity, sorted by
/// location code in natural order. Rows are not merged.
pub fn summarize_by_location(rows: &[InventoryRow]) -> Vec<LocationRecord> {
    let mut records: Vec<LocationRecord> = rows
        .iter()
        .filter(|row| row.quantity > 0)
        .filter_map(|row| {
            assigned_location(row).map(|code| LocationRecord {
                code: code.to_string(),
                barcode: row.barcode.clone(),
                name: row.item_name.clone(),
                description: row.description.clone().unwrap_or_default(),
                unit: row.unit.clone().unwrap_or_default(),
                category: row.category.clone().unwrap_or_default(),
                quantity: row.quantity,
            })
        })
        .collect();

    records.sort_by(|a, b| natural_cmp(&a.code, &b.code));
    records
}

// ---------------------------------------------------------------------------
// By BOM
// ---------------------------------------------------------------------------

/// One component line of a BOM entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomRow {
    pub main_barcode: Barcode,
    /// First component of its BOM entry.
    pub group_start: bool,
    pub component_barcode: Barcode,
    pub component_name: String,
    pub description: String,
    pub required_qty: f64,
    pub current_stock: Quantity,
    pub safe_stock: Quantity,
    /// Raw `code:qty,...` list as sent by the API.
    pub locations: String,
}

impl BomRow {
    /// The main barcode is only shown on the first row of each group.
    pub fn displayed_main_barcode(&self) -> Option<&str> {
        self.group_start.then_some(self.main_barcode.as_str())
    }
}

/// Flatten every entry into one row per component, preserving order.
pub fn flatten_bom(entries: &[BomEntry]) -> Vec<BomRow> {
    entries
        .iter()
        .flat_map(|entry| {
            entry
                .components
                .iter()
                .enumerate()
                .map(move |(idx, comp)| BomRow {
                    main_barcode: entry.main_barcode.clone(),
                    group_start: idx == 0,
                    component_barcode: comp.component_barcode.clone(),
                    component_name: comp.component_name.clone().unwrap_or_default(),
                    description: comp.description.clone().unwrap_or_default(),
                    required_qty: comp.required_qty,
                    current_stock: comp.current_stock,
                    safe_stock: comp.safe_stock,
                    locations: comp.locations.clone().unwrap_or_default(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::BomComponent;
    use assert_matches::assert_matches;

    fn rows() -> Vec<InventoryRow> {
        vec![
            InventoryRow::new("A10", Some("L2"), 3).with_name("Nut"),
            InventoryRow::new("A2", Some("L1"), 5)
                .with_name("Bolt")
                .with_safe_stock(4),
            InventoryRow::new("A2", Some("L10"), 2).with_name("Bolt (dup)"),
            InventoryRow::new("A1", None, 0).with_name("Washer"),
            InventoryRow::new("A2", Some(""), 1),
        ]
    }

    // -- tabs ----------------------------------------------------------------

    #[test]
    fn tab_parses_known_values() {
        assert_eq!("item".parse::<ReportTab>().unwrap(), ReportTab::Item);
        assert_eq!("location".parse::<ReportTab>().unwrap(), ReportTab::Location);
        assert_eq!("bom".parse::<ReportTab>().unwrap(), ReportTab::Bom);
    }

    #[test]
    fn tab_rejects_unknown_value() {
        assert_matches!("BOM".parse::<ReportTab>(), Err(CoreError::Validation(_)));
        assert_eq!(ReportTab::default(), ReportTab::Item);
    }

    // -- by item -------------------------------------------------------------

    #[test]
    fn item_summary_groups_and_sorts() {
        let summary = summarize_by_item(&rows());
        let barcodes: Vec<_> = summary.iter().map(|s| s.barcode.as_str()).collect();
        assert_eq!(barcodes, vec!["A1", "A2", "A10"]);
    }

    #[test]
    fn first_row_supplies_descriptive_fields() {
        let summary = summarize_by_item(&rows());
        let bolt = &summary[1];
        assert_eq!(bolt.name, "Bolt");
        assert_eq!(bolt.safe_stock, 4);
        assert_eq!(bolt.total_qty, 8);
    }

    #[test]
    fn locations_keep_encounter_order_and_skip_unassigned() {
        let summary = summarize_by_item(&rows());
        assert_eq!(
            summary[1].locations,
            vec![LocationQuantity::new("L1", 5), LocationQuantity::new("L10", 2)]
        );
        assert!(summary[0].locations.is_empty());
    }

    #[test]
    fn total_quantity_is_conserved() {
        let rows = rows();
        let summed: Quantity = summarize_by_item(&rows).iter().map(|s| s.total_qty).sum();
        let raw: Quantity = rows.iter().map(|r| r.quantity).sum();
        assert_eq!(summed, raw);
    }

    #[test]
    fn delete_affordance_only_for_zero_stock() {
        let summary = summarize_by_item(&rows());
        assert!(summary[0].is_deletable());
        assert!(!summary[2].is_deletable());
        assert_eq!(summary[2].total_qty, 3);
    }

    // -- by location ---------------------------------------------------------

    #[test]
    fn location_summary_filters_and_sorts() {
        let records = summarize_by_location(&rows());
        let codes: Vec<_> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["L1", "L2", "L10"]);
        assert!(records.iter().all(|r| r.quantity > 0));
    }

    #[test]
    fn location_summary_does_not_merge_rows() {
        let rows = vec![
            InventoryRow::new("X", Some("L1"), 1),
            InventoryRow::new("Y", Some("L1"), 2),
        ];
        assert_eq!(summarize_by_location(&rows).len(), 2);
    }

    // -- by BOM --------------------------------------------------------------

    #[test]
    fn bom_rows_mark_group_starts() {
        let entries = vec![
            BomEntry {
                main_barcode: "M1".into(),
                components: vec![
                    BomComponent::new("C1", Some("L01:5")),
                    BomComponent::new("C2", None),
                ],
            },
            BomEntry {
                main_barcode: "M2".into(),
                components: vec![BomComponent::new("C3", None)],
            },
        ];

        let rows = flatten_bom(&entries);
        assert_eq!(rows.len(), 3);
        let shown: Vec<_> = rows.iter().map(BomRow::displayed_main_barcode).collect();
        assert_eq!(shown, vec![Some("M1"), None, Some("M2")]);
        assert_eq!(rows[1].main_barcode, "M1");
        assert_eq!(rows[0].locations, "L01:5");
        assert_eq!(rows[1].locations, "");
    }

    #[test]
    fn bom_entry_without_components_yields_nothing() {
        let entries = vec![BomEntry {
            main_barcode: "M1".into(),
            components: vec![],
        }];
        assert!(flatten_bom(&entries).is_empty());
    }
}
