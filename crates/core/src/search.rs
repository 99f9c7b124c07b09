//! Barcode search result model and highlight building.
//!
//! A scanned barcode may name a main assembly (looked up through the BOM
//! endpoint) or a single component (looked up through item details). Both
//! shapes are normalized into [`SearchResult`], whose highlights tell the
//! floor-map renderer which locations to mark.

use std::collections::HashMap;

use serde::Serialize;

use crate::inventory::{BomComponent, BomEntry, Item, ItemDetails, InventoryRow};
use crate::location_code::parse_location_list;
use crate::types::{Barcode, Quantity};

/// Shown instead of a location list when a component is stored nowhere.
pub const NO_LOCATION_PLACEHOLDER: &str = "無";

/// `true` when the query has nothing to search for.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Highlights
// ---------------------------------------------------------------------------

/// A BOM component found at a highlighted location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedComponent {
    pub barcode: Barcode,
    pub name: Option<String>,
    pub stock: Quantity,
}

/// One location touched by a BOM search, with every component stored there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomHighlight {
    pub location_code: String,
    pub components: Vec<HighlightedComponent>,
}

/// Group the components of `entry` by the locations they are stored in.
///
/// Locations appear in first-encounter order across the component list;
/// within a location, components keep their BOM order.
pub fn bom_highlights(entry: &BomEntry) -> Vec<BomHighlight> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut highlights: Vec<BomHighlight> = Vec::new();

    for comp in &entry.components {
        let Some(raw) = comp.locations.as_deref() else {
            continue;
        };
        for stock in parse_location_list(raw) {
            let slot = match index.get(&stock.location_code) {
                Some(&slot) => slot,
                None => {
                    index.insert(stock.location_code.clone(), highlights.len());
                    highlights.push(BomHighlight {
                        location_code: stock.location_code.clone(),
                        components: Vec::new(),
                    });
                    highlights.len() - 1
                }
            };
            highlights[slot].components.push(HighlightedComponent {
                barcode: comp.component_barcode.clone(),
                name: comp.component_name.clone(),
                stock: stock.quantity,
            });
        }
    }

    highlights
}

/// Pick the BOM entry whose main barcode equals `query`, falling back to
/// the first entry returned.
pub fn select_bom_entry<'a>(entries: &'a [BomEntry], query: &str) -> Option<&'a BomEntry> {
    entries
        .iter()
        .find(|entry| entry.main_barcode == query)
        .or_else(|| entries.first())
}

/// Comma-joined location codes a component is stored in, or
/// [`NO_LOCATION_PLACEHOLDER`].
pub fn component_location_summary(component: &BomComponent) -> String {
    let codes: Vec<String> = component
        .locations
        .as_deref()
        .map(parse_location_list)
        .unwrap_or_default()
        .into_iter()
        .map(|stock| stock.location_code)
        .collect();

    if codes.is_empty() {
        NO_LOCATION_PLACEHOLDER.to_string()
    } else {
        codes.join(",")
    }
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// Outcome of resolving a barcode query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchResult {
    Bom {
        data: BomEntry,
        highlights: Vec<BomHighlight>,
    },
    Item {
        data: Item,
        highlights: Vec<InventoryRow>,
    },
}

impl SearchResult {
    pub fn from_bom(entry: BomEntry) -> Self {
        let highlights = bom_highlights(&entry);
        SearchResult::Bom {
            data: entry,
            highlights,
        }
    }

    pub fn from_item_details(details: ItemDetails) -> Self {
        SearchResult::Item {
            data: details.item,
            highlights: details.inventory,
        }
    }

    /// Number of highlighted entries handed to the floor map.
    pub fn highlight_count(&self) -> usize {
        match self {
            SearchResult::Bom { highlights, .. } => highlights.len(),
            SearchResult::Item { highlights, .. } => highlights.len(),
        }
    }

    /// Location codes the floor map should mark, in highlight order.
    pub fn highlighted_codes(&self) -> Vec<&str> {
        match self {
            SearchResult::Bom { highlights, .. } => highlights
                .iter()
                .map(|h| h.location_code.as_str())
                .collect(),
            SearchResult::Item { highlights, .. } => highlights
                .iter()
                .filter_map(|row| row.location_code.as_deref())
                .collect(),
        }
    }
}
