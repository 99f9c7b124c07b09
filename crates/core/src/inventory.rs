//! Wire-level data model returned by the inventory API.
//!
//! Every snapshot is immutable once fetched; aggregation in
//! [`crate::report`] and [`crate::stats`] derives new view models from it.
//! Nullable numeric fields collapse to zero on deserialization, nullable
//! text fields stay `None` and display as the empty string.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Barcode, Quantity};

/// Deserialize `null` (or a missing field, together with `#[serde(default)]`)
/// as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Occupancy of one physical location, as returned by `getLocations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_quantity: Quantity,
}

impl Location {
    pub fn new(code: impl Into<String>, total_quantity: Quantity) -> Self {
        Self {
            code: code.into(),
            total_quantity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_quantity == 0
    }
}

// ---------------------------------------------------------------------------
// Inventory rows
// ---------------------------------------------------------------------------

/// One (item, location) pairing with its quantity.
///
/// Many rows may share a barcode (one per location) or a location code (one
/// per item stored there). `location_code` is `None` for items that are not
/// stored anywhere yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub barcode: Barcode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub safe_stock: Quantity,
    #[serde(default)]
    pub location_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: Quantity,
}

impl InventoryRow {
    /// Row with only the identifying fields set. Mostly used by tests and
    /// fakes; the API always sends full rows.
    pub fn new(
        barcode: impl Into<Barcode>,
        location_code: Option<&str>,
        quantity: Quantity,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            item_name: String::new(),
            description: None,
            unit: None,
            category: None,
            safe_stock: 0,
            location_code: location_code.map(str::to_string),
            quantity,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = name.into();
        self
    }

    pub fn with_safe_stock(mut self, safe_stock: Quantity) -> Self {
        self.safe_stock = safe_stock;
        self
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Master data for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub barcode: Barcode,
    #[serde(default, alias = "item_name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub safe_stock: Quantity,
}

/// Response of `getItemDetails`: the item plus its per-location rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub item: Item,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inventory: Vec<InventoryRow>,
}

// ---------------------------------------------------------------------------
// Bill of materials
// ---------------------------------------------------------------------------

/// One required component of a BOM entry.
///
/// `locations` is the API's encoded `code:qty,code:qty` list; decode it with
/// [`crate::location_code::parse_location_list`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomComponent {
    pub component_barcode: Barcode,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_qty: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_stock: Quantity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub safe_stock: Quantity,
    #[serde(default)]
    pub locations: Option<String>,
}

impl BomComponent {
    pub fn new(component_barcode: impl Into<Barcode>, locations: Option<&str>) -> Self {
        Self {
            component_barcode: component_barcode.into(),
            component_name: None,
            description: None,
            required_qty: 1.0,
            current_stock: 0,
            safe_stock: 0,
            locations: locations.map(str::to_string),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = Some(name.into());
        self
    }
}

/// A main item and its ordered list of required components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEntry {
    pub main_barcode: Barcode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<BomComponent>,
}
