//! Overview statistics over the full location list.

use serde::Serialize;

use crate::classifier::LocationClassifier;
use crate::inventory::Location;
use crate::types::Quantity;

/// Headline numbers shown on the overview page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Sum of `total_quantity` over every location, administrative ones
    /// included.
    pub total_stock: Quantity,
    /// Real storage locations holding any stock.
    pub occupied_cells: usize,
    /// Real storage locations holding nothing.
    pub empty_cells: usize,
    /// Always 0: per-item threshold comparison is not computed from the
    /// location list.
    pub low_stock: usize,
}

impl DashboardStats {
    pub fn storage_cells(&self) -> usize {
        self.occupied_cells + self.empty_cells
    }
}

/// Compute overview statistics for `locations`.
pub fn compute_stats(locations: &[Location], classifier: &LocationClassifier) -> DashboardStats {
    let total_stock = locations.iter().map(|l| l.total_quantity).sum();

    let (storage, occupied) = locations
        .iter()
        .filter(|l| classifier.is_storage(&l.code))
        .fold((0usize, 0usize), |(storage, occupied), l| {
            (storage + 1, occupied + usize::from(l.total_quantity > 0))
        });

    DashboardStats {
        total_stock,
        occupied_cells: occupied,
        empty_cells: storage - occupied,
        low_stock: 0,
    }
}
