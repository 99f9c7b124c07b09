//! Cross-module invariants of the stats and report projections, checked over
//! a spread of generated snapshots.

use stockmap_core::classifier::LocationClassifier;
use stockmap_core::inventory::{InventoryRow, Location};
use stockmap_core::natural_order::natural_cmp;
use stockmap_core::report::{summarize_by_item, summarize_by_location};
use stockmap_core::stats::compute_stats;
use stockmap_core::types::Quantity;

/// Deterministic pseudo-random snapshot: `n` rows over a handful of
/// barcodes and locations, some unassigned and some with zero quantity.
fn snapshot(n: usize, seed: u64) -> Vec<InventoryRow> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    (0..n)
        .map(|_| {
            let barcode = format!("P{}", next() % 15);
            let location = match next() % 5 {
                0 => None,
                k => Some(format!("L{}-{}", k, next() % 12)),
            };
            let quantity = (next() % 4) as Quantity;
            InventoryRow::new(barcode, location.as_deref(), quantity)
        })
        .collect()
}

fn locations(seed: u64) -> Vec<Location> {
    let codes = [
        "A-01", "A-02", "#A-03#V_1", "走道二", "B", "柱", "大門", "倉庫儲位圖", "C-10", "C-2",
    ];
    codes
        .iter()
        .enumerate()
        .map(|(i, code)| Location::new(*code, ((seed as usize + i) % 3) as Quantity))
        .collect()
}

// ---------------------------------------------------------------------------
// Test: occupancy partitions the real storage locations
// ---------------------------------------------------------------------------

#[test]
fn occupied_plus_empty_equals_storage_count() {
    let classifier = LocationClassifier::default();
    for seed in 0..10 {
        let locs = locations(seed);
        let stats = compute_stats(&locs, &classifier);
        let storage = locs.iter().filter(|l| classifier.is_storage(&l.code)).count();

        assert_eq!(stats.occupied_cells + stats.empty_cells, storage);
        assert_eq!(storage, 5);
    }
}

// ---------------------------------------------------------------------------
// Test: total stock covers administrative locations too
// ---------------------------------------------------------------------------

#[test]
fn total_stock_is_sum_over_all_locations() {
    let classifier = LocationClassifier::default();
    for seed in 0..10 {
        let locs = locations(seed);
        let expected: Quantity = locs.iter().map(|l| l.total_quantity).sum();
        assert_eq!(compute_stats(&locs, &classifier).total_stock, expected);
    }
}

// ---------------------------------------------------------------------------
// Test: item summary conserves total quantity
// ---------------------------------------------------------------------------

#[test]
fn item_summary_conserves_quantity() {
    for seed in 1..20 {
        let rows = snapshot(60, seed);
        let summed: Quantity = summarize_by_item(&rows).iter().map(|s| s.total_qty).sum();
        let raw: Quantity = rows.iter().map(|r| r.quantity).sum();
        assert_eq!(summed, raw, "seed {seed}");
    }
}

// ---------------------------------------------------------------------------
// Test: location summary excludes zero-quantity and unassigned rows
// ---------------------------------------------------------------------------

#[test]
fn location_summary_excludes_empty_and_unassigned_rows() {
    for seed in 1..20 {
        let rows = snapshot(60, seed);
        let records = summarize_by_location(&rows);
        let expected = rows
            .iter()
            .filter(|r| r.quantity > 0 && r.location_code.is_some())
            .count();

        assert_eq!(records.len(), expected, "seed {seed}");
        assert!(records.iter().all(|r| r.quantity > 0));
    }
}

// ---------------------------------------------------------------------------
// Test: projections are already sorted, so re-sorting is a no-op
// ---------------------------------------------------------------------------

#[test]
fn projections_are_fixed_points_of_sorting() {
    for seed in 1..20 {
        let rows = snapshot(60, seed);

        let items = summarize_by_item(&rows);
        let mut resorted = items.clone();
        resorted.sort_by(|a, b| natural_cmp(&a.barcode, &b.barcode));
        assert_eq!(items, resorted);

        let records = summarize_by_location(&rows);
        let mut resorted = records.clone();
        resorted.sort_by(|a, b| natural_cmp(&a.code, &b.code));
        assert_eq!(records, resorted);
    }
}

// ---------------------------------------------------------------------------
// Test: each barcode appears exactly once in the item summary
// ---------------------------------------------------------------------------

#[test]
fn item_summary_deduplicates_barcodes() {
    let rows = snapshot(100, 7);
    let items = summarize_by_item(&rows);
    let mut barcodes: Vec<_> = items.iter().map(|i| i.barcode.clone()).collect();
    barcodes.dedup();
    assert_eq!(barcodes.len(), items.len());
}
