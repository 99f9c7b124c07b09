//! `stockmap-dashboard` library crate.
//!
//! Controllers behind the warehouse inventory dashboard:
//!
//! - [`overview`] -- periodic occupancy stats and debounced barcode search.
//! - [`report`] -- item / location / BOM projections, safe-stock edits,
//!   item deletion and export.
//! - [`xlsx`] -- spreadsheet writer for exported projections.
//!
//! The `stockmap` binary in `main.rs` drives these from the command line.

pub mod commands;
pub mod config;
pub mod error;
pub mod overview;
pub mod report;
pub mod xlsx;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
