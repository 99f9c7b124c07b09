//! Warehouse inventory dashboard domain logic.
//!
//! Everything in this crate is pure data reshaping: the caller fetches
//! snapshots from the inventory API and passes them in. No I/O, no timers.

pub mod classifier;
pub mod delete_dialog;
pub mod error;
pub mod export;
pub mod inventory;
pub mod location_code;
pub mod natural_order;
pub mod report;
pub mod safe_stock;
pub mod search;
pub mod sequence;
pub mod stats;
pub mod types;
