//! Inventory API client library.
//!
//! [`api::InventoryApi`] wraps the REST endpoints of the inventory server;
//! [`source::InventorySource`] is the seam the dashboard controllers depend
//! on, so they can run against an in-memory fake in tests.

pub mod api;
pub mod source;

pub use api::{InventoryApi, InventoryApiError};
pub use source::InventorySource;
