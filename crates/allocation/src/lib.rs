//! Stock allocation domain module.
//!
//! Assigns customer order lines to purchased batches of stock: on-hand stock
//! before incoming shipments, earliest ETA first. Pure, deterministic domain
//! logic (no IO, no storage); callers load batches, call [`allocate`], and
//! persist whatever changed.

pub mod batch;
pub mod error;
pub mod order_line;
pub mod service;

pub use batch::Batch;
pub use error::{AllocationError, AllocationResult};
pub use order_line::OrderLine;
pub use service::allocate;

pub use stockalloc_core::{BatchReference, OrderId, Sku};
