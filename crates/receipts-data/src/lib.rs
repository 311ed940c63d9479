//! Data layer for the receipt export summariser.
//!
//! Reads the two XML files of an export, joins line items against the
//! transactions inside a time window and aggregates them per item.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use receipts_core as core;
