//! Shared types for the receipt export summariser.
//!
//! Holds the record and output models, the error type, timezone-aware
//! window handling and the command-line settings.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ReceiptsError, Result};
