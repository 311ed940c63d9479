use thiserror::Error;

/// All errors produced while loading and summarising a receipt export.
#[derive(Error, Debug)]
pub enum ReceiptsError {
    /// A source file is missing or could not be read.
    #[error("open {name:?}: {source}")]
    SourceRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A source file does not match the expected XML schema.
    #[error("decode {name:?}: {reason}")]
    SourceDecode { name: String, reason: String },

    /// A transaction timestamp is not a valid local `YYYY-MM-DD HH:MM:SS`.
    #[error("parse timestamp {raw:?}: {reason}")]
    TimestampParse { raw: String, reason: String },

    /// A command-line or window setting is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the receipts crates.
pub type Result<T> = std::result::Result<T, ReceiptsError>;
