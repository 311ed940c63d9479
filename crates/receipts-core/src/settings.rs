use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::time_utils::{parse_timezone, Window, DEFAULT_TIMEZONE};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Summarise purchased items from an ICA GDPR receipt export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ica-gdpr-parse",
    about = "Summarise purchased items from an ICA GDPR receipt export",
    version
)]
pub struct Settings {
    /// Directory containing the exported xml files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// First local date included in the window (YYYY-MM-DD)
    #[arg(long, default_value = "2023-01-01")]
    pub from: NaiveDate,

    /// Local date the window ends at, exclusive (YYYY-MM-DD)
    #[arg(long, default_value = "2024-01-01")]
    pub to: NaiveDate,

    /// Timezone the export's timestamps are written in
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Logging level (RUST_LOG takes precedence when set)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Settings {
    /// Build the aggregation window from `--from`, `--to` and `--timezone`.
    pub fn window(&self) -> Result<Window> {
        let tz = parse_timezone(&self.timezone)?;
        Window::from_dates(tz, self.from, self.to)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
