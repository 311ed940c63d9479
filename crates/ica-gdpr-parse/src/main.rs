mod bootstrap;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use receipts_core::settings::Settings;
use receipts_data::analysis::summarize_export;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("ica-gdpr-parse v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Window: {} to {} ({})",
        settings.from,
        settings.to,
        settings.timezone
    );

    let window = settings.window()?;
    let totals = summarize_export(&settings.dir, &window).context("calculate totals")?;

    output::write_totals(std::io::stdout().lock(), &totals)?;

    Ok(())
}
