//! Top-level pipeline: load an export directory, then aggregate it.

use std::path::Path;

use receipts_core::error::Result;
use receipts_core::models::Totals;
use receipts_core::time_utils::Window;
use tracing::info;

use crate::aggregator::compute_totals;
use crate::reader::load_export;

/// Load the export in `dir` and compute per-item totals for `window`.
///
/// Fails on the first read, decode or timestamp error; there is no partial
/// result.
pub fn summarize_export(dir: &Path, window: &Window) -> Result<Totals> {
    let data = load_export(dir)?;
    info!(
        "Loaded {} transactions and {} line items from {}",
        data.transactions.len(),
        data.line_items.len(),
        dir.display()
    );

    let totals = compute_totals(&data.transactions, &data.line_items, window)?;
    info!(
        "{} items between {} and {}",
        totals.items.len(),
        totals.from,
        totals.to
    );

    Ok(totals)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
