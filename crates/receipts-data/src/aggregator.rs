//! Per-item totals over the transactions of a time window.

use std::collections::{BTreeMap, HashSet};

use receipts_core::error::Result;
use receipts_core::models::{ItemTotal, LineItem, Totals, Transaction};
use receipts_core::time_utils::{parse_local_timestamp, Window};
use tracing::debug;

/// Sum line items per description, counting only rows whose transaction
/// falls inside `window`.
///
/// Every timestamp is parsed before anything is accumulated: one malformed
/// value fails the whole computation. Line items that reference unknown or
/// out-of-window transactions are skipped. Items come back sorted by
/// description, byte-wise ascending.
pub fn compute_totals(
    transactions: &[Transaction],
    line_items: &[LineItem],
    window: &Window,
) -> Result<Totals> {
    let included = included_transactions(transactions, window)?;

    // BTreeMap keeps String keys in byte order.
    let mut items: BTreeMap<&str, ItemTotal> = BTreeMap::new();

    for row in line_items {
        if !included.contains(row.transaction_id.as_str()) {
            continue;
        }

        items
            .entry(row.item_desc.as_str())
            .or_insert_with(|| ItemTotal::new(row.item_desc.as_str()))
            .add_line_item(row);
    }

    debug!(
        "{} of {} transactions in window, {} distinct items",
        included.len(),
        transactions.len(),
        items.len()
    );

    Ok(Totals {
        from: window.from,
        to: window.to,
        items: items.into_values().collect(),
    })
}

/// Ids of the transactions whose local timestamp lies in `window`.
fn included_transactions<'a>(
    transactions: &'a [Transaction],
    window: &Window,
) -> Result<HashSet<&'a str>> {
    let mut included = HashSet::new();

    for txn in transactions {
        let instant = parse_local_timestamp(&txn.timestamp, window.tz)?;
        if window.contains(&instant) {
            included.insert(txn.id.as_str());
        }
    }

    Ok(included)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
