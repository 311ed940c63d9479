//! XML export loading.
//!
//! An export directory holds two files sharing the same envelope:
//!
//! ```text
//! <businessObjectToFileArea>
//!   <resObject>
//!     <TransactionHeader>        (or <LineItems>)
//!       <transactions>...</transactions>
//!       ...
//! ```
//!
//! Unknown elements are ignored and missing fields take their zero value.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use receipts_core::error::{ReceiptsError, Result};
use receipts_core::models::{ExportData, LineItem, Transaction};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Receipt headers.
pub const TRANSACTIONS_FILE: &str = "Butik kvitto.xml";
/// Receipt rows.
pub const LINE_ITEMS_FILE: &str = "Butik kvittorader.xml";
/// Root element of both files.
pub const ROOT_ELEMENT: &str = "businessObjectToFileArea";

// ── XML envelope ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExportFile<T> {
    #[serde(rename = "resObject", default = "Vec::new")]
    res_objects: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TransactionHeaderObject {
    #[serde(rename = "TransactionHeader", default)]
    headers: Vec<TransactionList>,
}

#[derive(Debug, Deserialize)]
struct TransactionList {
    #[serde(rename = "transactions", default)]
    transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
struct LineItemsObject {
    #[serde(rename = "LineItems", default)]
    lists: Vec<LineItemList>,
}

#[derive(Debug, Deserialize)]
struct LineItemList {
    #[serde(rename = "transactions", default)]
    rows: Vec<LineItem>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load both files of the export in `dir`.
///
/// Transactions are read first; the first failing file aborts the load.
pub fn load_export(dir: &Path) -> Result<ExportData> {
    let transactions = read_transactions(&dir.join(TRANSACTIONS_FILE))?;
    let line_items = read_line_items(&dir.join(LINE_ITEMS_FILE))?;

    Ok(ExportData {
        transactions,
        line_items,
    })
}

/// Read the transaction headers file at `path`.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let (name, xml) = read_source(path)?;
    parse_transactions(&name, &xml)
}

/// Read the line items file at `path`.
pub fn read_line_items(path: &Path) -> Result<Vec<LineItem>> {
    let (name, xml) = read_source(path)?;
    parse_line_items(&name, &xml)
}

/// Decode a transaction headers document. `name` is used in errors only.
pub fn parse_transactions(name: &str, xml: &str) -> Result<Vec<Transaction>> {
    let file: ExportFile<TransactionHeaderObject> = decode(name, xml)?;
    let transactions: Vec<Transaction> = file
        .res_objects
        .into_iter()
        .flat_map(|obj| obj.headers)
        .flat_map(|list| list.transactions)
        .collect();

    debug!("{}: {} transactions", name, transactions.len());
    Ok(transactions)
}

/// Decode a line items document. `name` is used in errors only.
pub fn parse_line_items(name: &str, xml: &str) -> Result<Vec<LineItem>> {
    let file: ExportFile<LineItemsObject> = decode(name, xml)?;
    let rows: Vec<LineItem> = file
        .res_objects
        .into_iter()
        .flat_map(|obj| obj.lists)
        .flat_map(|list| list.rows)
        .collect();

    debug!("{}: {} line items", name, rows.len());
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Read `path` as UTF-8, returning its base name alongside the contents.
fn read_source(path: &Path) -> Result<(String, String)> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = std::fs::read(path).map_err(|source| ReceiptsError::SourceRead {
        name: name.clone(),
        source,
    })?;

    let xml = String::from_utf8(bytes).map_err(|e| ReceiptsError::SourceDecode {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    Ok((name, xml))
}

fn decode<T: DeserializeOwned>(name: &str, xml: &str) -> Result<T> {
    let xml = xml.trim_start_matches('\u{feff}');
    check_root(name, xml)?;

    quick_xml::de::from_str(xml).map_err(|e| ReceiptsError::SourceDecode {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// The document element must be [`ROOT_ELEMENT`].
fn check_root(name: &str, xml: &str) -> Result<()> {
    let decode_err = |reason: String| ReceiptsError::SourceDecode {
        name: name.to_string(),
        reason,
    };

    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let root = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if root == ROOT_ELEMENT {
                    return Ok(());
                }
                return Err(decode_err(format!(
                    "expected element type <{ROOT_ELEMENT}> but have <{root}>"
                )));
            }
            Ok(Event::Eof) => return Err(decode_err("no root element".to_string())),
            Ok(_) => continue,
            Err(e) => return Err(decode_err(e.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
