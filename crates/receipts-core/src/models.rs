use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A receipt header read from the transactions export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Receipt identifier, unique within one export.
    #[serde(rename = "transactionId")]
    pub id: String,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`, without zone information.
    #[serde(rename = "transactionTimestamp")]
    pub timestamp: String,
    /// Receipt total as printed by the store.
    #[serde(rename = "transactionValue", deserialize_with = "deserialize_amount")]
    pub value: f64,
    /// Store name shown on the receipt.
    #[serde(rename = "marketingName")]
    pub marketing_name: String,
}

/// One purchased row of a receipt, read from the line items export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Identifier of the owning [`Transaction`].
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    /// Item description; the grouping key for [`ItemTotal`].
    #[serde(rename = "itemDesc")]
    pub item_desc: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub quantity: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: f64,
    /// Discount applied to the row, stored as zero or a negative amount.
    #[serde(rename = "discountValue", deserialize_with = "deserialize_amount")]
    pub discount_value: f64,
}

/// Both record sets of one export, fully loaded.
#[derive(Debug, Clone, Default)]
pub struct ExportData {
    pub transactions: Vec<Transaction>,
    pub line_items: Vec<LineItem>,
}

/// Totals accumulated for one item description.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemTotal {
    #[serde(rename = "item")]
    pub item_desc: String,
    #[serde(serialize_with = "serialize_amount")]
    pub total_quantity: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub total_price: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub total_discount_value: f64,
    #[serde(serialize_with = "serialize_amount")]
    pub total_discounted_price: f64,
}

impl ItemTotal {
    /// An empty accumulator for `item_desc`.
    pub fn new(item_desc: impl Into<String>) -> Self {
        Self {
            item_desc: item_desc.into(),
            ..Self::default()
        }
    }

    /// Add a single row's amounts to the running totals.
    ///
    /// The discounted price is `price + discount_value`: discounts are stored
    /// as non-positive numbers.
    pub fn add_line_item(&mut self, row: &LineItem) {
        self.total_quantity += row.quantity;
        self.total_price += row.price;
        self.total_discount_value += row.discount_value;
        self.total_discounted_price += row.price + row.discount_value;
    }
}

/// The JSON document emitted for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    #[serde(serialize_with = "serialize_rfc3339")]
    pub from: DateTime<Tz>,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub to: DateTime<Tz>,
    /// Sorted ascending by item description.
    pub items: Vec<ItemTotal>,
}

/// Element text as a number; an empty or blank element reads as `0`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse::<f64>()
        .map_err(|e| D::Error::custom(format!("invalid number {text:?}: {e}")))
}

/// Whole amounts are written without a fraction (`2`, not `2.0`).
fn serialize_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_rfc3339<S>(dt: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}
