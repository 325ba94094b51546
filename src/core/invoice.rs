//! Invoice domain types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rows per page in the invoice list
pub const ITEMS_PER_PAGE: u32 = 6;

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

/// A persisted invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Validated form input: the fields a user controls
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    /// Amount in cents, already checked to be positive
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Values written by an insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by an update
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Convert a currency amount to whole cents, rounding half away from zero
///
/// `None` when the result does not fit in an `i64`.
pub fn to_cents(amount: f64) -> Option<i64> {
    let cents = (amount * 100.0).round();
    // i64::MAX is not representable as f64; its nearest value is 2^63, one past the range.
    (cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64)
        .then_some(cents as i64)
}

/// A customer invoices are billed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// An invoice joined with its customer, as shown in the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
}

impl InvoiceRow {
    /// Case-insensitive substring match over the searchable columns
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            self.name.to_lowercase(),
            self.email.to_lowercase(),
            self.amount.to_string(),
            self.date.to_string(),
            self.status.as_str().to_string(),
        ]
        .iter()
        .any(|haystack| haystack.contains(&needle))
    }
}

/// Page count for a number of matching rows
pub fn total_pages(count: u64) -> u32 {
    count.div_ceil(ITEMS_PER_PAGE as u64) as u32
}

/// Zero-based row offset of a one-based page number
pub fn page_offset(page: u32) -> u32 {
    page.max(1).saturating_sub(1) * ITEMS_PER_PAGE
}
