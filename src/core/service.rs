//! Store traits for invoices, customers and users
//!
//! Actions only ever talk to these traits. Every call is a single atomic
//! statement against the backend; callers do not retry.

use crate::core::invoice::{Customer, Invoice, InvoiceChanges, InvoiceRow, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for invoice persistence
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice; the store assigns the id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Overwrite the user-editable fields of an invoice
    ///
    /// Returns the number of rows touched.
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64>;

    /// Delete an invoice
    ///
    /// Returns the number of rows removed.
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Get an invoice by id
    async fn get(&self, id: &str) -> Result<Option<Invoice>>;

    /// One page of invoices matching `query`, newest first
    ///
    /// Pages start at 1.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<InvoiceRow>>;

    /// Number of pages `search` can return for `query`
    async fn count_pages(&self, query: &str) -> Result<u32>;
}

/// Service trait for customer lookups
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, ordered by name
    async fn list(&self) -> Result<Vec<Customer>>;
}

/// A user allowed to sign in
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

/// Service trait for user lookups
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}
