//! Application state shared across route handlers

use crate::actions::{AuthenticateAction, InvoiceActions};
use crate::core::cache::RevalidationRegistry;
use crate::core::service::{CustomerStore, InvoiceStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub invoices: InvoiceActions,
    pub authenticate: AuthenticateAction,
    /// Read side of the invoice store
    pub invoice_store: Arc<dyn InvoiceStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub revalidation: Arc<RevalidationRegistry>,
    /// Distinguishes ETags issued by different server processes
    pub etag_epoch: String,
}
