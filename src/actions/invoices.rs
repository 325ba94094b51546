//! Invoice mutation actions
//!
//! Each action is a straight line: validate, write, invalidate cached views,
//! then either redirect or hand a state back to the form.

use crate::core::cache::CacheInvalidator;
use crate::core::clock::Clock;
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceChanges, NewInvoice};
use crate::core::service::InvoiceStore;
use crate::core::state::{ActionOutcome, ActionState};
use crate::core::validation::InvoiceSchema;
use std::sync::Arc;

/// The invoice list view
pub const INVOICES_PATH: &str = "/dashboard/invoices";
/// The dashboard overview
pub const DASHBOARD_PATH: &str = "/dashboard";

pub const CREATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_MISSING_FIELDS: &str = "Missing Fields. Failed to Update Invoice.";
pub const CREATE_DB_ERROR: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_DB_ERROR: &str = "Database Error: Failed to Update Invoice.";
pub const DELETE_DB_ERROR: &str = "Database Error: Failed to Delete Invoice.";
pub const DELETED_MESSAGE: &str = "Deleted invoice.";

/// Create, update and delete actions over injected collaborators
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn CacheInvalidator>,
    clock: Arc<dyn Clock>,
    schema: InvoiceSchema,
}

impl InvoiceActions {
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        cache: Arc<dyn CacheInvalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            cache,
            clock,
            schema: InvoiceSchema,
        }
    }

    /// Create an invoice dated today
    ///
    /// The previous state is accepted for parity with the form hook and ignored.
    pub async fn create(&self, _prev: &ActionState, form: &FormData) -> ActionOutcome {
        let draft = match self.schema.safe_parse(form) {
            Ok(draft) => draft,
            Err(errors) => {
                let fields: Vec<&String> = errors.keys().collect();
                tracing::debug!(?fields, "Invoice form rejected");
                return ActionState::invalid(errors, CREATE_MISSING_FIELDS).into();
            }
        };

        let invoice = NewInvoice {
            amount: draft.amount,
            customer_id: draft.customer_id,
            status: draft.status,
            date: self.clock.today(),
        };

        match self.store.insert(invoice).await {
            Ok(created) => {
                tracing::info!(invoice_id = %created.id, amount = created.amount, "Invoice created");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create invoice");
                return ActionState::message(CREATE_DB_ERROR).into();
            }
        }

        self.cache.revalidate_path(INVOICES_PATH).await;
        self.cache.revalidate_path(DASHBOARD_PATH).await;
        ActionOutcome::redirect(INVOICES_PATH)
    }

    /// Update an invoice's customer, amount and status
    pub async fn update(&self, id: &str, form: &FormData) -> ActionOutcome {
        let draft = match self.schema.safe_parse(form) {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!(invoice_id = %id, "Invoice form rejected");
                return ActionState::invalid(errors, UPDATE_MISSING_FIELDS).into();
            }
        };

        let changes = InvoiceChanges {
            amount: draft.amount,
            customer_id: draft.customer_id,
            status: draft.status,
        };

        match self.store.update(id, changes).await {
            Ok(0) => tracing::warn!(invoice_id = %id, "Update matched no invoice"),
            Ok(_) => tracing::info!(invoice_id = %id, "Invoice updated"),
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to update invoice");
                return ActionState::message(UPDATE_DB_ERROR).into();
            }
        }

        self.cache.revalidate_path(INVOICES_PATH).await;
        ActionOutcome::redirect(INVOICES_PATH)
    }

    /// Delete an invoice; stays on the page
    pub async fn delete(&self, id: &str) -> ActionState {
        match self.store.delete(id).await {
            Ok(removed) => {
                tracing::info!(invoice_id = %id, removed, "Invoice deleted");
            }
            Err(e) => {
                tracing::error!(invoice_id = %id, error = %e, "Failed to delete invoice");
                return ActionState::message(DELETE_DB_ERROR);
            }
        }

        self.cache.revalidate_path(INVOICES_PATH).await;
        ActionState::message(DELETED_MESSAGE)
    }
}
