//! The invoice form schema
//!
//! Create and update accept exactly the same fields, so a single schema serves
//! both. It never sees the invoice id or date; those come from the route and
//! the server.

use super::filters::trim;
use super::validators::{coerce_number, in_list, positive, required};
use crate::core::error::{AppError, FieldErrors, ValidationError};
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceDraft, InvoiceStatus, to_cents};

pub const CUSTOMER_ID_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

const STATUS_VALUES: &[&str] = &["pending", "paid"];

/// Coerces and validates submitted invoice fields
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceSchema;

impl InvoiceSchema {
    /// Validate without failing: every field error is collected
    pub fn safe_parse(&self, form: &FormData) -> Result<InvoiceDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let clean = trim();

        let customer_id = clean(form.get(CUSTOMER_ID_FIELD));
        if let Err(message) = required(CUSTOMER_REQUIRED)(customer_id.as_deref()) {
            push(&mut errors, CUSTOMER_ID_FIELD, message);
        }

        // Checked in stored cents: a sub-cent amount rounds to zero and fails.
        let amount = coerce_number(form.get(AMOUNT_FIELD)).and_then(to_cents);
        match amount {
            Some(num) => {
                if let Err(message) = positive(AMOUNT_POSITIVE)(num) {
                    push(&mut errors, AMOUNT_FIELD, message);
                }
            }
            None => push(&mut errors, AMOUNT_FIELD, AMOUNT_POSITIVE.to_string()),
        }

        let status = clean(form.get(STATUS_FIELD));
        if let Err(message) = in_list(STATUS_VALUES, STATUS_REQUIRED)(status.as_deref()) {
            push(&mut errors, STATUS_FIELD, message);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // All three checks passed, so each value is present and well-formed.
        match (customer_id, amount, status.and_then(|s| s.parse::<InvoiceStatus>().ok())) {
            (Some(customer_id), Some(amount), Some(status)) => Ok(InvoiceDraft {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }

    /// Validate, failing with a typed error
    pub fn parse(&self, form: &FormData) -> Result<InvoiceDraft, AppError> {
        self.safe_parse(form)
            .map_err(|errors| ValidationError::FieldErrors(errors).into())
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}
