//! Validation and filtering system
//!
//! This module provides a declarative approach to validating submitted form
//! data before it reaches the stores. The invoice schema is assembled from the
//! reusable filters and validators defined here.

pub mod extractor;
pub mod filters;
pub mod schema;
pub mod validators;

pub use extractor::FormPayload;
pub use schema::InvoiceSchema;
