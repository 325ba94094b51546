//! Core module containing the domain types and collaborator traits

pub mod auth;
pub mod cache;
pub mod clock;
pub mod error;
pub mod form;
pub mod invoice;
pub mod service;
pub mod state;
pub mod validation;

pub use auth::{AuthError, Authenticator, CREDENTIALS_STRATEGY};
pub use cache::{CacheInvalidator, RevalidationRegistry};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, AppResult, FieldErrors};
pub use form::FormData;
pub use invoice::{Customer, Invoice, InvoiceDraft, InvoiceRow, InvoiceStatus};
pub use service::{CustomerStore, InvoiceStore, User, UserStore};
pub use state::{ActionOutcome, ActionState};
pub use validation::InvoiceSchema;
