//! Form actions: the entry points that mutate state on behalf of the browser

pub mod authenticate;
pub mod invoices;

pub use authenticate::AuthenticateAction;
pub use invoices::{DASHBOARD_PATH, INVOICES_PATH, InvoiceActions};
