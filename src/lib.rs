//! # Invoice Actions
//!
//! Server-side form actions for an invoicing dashboard: create, update and
//! delete invoices, and sign in with email and password.
//!
//! ## Features
//!
//! - **Validated Forms**: every field is checked and all failures are reported at once
//! - **Stable Messages**: user-facing failures are fixed strings the form can show as-is
//! - **Cache Invalidation**: writes mark the list views stale before redirecting
//! - **Pluggable Collaborators**: stores, clock, cache and sign-in are traits
//! - **Storage Backends**: in-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_actions::prelude::*;
//!
//! let store = InMemoryInvoiceStore::new();
//! let users = Arc::new(InMemoryUserStore::new());
//!
//! ServerBuilder::new()
//!     .with_invoice_store(store.clone())
//!     .with_customer_store(store)
//!     .with_authenticator(CredentialsAuthenticator::new(users))
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod actions;
pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{AuthenticateAction, DASHBOARD_PATH, INVOICES_PATH, InvoiceActions};

    // === Core ===
    pub use crate::core::{
        ActionOutcome, ActionState, AppError, AppResult, AuthError, Authenticator,
        CacheInvalidator, Clock, Customer, CustomerStore, FieldErrors, FixedClock, FormData,
        Invoice, InvoiceRow, InvoiceStatus, InvoiceStore, RevalidationRegistry, SystemClock, User,
        UserStore,
    };

    // === Auth ===
    pub use crate::auth::{CredentialsAuthenticator, hash_password, verify_password};

    // === Storage ===
    pub use crate::storage::{InMemoryInvoiceStore, InMemoryUserStore};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, LoggingConfig, SeedConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
