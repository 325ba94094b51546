//! ServerBuilder for fluent API to build the dashboard HTTP server

use super::routes::build_routes;
use super::state::AppState;
use crate::actions::{AuthenticateAction, InvoiceActions};
use crate::core::auth::Authenticator;
use crate::core::cache::RevalidationRegistry;
use crate::core::clock::{Clock, SystemClock};
use crate::core::service::{CustomerStore, InvoiceStore};
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder wiring the actions to their collaborators
///
/// # Example
///
/// ```ignore
/// let store = InMemoryInvoiceStore::new();
/// let app = ServerBuilder::new()
///     .with_invoice_store(store.clone())
///     .with_customer_store(store)
///     .with_authenticator(CredentialsAuthenticator::new(Arc::new(users)))
///     .build()?;
/// ```
pub struct ServerBuilder {
    invoice_store: Option<Arc<dyn InvoiceStore>>,
    customer_store: Option<Arc<dyn CustomerStore>>,
    authenticator: Option<Arc<dyn Authenticator>>,
    clock: Arc<dyn Clock>,
    revalidation: Arc<RevalidationRegistry>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            invoice_store: None,
            customer_store: None,
            authenticator: None,
            clock: Arc::new(SystemClock),
            revalidation: Arc::new(RevalidationRegistry::new()),
        }
    }

    /// Set the invoice store (required)
    pub fn with_invoice_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.invoice_store = Some(Arc::new(store));
        self
    }

    /// Set the customer store (required)
    pub fn with_customer_store(mut self, store: impl CustomerStore + 'static) -> Self {
        self.customer_store = Some(Arc::new(store));
        self
    }

    /// Set the sign-in provider (required)
    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Override the clock used to date new invoices
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Share a revalidation registry with the caller
    ///
    /// Useful to observe invalidations from outside the router.
    pub fn with_revalidation_registry(mut self, registry: Arc<RevalidationRegistry>) -> Self {
        self.revalidation = registry;
        self
    }

    /// Assemble the shared state
    pub fn build_state(&self) -> Result<AppState> {
        let invoice_store = self
            .invoice_store
            .clone()
            .ok_or_else(|| anyhow!("InvoiceStore is required. Call .with_invoice_store()"))?;
        let customers = self
            .customer_store
            .clone()
            .ok_or_else(|| anyhow!("CustomerStore is required. Call .with_customer_store()"))?;
        let authenticator = self
            .authenticator
            .clone()
            .ok_or_else(|| anyhow!("Authenticator is required. Call .with_authenticator()"))?;

        Ok(AppState {
            invoices: InvoiceActions::new(
                invoice_store.clone(),
                self.revalidation.clone(),
                self.clock.clone(),
            ),
            authenticate: AuthenticateAction::new(authenticator),
            invoice_store,
            customers,
            revalidation: self.revalidation.clone(),
            etag_epoch: uuid::Uuid::new_v4().simple().to_string(),
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let state = self.build_state()?;
        Ok(build_routes(state).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
