//! Dashboard server binary
//!
//! Usage: `invoice-server [config.yaml]`

use anyhow::Result;
use invoice_actions::auth::CredentialsAuthenticator;
use invoice_actions::config::{AppConfig, init_tracing};
use invoice_actions::server::ServerBuilder;
use invoice_actions::storage::{InMemoryInvoiceStore, InMemoryUserStore, seed_in_memory};
use std::path::Path;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "invoices.yaml";

fn load_config() -> Result<AppConfig> {
    let path = std::env::args().nth(1).or_else(|| {
        Path::new(DEFAULT_CONFIG_PATH)
            .exists()
            .then(|| DEFAULT_CONFIG_PATH.to_string())
    });

    let config = match path {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    }
    .apply_env_overrides();

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_tracing(&config.logging);

    let builder = match config.database.url.as_deref() {
        #[cfg(feature = "postgres")]
        Some(_) => {
            use invoice_actions::storage::PostgresStore;

            let store = PostgresStore::connect(&config.database).await?;
            store.migrate().await?;
            tracing::info!("Using PostgreSQL storage");

            ServerBuilder::new()
                .with_invoice_store(store.clone())
                .with_customer_store(store.clone())
                .with_authenticator(CredentialsAuthenticator::new(Arc::new(store)))
        }
        _ => {
            if config.database.url.is_some() {
                tracing::warn!(
                    "database.url is set but the postgres feature is disabled; using in-memory storage"
                );
            }
            tracing::info!("Using in-memory storage");

            let store = InMemoryInvoiceStore::new();
            let users = InMemoryUserStore::new();
            seed_in_memory(&config.seed, &store, &users)?;

            ServerBuilder::new()
                .with_invoice_store(store.clone())
                .with_customer_store(store)
                .with_authenticator(CredentialsAuthenticator::new(Arc::new(users)))
        }
    };

    builder.serve(&config.server.addr).await
}
