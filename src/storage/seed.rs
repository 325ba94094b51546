//! Loading starting data into the in-memory stores

use super::in_memory::{InMemoryInvoiceStore, InMemoryUserStore};
use crate::auth::hash_password;
use crate::config::SeedConfig;
use crate::core::service::User;
use anyhow::Result;
use uuid::Uuid;

/// Add the configured customers and users
///
/// Passwords are hashed here, so the user store only ever holds argon2 hashes.
pub fn seed_in_memory(
    seed: &SeedConfig,
    invoices: &InMemoryInvoiceStore,
    users: &InMemoryUserStore,
) -> Result<()> {
    for customer in &seed.customers {
        invoices.add_customer(customer.clone())?;
    }

    for user in &seed.users {
        users.add_user(User {
            id: Uuid::new_v4().to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: hash_password(&user.password)?,
        })?;
    }

    tracing::info!(
        customers = seed.customers.len(),
        users = seed.users.len(),
        "Seeded in-memory storage"
    );
    Ok(())
}
