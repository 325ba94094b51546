//! In-memory stores for testing and development

use crate::core::invoice::{
    Customer, ITEMS_PER_PAGE, Invoice, InvoiceChanges, InvoiceRow, NewInvoice, page_offset,
    total_pages,
};
use crate::core::service::{CustomerStore, InvoiceStore, User, UserStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice and customer store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    customers: Arc<RwLock<HashMap<String, Customer>>>,
}

impl InMemoryInvoiceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer invoices can reference
    pub fn add_customer(&self, customer: Customer) -> Result<()> {
        let mut customers = self
            .customers
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        customers.insert(customer.id.clone(), customer);
        Ok(())
    }

    /// Matching rows, newest first
    fn filtered_rows(&self, query: &str) -> Result<Vec<InvoiceRow>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let customers = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut rows: Vec<InvoiceRow> = invoices
            .values()
            .filter_map(|invoice| {
                let customer = customers.get(&invoice.customer_id)?;
                Some(InvoiceRow {
                    id: invoice.id.clone(),
                    customer_id: customer.id.clone(),
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    amount: invoice.amount,
                    date: invoice.date,
                    status: invoice.status,
                })
            })
            .filter(|row| row.matches(query))
            .collect();

        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        let known_customer = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?
            .contains_key(&invoice.customer_id);
        if !known_customer {
            return Err(anyhow!(
                "customer '{}' does not exist",
                invoice.customer_id
            ));
        }

        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let created = Invoice {
            id: Uuid::new_v4().to_string(),
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        };
        invoices.insert(created.id.clone(), created.clone());

        Ok(created)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(invoice) = invoices.get_mut(id) else {
            return Ok(0);
        };
        invoice.customer_id = changes.customer_id;
        invoice.amount = changes.amount;
        invoice.status = changes.status;

        Ok(1)
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.remove(id).map_or(0, |_| 1))
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).cloned())
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<InvoiceRow>> {
        Ok(self
            .filtered_rows(query)?
            .into_iter()
            .skip(page_offset(page) as usize)
            .take(ITEMS_PER_PAGE as usize)
            .collect())
    }

    async fn count_pages(&self, query: &str) -> Result<u32> {
        Ok(total_pages(self.filtered_rows(query)?.len() as u64))
    }
}

#[async_trait]
impl CustomerStore for InMemoryInvoiceStore {
    async fn list(&self) -> Result<Vec<Customer>> {
        let customers = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<Customer> = customers.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

/// In-memory user store
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, keyed by email
    pub fn add_user(&self, user: User) -> Result<()> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        users.insert(user.email.clone(), user);
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.get(email).cloned())
    }
}
