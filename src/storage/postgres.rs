//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, implementing the invoice, customer and user
//! stores over a `sqlx::PgPool`. Ids are UUID columns exposed as text.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-actions = { version = "0.1", features = ["postgres"] }
//! ```

use crate::config::DatabaseConfig;
use crate::core::error::StorageError;
use crate::core::invoice::{
    Customer, ITEMS_PER_PAGE, Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, NewInvoice,
    page_offset, total_pages,
};
use crate::core::service::{CustomerStore, InvoiceStore, User, UserStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const BACKEND: &str = "PostgreSQL";

const INVOICE_COLUMNS: &str =
    "id::text AS id, customer_id::text AS customer_id, amount, status, date";

const SEARCH_FILTER: &str = "FROM invoices
    JOIN customers ON invoices.customer_id = customers.id
    WHERE customers.name ILIKE $1 ESCAPE '\\'
       OR customers.email ILIKE $1 ESCAPE '\\'
       OR invoices.amount::text ILIKE $1 ESCAPE '\\'
       OR invoices.date::text ILIKE $1 ESCAPE '\\'
       OR invoices.status ILIKE $1 ESCAPE '\\'";

/// Invoice, customer and user storage backed by PostgreSQL
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| anyhow!("database.url is required for the PostgreSQL backend"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn query_error(e: sqlx::Error) -> anyhow::Error {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
    .into()
}

/// Substring pattern for `ILIKE`, with the query's own wildcards taken literally
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn parse_status(row: &PgRow) -> Result<InvoiceStatus> {
    let status: String = row.try_get("status")?;
    status.parse::<InvoiceStatus>().map_err(|e| anyhow!(e))
}

fn invoice_from_row(row: &PgRow) -> Result<Invoice> {
    Ok(Invoice {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        amount: row.try_get("amount")?,
        status: parse_status(row)?,
        date: row.try_get("date")?,
    })
}

fn invoice_row_from_row(row: &PgRow) -> Result<InvoiceRow> {
    Ok(InvoiceRow {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        image_url: row.try_get("image_url")?,
        amount: row.try_get("amount")?,
        date: row.try_get("date")?,
        status: parse_status(row)?,
    })
}

#[async_trait]
impl InvoiceStore for PostgresStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        let sql = format!(
            "INSERT INTO invoices (customer_id, amount, status, date)
             VALUES ($1::uuid, $2, $3, $4)
             RETURNING {}",
            INVOICE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&invoice.customer_id)
            .bind(invoice.amount)
            .bind(invoice.status.as_str())
            .bind(invoice.date)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        invoice_from_row(&row)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE invoices
             SET customer_id = $1::uuid, amount = $2, status = $3
             WHERE id = $4::uuid",
        )
        .bind(&changes.customer_id)
        .bind(changes.amount)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1::uuid")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected())
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        let sql = format!(
            "SELECT {} FROM invoices WHERE id = $1::uuid",
            INVOICE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(invoice_from_row).transpose()
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<InvoiceRow>> {
        let sql = format!(
            "SELECT invoices.id::text AS id,
                    customers.id::text AS customer_id,
                    customers.name,
                    customers.email,
                    customers.image_url,
                    invoices.amount,
                    invoices.date,
                    invoices.status
             {}
             ORDER BY invoices.date DESC, invoices.id
             LIMIT $2 OFFSET $3",
            SEARCH_FILTER
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(query))
            .bind(ITEMS_PER_PAGE as i64)
            .bind(page_offset(page) as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(invoice_row_from_row).collect()
    }

    async fn count_pages(&self, query: &str) -> Result<u32> {
        let sql = format!("SELECT COUNT(*) AS count {}", SEARCH_FILTER);
        let row = sqlx::query(&sql)
            .bind(like_pattern(query))
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let count: i64 = row.try_get("count")?;
        Ok(total_pages(count.max(0) as u64))
    }
}

#[async_trait]
impl CustomerStore for PostgresStore {
    async fn list(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            "SELECT id::text AS id, name, email, image_url FROM customers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| -> Result<Customer> {
                Ok(Customer {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                    image_url: row.try_get("image_url")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id::text AS id, name, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.map(|row| -> Result<User> {
            Ok(User {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                password_hash: row.try_get("password")?,
            })
        })
        .transpose()
    }
}
