//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then environment variables
//! override individual values:
//!
//! - `INVOICES_ADDR` → `server.addr`
//! - `DATABASE_URL` → `database.url`
//! - `RUST_LOG` → `logging.level`

pub mod logging;

use crate::core::error::{AppError, AppResult, ConfigError};
use crate::core::invoice::Customer;
use serde::{Deserialize, Serialize};

pub use logging::init_tracing;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "127.0.0.1:3000")
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; in-memory stores are used when absent
    pub url: Option<String>,

    /// Maximum pool size
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A sign-in account loaded into the in-memory user store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    pub email: String,
    /// Plain text; hashed with argon2 when the store is seeded
    pub password: String,
}

/// Starting data for the in-memory backend
///
/// Ignored when a database URL is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub customers: Vec<Customer>,
    pub users: Vec<SeedUser>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        let customer = |id: &str, name: &str, email: &str, image: &str| Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            image_url: format!("/customers/{}.png", image),
        };

        Self {
            customers: vec![
                customer(
                    "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
                    "Evil Rabbit",
                    "evil@rabbit.com",
                    "evil-rabbit",
                ),
                customer(
                    "3958dc9e-712f-4377-85e9-fec4b6a6442a",
                    "Delba de Oliveira",
                    "delba@oliveira.com",
                    "delba-de-oliveira",
                ),
                customer(
                    "3958dc9e-742f-4377-85e9-fec4b6a6442a",
                    "Lee Robinson",
                    "lee@robinson.com",
                    "lee-robinson",
                ),
                customer(
                    "76d65c26-f784-44a2-ac19-586678f7c2f2",
                    "Michael Novotny",
                    "michael@novotny.com",
                    "michael-novotny",
                ),
            ],
            users: vec![SeedUser {
                name: "User".to_string(),
                email: "user@nextmail.com".to_string(),
                password: "123456".to_string(),
            }],
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides from the process environment
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("INVOICES_ADDR") {
            self.server.addr = addr;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
        self
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> AppResult<()> {
        if self.server.addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.addr".to_string(),
                value: self.server.addr.clone(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if let Some(user) = self.seed.users.iter().find(|u| u.password.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "seed.users.password".to_string(),
                value: user.email.clone(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
