//! Email/password authenticator backed by a [`UserStore`]

use super::password::verify_password;
use crate::core::auth::{AuthError, Authenticator, CREDENTIALS_STRATEGY};
use crate::core::form::FormData;
use crate::core::service::UserStore;
use crate::core::validation::filters::{lowercase, trim};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

/// Where a successful sign-in lands unless the form says otherwise
pub const DEFAULT_SIGN_IN_REDIRECT: &str = "/dashboard";

/// Shape of the login form
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl Credentials {
    /// Read and validate credentials from the login form
    pub fn from_form(form: &FormData) -> Option<Self> {
        let email = lowercase()(trim()(form.get("email")).as_deref())?;
        let password = form.get("password")?.to_string();
        let credentials = Self { email, password };
        credentials.validate().ok()?;
        Some(credentials)
    }
}

/// Verifies credentials against stored argon2 hashes
pub struct CredentialsAuthenticator {
    users: Arc<dyn UserStore>,
}

impl CredentialsAuthenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    async fn authorize(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| AuthError::CallbackRoute(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::CredentialsSignin)?;

        let matches = verify_password(&credentials.password, &user.password_hash)
            .map_err(|e| AuthError::CallbackRoute(e.to_string()))?;
        if !matches {
            return Err(AuthError::CredentialsSignin);
        }

        tracing::info!(user_id = %user.id, "User signed in");
        Ok(())
    }
}

#[async_trait]
impl Authenticator for CredentialsAuthenticator {
    async fn sign_in(&self, strategy: &str, form: &FormData) -> Result<String> {
        if strategy != CREDENTIALS_STRATEGY {
            return Err(AuthError::Configuration(format!(
                "unsupported sign-in strategy '{}'",
                strategy
            ))
            .into());
        }

        let credentials = Credentials::from_form(form).ok_or(AuthError::CredentialsSignin)?;
        self.authorize(&credentials).await?;

        Ok(form
            .get("redirectTo")
            .filter(|target| target.starts_with('/') && !target.starts_with("//"))
            .unwrap_or(DEFAULT_SIGN_IN_REDIRECT)
            .to_string())
    }
}
