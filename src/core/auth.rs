//! Authentication seam
//!
//! Sign-in is delegated to an [`Authenticator`]. It either resolves to the path
//! the browser should land on, or fails. Failures that belong to the known
//! taxonomy are raised as [`AuthError`] inside the `anyhow::Error`; anything
//! else is a foreign fault and must be left alone by callers.

use crate::core::form::FormData;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Strategy name for email/password sign-in
pub const CREDENTIALS_STRATEGY: &str = "credentials";

/// Known authentication faults
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The submitted credentials were rejected
    #[error("CredentialsSignin: invalid credentials")]
    CredentialsSignin,

    /// The user is known but not allowed to sign in
    #[error("AccessDenied: {0}")]
    AccessDenied(String),

    /// The provider failed while authorizing the request
    #[error("CallbackRouteError: {0}")]
    CallbackRoute(String),

    /// The authenticator is misconfigured (unknown strategy, missing secret...)
    #[error("Configuration: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Subtype name, as reported to logs
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::CredentialsSignin => "CredentialsSignin",
            AuthError::AccessDenied(_) => "AccessDenied",
            AuthError::CallbackRoute(_) => "CallbackRouteError",
            AuthError::Configuration(_) => "Configuration",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::CredentialsSignin => "INVALID_CREDENTIALS",
            AuthError::AccessDenied(_) => "ACCESS_DENIED",
            AuthError::CallbackRoute(_) => "AUTH_CALLBACK_ERROR",
            AuthError::Configuration(_) => "AUTH_CONFIGURATION_ERROR",
        }
    }
}

/// Credential verification collaborator
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Sign in with the given strategy
    ///
    /// Returns the path to navigate to on success.
    async fn sign_in(&self, strategy: &str, form: &FormData) -> Result<String>;
}
