//! Sign-in action
//!
//! Only the [`AuthError`] taxonomy is translated into form messages. Every
//! other fault is handed back to the caller untouched.

use crate::core::auth::{AuthError, Authenticator, CREDENTIALS_STRATEGY};
use crate::core::form::FormData;
use crate::core::state::{ActionOutcome, ActionState};
use anyhow::Result;
use std::sync::Arc;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";

#[derive(Clone)]
pub struct AuthenticateAction {
    authenticator: Arc<dyn Authenticator>,
}

impl AuthenticateAction {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Sign in with email and password
    pub async fn authenticate(&self, _prev: &ActionState, form: &FormData) -> Result<ActionOutcome> {
        let err = match self.authenticator.sign_in(CREDENTIALS_STRATEGY, form).await {
            Ok(target) => return Ok(ActionOutcome::Redirect(target)),
            Err(err) => err,
        };

        match err.downcast::<AuthError>() {
            Ok(AuthError::CredentialsSignin) => {
                tracing::info!("Sign-in rejected: invalid credentials");
                Ok(ActionState::message(INVALID_CREDENTIALS).into())
            }
            Ok(other) => {
                tracing::warn!(kind = other.kind(), error = %other, "Sign-in failed");
                Ok(ActionState::message(SOMETHING_WENT_WRONG).into())
            }
            Err(foreign) => Err(foreign),
        }
    }
}
