//! Values returned by actions to the calling UI layer

use crate::core::error::FieldErrors;
use serde::{Deserialize, Serialize};

/// Transient form state: per-field errors and/or a status message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionState {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    /// Messages recorded for one field (empty if none)
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}

/// What an action resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Stay on the page and render this state
    State(ActionState),

    /// Navigate the browser to this path
    Redirect(String),
}

impl ActionOutcome {
    pub fn redirect(path: impl Into<String>) -> Self {
        ActionOutcome::Redirect(path.into())
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect(path) => Some(path),
            ActionOutcome::State(_) => None,
        }
    }

    pub fn state(&self) -> Option<&ActionState> {
        match self {
            ActionOutcome::State(state) => Some(state),
            ActionOutcome::Redirect(_) => None,
        }
    }

    /// Shortcut for the state's message
    pub fn message(&self) -> Option<&str> {
        self.state().and_then(|state| state.message.as_deref())
    }
}

impl From<ActionState> for ActionOutcome {
    fn from(state: ActionState) -> Self {
        ActionOutcome::State(state)
    }
}
