//! Axum extractor for submitted forms
//!
//! Browsers post `application/x-www-form-urlencoded`; scripted clients tend to
//! send JSON. Both decode into the same flat [`FormData`] so actions never see
//! the transport.

use crate::core::error::{AppError, ValidationError};
use crate::core::form::FormData;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Extracted form fields
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<AppState>,
///     FormPayload(form): FormPayload,
/// ) -> Response {
///     state.invoices.create(&ActionState::default(), &form).await.into_response()
/// }
/// ```
pub struct FormPayload(pub FormData);

impl FormPayload {
    pub fn into_inner(self) -> FormData {
        self.0
    }
}

impl std::ops::Deref for FormPayload {
    type Target = FormData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(payload): Json<Value> = Json::from_request(req, state)
                .await
                .map_err(|e| invalid_form(e.to_string()))?;
            return json_to_form(payload).map(FormPayload).map_err(invalid_form);
        }

        let Form(form): Form<FormData> = Form::from_request(req, state)
            .await
            .map_err(|e| invalid_form(e.to_string()))?;
        Ok(FormPayload(form))
    }
}

fn invalid_form(message: String) -> Response {
    AppError::from(ValidationError::InvalidForm { message }).into_response()
}

/// Flatten a JSON object into text fields; numbers and booleans are stringified
fn json_to_form(payload: Value) -> Result<FormData, String> {
    let Value::Object(map) = payload else {
        return Err("expected a JSON object".to_string());
    };

    let mut form = FormData::new();
    for (field, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => form.insert(field, s),
            Value::Number(n) => form.insert(field, n.to_string()),
            Value::Bool(b) => form.insert(field, b.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(format!("field '{}' must be a scalar", field));
            }
        }
    }
    Ok(form)
}
