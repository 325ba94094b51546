//! HTTP handlers exposing the actions and the invoice read model
//!
//! - GET  /dashboard/invoices              - search + paginate invoices
//! - GET  /dashboard/invoices/{id}         - one invoice (edit form prefill)
//! - GET  /dashboard/customers             - customers for the form select
//! - POST /dashboard/invoices              - create action
//! - POST /dashboard/invoices/{id}         - update action
//! - POST /dashboard/invoices/{id}/delete  - delete action
//! - POST /login                           - authenticate action

use super::state::AppState;
use crate::actions::INVOICES_PATH;
use crate::core::error::{AppError, AppResult, RequestError};
use crate::core::invoice::{Customer, Invoice, InvoiceRow};
use crate::core::state::{ActionOutcome, ActionState};
use crate::core::validation::FormPayload;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

/// Build the dashboard routes
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/dashboard/invoices", get(list_invoices).post(create_invoice))
        .route("/dashboard/invoices/{id}", get(get_invoice).post(update_invoice))
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .route("/dashboard/customers", get(list_customers))
        .route("/login", post(login))
        .with_state(state)
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
            ActionOutcome::State(state) => state.into_response(),
        }
    }
}

impl IntoResponse for ActionState {
    fn into_response(self) -> Response {
        let status = if self.has_errors() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::OK
        };
        (status, Json(self)).into_response()
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-actions"
    }))
}

/// Query string of the invoice list
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
}

/// Response for the invoice list endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct InvoicePage {
    pub invoices: Vec<InvoiceRow>,
    pub page: u32,
    pub total_pages: u32,
}

/// GET /dashboard/invoices?query=&page=
///
/// Tagged with the list path's revalidation generation, so a client holding
/// the current ETag gets `304 Not Modified` until an action invalidates it.
async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let page = params.page.unwrap_or(1).max(1);
    let etag = list_etag(
        &state.etag_epoch,
        state.revalidation.generation(INVOICES_PATH),
        page,
        &params.query,
    );
    let etag_value =
        HeaderValue::from_str(&etag).map_err(|e| AppError::Internal(e.to_string()))?;

    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .is_some_and(|value| value == &etag_value);

    if not_modified {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        response.headers_mut().insert(header::ETAG, etag_value);
        return Ok(response);
    }

    let invoices = state.invoice_store.search(&params.query, page).await?;
    let total_pages = state.invoice_store.count_pages(&params.query).await?;

    let mut response = Json(InvoicePage {
        invoices,
        page,
        total_pages,
    })
    .into_response();
    response.headers_mut().insert(header::ETAG, etag_value);
    Ok(response)
}

/// Weak ETag for one list page
///
/// The search text is digested so any input yields a valid header value.
pub fn list_etag(epoch: &str, generation: u64, page: u32, query: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(query.as_bytes()));
    format!("W/\"{}-{}-{}-{}\"", epoch, generation, page, &digest[..16])
}

/// GET /dashboard/invoices/{id}
async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Invoice>> {
    match state.invoice_store.get(&id).await? {
        Some(invoice) => Ok(Json(invoice)),
        None => Err(RequestError::NotFound {
            resource: "invoice".to_string(),
            id,
        }
        .into()),
    }
}

/// GET /dashboard/customers
async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    Ok(Json(state.customers.list().await?))
}

/// POST /dashboard/invoices
async fn create_invoice(
    State(state): State<AppState>,
    FormPayload(form): FormPayload,
) -> ActionOutcome {
    state.invoices.create(&ActionState::default(), &form).await
}

/// POST /dashboard/invoices/{id}
async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormPayload(form): FormPayload,
) -> ActionOutcome {
    state.invoices.update(&id, &form).await
}

/// POST /dashboard/invoices/{id}/delete
async fn delete_invoice(State(state): State<AppState>, Path(id): Path<String>) -> ActionState {
    state.invoices.delete(&id).await
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    FormPayload(form): FormPayload,
) -> Result<ActionOutcome, AppError> {
    Ok(state
        .authenticate
        .authenticate(&ActionState::default(), &form)
        .await?)
}
