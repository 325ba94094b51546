//! Integration tests for the invoice and sign-in actions
//!
//! The actions are driven with hand-written collaborators that record every
//! call, so each test can assert exactly what reached the store and the cache.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use invoice_actions::actions::authenticate::{INVALID_CREDENTIALS, SOMETHING_WENT_WRONG};
use invoice_actions::actions::invoices::{
    CREATE_DB_ERROR, CREATE_MISSING_FIELDS, DELETE_DB_ERROR, DELETED_MESSAGE, UPDATE_DB_ERROR,
    UPDATE_MISSING_FIELDS,
};
use invoice_actions::actions::{AuthenticateAction, DASHBOARD_PATH, INVOICES_PATH, InvoiceActions};
use invoice_actions::core::auth::{AuthError, Authenticator, CREDENTIALS_STRATEGY};
use invoice_actions::core::cache::CacheInvalidator;
use invoice_actions::core::clock::FixedClock;
use invoice_actions::core::form::FormData;
use invoice_actions::core::invoice::{
    Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, NewInvoice,
};
use invoice_actions::core::service::InvoiceStore;
use invoice_actions::core::state::{ActionOutcome, ActionState};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Recording collaborators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum StoreCall {
    Insert(NewInvoice),
    Update(String, InvoiceChanges),
    Delete(String),
}

/// Invoice store that records writes and can be told to fail
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<StoreCall>>,
    fail: bool,
}

impl RecordingStore {
    fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(anyhow!("connection reset by peer"));
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for RecordingStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice> {
        self.record(StoreCall::Insert(invoice.clone()))?;
        Ok(Invoice {
            id: "inv-1".to_string(),
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        })
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64> {
        self.record(StoreCall::Update(id.to_string(), changes))?;
        Ok(1)
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.record(StoreCall::Delete(id.to_string()))?;
        Ok(1)
    }

    async fn get(&self, _id: &str) -> Result<Option<Invoice>> {
        Ok(None)
    }

    async fn search(&self, _query: &str, _page: u32) -> Result<Vec<InvoiceRow>> {
        Ok(Vec::new())
    }

    async fn count_pages(&self, _query: &str) -> Result<u32> {
        Ok(0)
    }
}

#[derive(Default)]
struct RecordingCache {
    paths: Mutex<Vec<String>>,
}

impl RecordingCache {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheInvalidator for RecordingCache {
    async fn revalidate_path(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

struct Harness {
    store: Arc<RecordingStore>,
    cache: Arc<RecordingCache>,
    actions: InvoiceActions,
}

fn harness_with(store: RecordingStore) -> Harness {
    let store = Arc::new(store);
    let cache = Arc::new(RecordingCache::default());
    let actions = InvoiceActions::new(store.clone(), cache.clone(), Arc::new(FixedClock(today())));
    Harness {
        store,
        cache,
        actions,
    }
}

fn harness() -> Harness {
    harness_with(RecordingStore::default())
}

fn invoice_form(customer_id: &str, amount: &str, status: &str) -> FormData {
    FormData::new()
        .with("customerId", customer_id)
        .with("amount", amount)
        .with("status", status)
}

fn expect_state(outcome: ActionOutcome) -> ActionState {
    match outcome {
        ActionOutcome::State(state) => state,
        ActionOutcome::Redirect(path) => panic!("expected a state, got redirect to {}", path),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_persists_cents_and_today_then_redirects() {
    let h = harness();

    let outcome = h
        .actions
        .create(&ActionState::default(), &invoice_form("c1", "12.50", "paid"))
        .await;

    assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));
    assert_eq!(
        h.store.calls(),
        vec![StoreCall::Insert(NewInvoice {
            customer_id: "c1".to_string(),
            amount: 1250,
            status: InvoiceStatus::Paid,
            date: today(),
        })]
    );
    assert_eq!(h.cache.paths(), vec![INVOICES_PATH, DASHBOARD_PATH]);
}

#[tokio::test]
async fn test_create_whole_amount_is_multiplied_by_100() {
    let h = harness();

    h.actions
        .create(&ActionState::default(), &invoice_form("c1", "42", "pending"))
        .await;

    match h.store.calls().as_slice() {
        [StoreCall::Insert(invoice)] => {
            assert_eq!(invoice.amount, 4200);
            assert_eq!(invoice.status, InvoiceStatus::Pending);
        }
        other => panic!("unexpected store calls: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_rejects_non_positive_amount() {
    for amount in ["0", "-5", ""] {
        let h = harness();

        let state = expect_state(
            h.actions
                .create(&ActionState::default(), &invoice_form("c1", amount, "paid"))
                .await,
        );

        assert!(!state.field_errors("amount").is_empty(), "amount {:?}", amount);
        assert_eq!(state.message.as_deref(), Some(CREATE_MISSING_FIELDS));
        assert!(h.store.calls().is_empty());
        assert!(h.cache.paths().is_empty());
    }
}

#[tokio::test]
async fn test_create_rejects_amount_that_rounds_to_zero_cents() {
    let h = harness();

    let state = expect_state(
        h.actions
            .create(&ActionState::default(), &invoice_form("c1", "0.004", "paid"))
            .await,
    );

    assert!(!state.field_errors("amount").is_empty());
    assert_eq!(state.message.as_deref(), Some(CREATE_MISSING_FIELDS));
    assert!(h.store.calls().is_empty());
    assert!(h.cache.paths().is_empty());
}

#[tokio::test]
async fn test_create_rejects_amount_beyond_cent_range() {
    let h = harness();

    let state = expect_state(
        h.actions
            .create(&ActionState::default(), &invoice_form("c1", "1e300", "paid"))
            .await,
    );

    assert!(!state.field_errors("amount").is_empty());
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_update_rejects_sub_cent_amount() {
    let h = harness();

    let state = expect_state(
        h.actions
            .update("inv-7", &invoice_form("c1", "0.001", "paid"))
            .await,
    );

    assert!(!state.field_errors("amount").is_empty());
    assert_eq!(state.message.as_deref(), Some(UPDATE_MISSING_FIELDS));
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_customer() {
    let h = harness();
    let form = FormData::new().with("amount", "10").with("status", "paid");

    let state = expect_state(h.actions.create(&ActionState::default(), &form).await);

    assert!(!state.field_errors("customerId").is_empty());
    assert!(state.field_errors("amount").is_empty());
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let h = harness();

    let state = expect_state(
        h.actions
            .create(&ActionState::default(), &FormData::new())
            .await,
    );

    assert!(!state.field_errors("customerId").is_empty());
    assert!(!state.field_errors("amount").is_empty());
    assert!(!state.field_errors("status").is_empty());
}

#[tokio::test]
async fn test_create_rejects_unknown_status() {
    let h = harness();

    let state = expect_state(
        h.actions
            .create(&ActionState::default(), &invoice_form("c1", "10", "overdue"))
            .await,
    );

    assert!(!state.field_errors("status").is_empty());
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_create_store_failure_returns_database_message() {
    let h = harness_with(RecordingStore::failing());

    let state = expect_state(
        h.actions
            .create(&ActionState::default(), &invoice_form("c1", "10", "paid"))
            .await,
    );

    assert_eq!(state, ActionState::message(CREATE_DB_ERROR));
    assert_eq!(h.store.calls().len(), 1);
    assert!(h.cache.paths().is_empty());
}

#[tokio::test]
async fn test_create_ignores_previous_state() {
    let h = harness();
    let prev = ActionState::message("stale message");

    let outcome = h
        .actions
        .create(&prev, &invoice_form("c1", "10", "paid"))
        .await;

    assert_eq!(outcome.redirect_target(), Some(INVOICES_PATH));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_persists_changes_then_redirects() {
    let h = harness();

    let outcome = h
        .actions
        .update("inv-7", &invoice_form("c2", "99.99", "pending"))
        .await;

    assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));
    assert_eq!(
        h.store.calls(),
        vec![StoreCall::Update(
            "inv-7".to_string(),
            InvoiceChanges {
                customer_id: "c2".to_string(),
                amount: 9999,
                status: InvoiceStatus::Pending,
            }
        )]
    );
    assert_eq!(h.cache.paths(), vec![INVOICES_PATH]);
}

#[tokio::test]
async fn test_update_invalid_form_returns_state() {
    let h = harness();

    let state = expect_state(
        h.actions
            .update("inv-7", &invoice_form("", "abc", "paid"))
            .await,
    );

    assert_eq!(state.message.as_deref(), Some(UPDATE_MISSING_FIELDS));
    assert!(!state.field_errors("customerId").is_empty());
    assert!(!state.field_errors("amount").is_empty());
    assert!(h.store.calls().is_empty());
}

#[tokio::test]
async fn test_update_store_failure_returns_database_message() {
    let h = harness_with(RecordingStore::failing());

    let state = expect_state(
        h.actions
            .update("inv-7", &invoice_form("c1", "10", "paid"))
            .await,
    );

    assert_eq!(state, ActionState::message(UPDATE_DB_ERROR));
    assert!(h.cache.paths().is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_removes_and_revalidates() {
    let h = harness();

    let state = h.actions.delete("inv-3").await;

    assert_eq!(state, ActionState::message(DELETED_MESSAGE));
    assert_eq!(h.store.calls(), vec![StoreCall::Delete("inv-3".to_string())]);
    assert_eq!(h.cache.paths(), vec![INVOICES_PATH]);
}

#[tokio::test]
async fn test_delete_store_failure_stops_there() {
    let h = harness_with(RecordingStore::failing());

    let state = h.actions.delete("inv-3").await;

    assert_eq!(state, ActionState::message(DELETE_DB_ERROR));
    assert_eq!(h.store.calls().len(), 1);
    assert!(h.cache.paths().is_empty());
}

// ---------------------------------------------------------------------------
// Authenticate
// ---------------------------------------------------------------------------

/// Fault that is not part of the sign-in taxonomy
#[derive(Debug, thiserror::Error)]
#[error("network unreachable")]
struct NetworkDown;

enum SignInResult {
    Redirect(&'static str),
    Auth(AuthError),
    Foreign,
}

struct ScriptedAuthenticator {
    result: SignInResult,
    strategies: Mutex<Vec<String>>,
}

impl ScriptedAuthenticator {
    fn new(result: SignInResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            strategies: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Authenticator for ScriptedAuthenticator {
    async fn sign_in(&self, strategy: &str, _form: &FormData) -> Result<String> {
        self.strategies.lock().unwrap().push(strategy.to_string());
        match &self.result {
            SignInResult::Redirect(path) => Ok(path.to_string()),
            SignInResult::Auth(err) => Err(err.clone().into()),
            SignInResult::Foreign => Err(NetworkDown.into()),
        }
    }
}

fn login_form() -> FormData {
    FormData::new()
        .with("email", "user@nextmail.com")
        .with("password", "123456")
}

#[tokio::test]
async fn test_authenticate_success_redirects() {
    let authenticator = ScriptedAuthenticator::new(SignInResult::Redirect("/dashboard"));
    let action = AuthenticateAction::new(authenticator.clone());

    let outcome = action
        .authenticate(&ActionState::default(), &login_form())
        .await
        .unwrap();

    assert_eq!(outcome.redirect_target(), Some("/dashboard"));
    assert_eq!(
        *authenticator.strategies.lock().unwrap(),
        vec![CREDENTIALS_STRATEGY.to_string()]
    );
}

#[tokio::test]
async fn test_authenticate_invalid_credentials_message() {
    let action = AuthenticateAction::new(ScriptedAuthenticator::new(SignInResult::Auth(
        AuthError::CredentialsSignin,
    )));

    let outcome = action
        .authenticate(&ActionState::default(), &login_form())
        .await
        .unwrap();

    assert_eq!(outcome.message(), Some(INVALID_CREDENTIALS));
}

#[tokio::test]
async fn test_authenticate_other_auth_errors_are_generic() {
    let errors = [
        AuthError::AccessDenied("blocked".to_string()),
        AuthError::CallbackRoute("store down".to_string()),
        AuthError::Configuration("missing secret".to_string()),
    ];

    for error in errors {
        let action = AuthenticateAction::new(ScriptedAuthenticator::new(SignInResult::Auth(error)));

        let outcome = action
            .authenticate(&ActionState::default(), &login_form())
            .await
            .unwrap();

        assert_eq!(outcome.message(), Some(SOMETHING_WENT_WRONG));
    }
}

#[tokio::test]
async fn test_authenticate_foreign_error_propagates_unchanged() {
    let action = AuthenticateAction::new(ScriptedAuthenticator::new(SignInResult::Foreign));

    let err = action
        .authenticate(&ActionState::default(), &login_form())
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<NetworkDown>().is_some());
    assert!(err.downcast_ref::<AuthError>().is_none());
}
