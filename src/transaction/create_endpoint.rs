//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{AppState, Error, endpoints};

use super::{
    ledger_page::{LedgerQuery, current_local_date},
    model::{TransactionDraft, TransactionKind},
    store::TransactionStore,
    view::filter_query_string,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The value of the transaction in dollars, as typed by the user.
    ///
    /// Kept as a string so a value that does not parse can be echoed back in
    /// the validation message.
    pub amount: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The date when the transaction occurred. Defaults to today when absent.
    #[serde(default)]
    pub date: Option<Date>,
}

/// A route handler for creating a new transaction.
///
/// Redirects back to the ledger view for the month in `query` on success so
/// the new transaction shows up in the table. Validation and storage problems
/// are reported as alerts, leaving the form as the user filled it in.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Query(query): Query<LedgerQuery>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => {
            tracing::error!("Invalid timezone {}", state.local_timezone);
            return error.into_alert_response();
        }
    };

    let amount = match form.amount.trim().parse::<f64>() {
        Ok(amount) => amount,
        Err(_) => return Error::InvalidAmount(form.amount).into_alert_response(),
    };

    let description = match form.description.trim() {
        "" => None,
        description => Some(description.to_owned()),
    };

    let draft = TransactionDraft {
        kind: form.kind,
        amount,
        description,
        date: form.date.unwrap_or(today),
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLock.into_alert_response();
        }
    };

    if let Err(error) = ledger.add(draft) {
        return error.into_alert_response();
    }

    let redirect_url = format!(
        "{}?{}",
        endpoints::LEDGER_VIEW,
        filter_query_string(query.resolve(today))
    );

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod create_transaction_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use tempfile::{TempDir, tempdir};
    use time::macros::date;

    use crate::{
        storage::StorageSlot,
        test_utils::{assert_hx_redirect, parse_html_fragment},
        transaction::{TransactionKind, TransactionStore, ledger_page::LedgerQuery},
    };

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn get_test_state() -> (CreateTransactionState, TempDir) {
        let data_dir = tempdir().unwrap();
        let slot = StorageSlot::new(data_dir.path().join("ledger.json"));
        let store = TransactionStore::load(slot);

        let state = CreateTransactionState {
            ledger: Arc::new(Mutex::new(store)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        (state, data_dir)
    }

    fn march_2024_query() -> Query<LedgerQuery> {
        Query(LedgerQuery {
            year: Some(2024),
            month: Some(3),
        })
    }

    fn expense_form(amount: &str) -> TransactionForm {
        TransactionForm {
            kind: TransactionKind::Expense,
            amount: amount.to_owned(),
            description: "test transaction".to_owned(),
            date: Some(date!(2024 - 03 - 15)),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, _data_dir) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            march_2024_query(),
            Form(expense_form("12.30")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/?year=2024&month=3");

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.all().len(), 1);
        assert_eq!(ledger.all()[0].amount, 12.3);
        assert_eq!(
            ledger.all()[0].description,
            Some("test transaction".to_owned())
        );
    }

    #[tokio::test]
    async fn blank_description_is_stored_as_none() {
        let (state, _data_dir) = get_test_state();

        let form = TransactionForm {
            description: "   ".to_owned(),
            ..expense_form("5")
        };
        create_transaction_endpoint(State(state.clone()), march_2024_query(), Form(form))
            .await
            .into_response();

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.all()[0].description, None);
    }

    #[tokio::test]
    async fn missing_date_defaults_to_today() {
        let (state, _data_dir) = get_test_state();

        let form = TransactionForm {
            date: None,
            ..expense_form("5")
        };
        create_transaction_endpoint(State(state.clone()), march_2024_query(), Form(form))
            .await
            .into_response();

        let ledger = state.ledger.lock().unwrap();
        let today = time::OffsetDateTime::now_utc().date();
        assert_eq!(ledger.all()[0].date, today);
    }

    #[tokio::test]
    async fn unparseable_amount_is_rejected_with_an_alert() {
        let (state, _data_dir) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            march_2024_query(),
            Form(expense_form("12..3")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Invalid amount"), "got alert {text:?}");
        assert!(text.contains("12..3"), "got alert {text:?}");

        let ledger = state.ledger.lock().unwrap();
        assert!(ledger.all().is_empty());
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected_with_an_alert() {
        let (state, _data_dir) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            march_2024_query(),
            Form(expense_form("-5")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let ledger = state.ledger.lock().unwrap();
        assert!(ledger.all().is_empty());
    }

    #[tokio::test]
    async fn failed_ledger_write_warns_but_keeps_the_transaction() {
        let data_dir = tempdir().unwrap();
        let slot = StorageSlot::new(data_dir.path().join("missing").join("ledger.json"));
        let state = CreateTransactionState {
            ledger: Arc::new(Mutex::new(TransactionStore::load(slot))),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = create_transaction_endpoint(
            State(state.clone()),
            march_2024_query(),
            Form(expense_form("5")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("Changes may not be saved"),
            "got alert {text:?}"
        );

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.all().len(), 1);
    }
}
