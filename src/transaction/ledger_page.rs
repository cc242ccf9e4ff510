//! Defines the route handler for the page that displays the monthly ledger.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::{Date, Month, OffsetDateTime};

use crate::{AppState, Error, endpoints, timezone::get_local_offset};

use super::{
    filter::{MonthFilter, filter_by_month, sort_by_date_descending, summarize},
    store::TransactionStore,
    view::{TransactionTableRow, filter_query_string, ledger_view},
};

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    /// The transaction ledger.
    pub ledger: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters selecting which month to display.
///
/// Both parts are optional, absent or unparseable parts fall back to the
/// current month.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LedgerQuery {
    /// The calendar year to display.
    pub year: Option<i32>,
    /// The calendar month to display, 1 (January) to 12 (December).
    pub month: Option<u8>,
}

impl LedgerQuery {
    pub(crate) fn resolve(self, today: Date) -> MonthFilter {
        let fallback = MonthFilter::for_date(today);

        MonthFilter {
            year: self.year.unwrap_or(fallback.year),
            month: self
                .month
                .and_then(|month| Month::try_from(month).ok())
                .unwrap_or(fallback.month),
        }
    }
}

/// The current date in the given timezone.
pub(crate) fn current_local_date(local_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(local_timezone)
        .ok_or_else(|| Error::InvalidTimezone(local_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

/// Render the ledger for the selected month: the add transaction form, the
/// month filter controls, the totals and the transaction table.
pub async fn get_ledger_page(
    State(state): State<LedgerPageState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let filter = query.resolve(today);

    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLock
    })?;

    let mut visible = filter_by_month(ledger.all(), filter);
    sort_by_date_descending(&mut visible);
    let summary = summarize(&visible);

    let query_string = filter_query_string(filter);
    let rows = visible
        .into_iter()
        .map(|transaction| TransactionTableRow {
            delete_url: format!(
                "{}?{query_string}",
                endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, &transaction.id)
            ),
            kind: transaction.kind,
            amount: transaction.amount,
            description: transaction.description,
            date: transaction.date,
        })
        .collect::<Vec<_>>();

    Ok(ledger_view(filter, today, &rows, summary).into_response())
}


#[cfg(test)]
mod ledger_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use scraper::Selector;
    use tempfile::{TempDir, tempdir};
    use time::macros::date;

    use crate::{
        storage::StorageSlot,
        test_utils::{assert_valid_html, parse_html_document},
        transaction::{TransactionDraft, TransactionKind, TransactionStore},
    };

    use super::{LedgerPageState, LedgerQuery, get_ledger_page};

    fn get_test_state() -> (LedgerPageState, TempDir) {
        let data_dir = tempdir().unwrap();
        let slot = StorageSlot::new(data_dir.path().join("ledger.json"));
        let store = TransactionStore::load(slot);

        let state = LedgerPageState {
            ledger: Arc::new(Mutex::new(store)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        (state, data_dir)
    }

    #[tokio::test]
    async fn displays_transactions_for_the_selected_month() {
        let (state, _data_dir) = get_test_state();
        {
            let mut ledger = state.ledger.lock().unwrap();
            ledger
                .add(TransactionDraft {
                    kind: TransactionKind::Income,
                    amount: 1000.0,
                    description: Some("Salary".to_owned()),
                    date: date!(2024 - 03 - 01),
                })
                .unwrap();
            ledger
                .add(TransactionDraft {
                    kind: TransactionKind::Expense,
                    amount: 300.0,
                    description: Some("Rent".to_owned()),
                    date: date!(2024 - 04 - 01),
                })
                .unwrap();
        }

        let query = LedgerQuery {
            year: Some(2024),
            month: Some(3),
        };
        let response = get_ledger_page(State(state), Query(query))
            .await
            .expect("expected the page to render");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse("tr[data-transaction-row]").unwrap();
        let rows = html
            .select(&row_selector)
            .map(|row| row.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(rows.len(), 1, "got rows {rows:?}");
        assert!(rows[0].contains("Salary"));
        assert!(!rows[0].contains("Rent"));
    }

    #[tokio::test]
    async fn newest_transactions_come_first() {
        let (state, _data_dir) = get_test_state();
        {
            let mut ledger = state.ledger.lock().unwrap();
            for (amount, date) in [
                (1.0, date!(2024 - 03 - 05)),
                (2.0, date!(2024 - 03 - 25)),
                (3.0, date!(2024 - 03 - 15)),
            ] {
                ledger
                    .add(TransactionDraft {
                        kind: TransactionKind::Expense,
                        amount,
                        description: None,
                        date,
                    })
                    .unwrap();
            }
        }

        let query = LedgerQuery {
            year: Some(2024),
            month: Some(3),
        };
        let response = get_ledger_page(State(state), Query(query))
            .await
            .expect("expected the page to render");

        let html = parse_html_document(response).await;
        let time_selector = Selector::parse("tr[data-transaction-row] time").unwrap();
        let dates = html
            .select(&time_selector)
            .filter_map(|time| time.attr("datetime"))
            .collect::<Vec<_>>();

        assert_eq!(dates, vec!["2024-03-25", "2024-03-15", "2024-03-05"]);
    }

    #[tokio::test]
    async fn totals_reflect_the_visible_month() {
        let (state, _data_dir) = get_test_state();
        {
            let mut ledger = state.ledger.lock().unwrap();
            for (kind, amount) in [
                (TransactionKind::Income, 1000.0),
                (TransactionKind::Income, 500.0),
                (TransactionKind::Expense, 300.0),
            ] {
                ledger
                    .add(TransactionDraft {
                        kind,
                        amount,
                        description: None,
                        date: date!(2024 - 03 - 10),
                    })
                    .unwrap();
            }
            // A different month must not count towards the totals.
            ledger
                .add(TransactionDraft {
                    kind: TransactionKind::Expense,
                    amount: 9999.0,
                    description: None,
                    date: date!(2024 - 02 - 10),
                })
                .unwrap();
        }

        let query = LedgerQuery {
            year: Some(2024),
            month: Some(3),
        };
        let response = get_ledger_page(State(state), Query(query))
            .await
            .expect("expected the page to render");

        let html = parse_html_document(response).await;
        let balance_selector = Selector::parse("dd[data-balance]").unwrap();
        let balance = html
            .select(&balance_selector)
            .next()
            .expect("expected a balance cell")
            .text()
            .collect::<String>();

        assert_eq!(balance.trim(), "$1,200.00");
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let (state, _data_dir) = get_test_state();
        let state = LedgerPageState {
            local_timezone: "Not/ATimezone".to_owned(),
            ..state
        };

        let result = get_ledger_page(State(state), Query(LedgerQuery::default())).await;

        assert!(matches!(
            result,
            Err(crate::Error::InvalidTimezone(timezone)) if timezone == "Not/ATimezone"
        ));
    }
}
