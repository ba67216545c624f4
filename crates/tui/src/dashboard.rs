use api_types::transaction::{Transaction, TransactionQuery, TransactionType};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use engine::{Currency, DashboardSummary, EngineError, EntryKind, Money, Record, summarize};

use crate::client::{Client, ClientError};

/// Size of the "recent transactions" page.
pub const RECENT_LIMIT: u32 = 5;

/// What the dashboard currently shows.
///
/// The recent list is replaced as soon as its page arrives; the summary only
/// after the full list was read and aggregated, so a failed refresh leaves
/// the previous numbers on screen.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub recent: Vec<Transaction>,
    pub summary: DashboardSummary,
    pub last_refresh: Option<DateTime<Tz>>,
}

impl DashboardState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            recent: Vec::new(),
            summary: DashboardSummary::empty(today),
            last_refresh: None,
        }
    }
}

pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

pub fn to_record(tx: &Transaction, currency: Currency) -> Result<Record, EngineError> {
    Ok(Record {
        kind: match tx.kind {
            TransactionType::Income => EntryKind::Income,
            TransactionType::Expense => EntryKind::Expense,
        },
        amount: Money::parse(tx.amount.as_str(), currency)?,
        category: tx.category_name().to_string(),
        date: tx.date,
    })
}

pub async fn fetch_recent(client: &Client) -> Result<Vec<Transaction>, ClientError> {
    let page = client
        .transactions_list(&TransactionQuery {
            limit: Some(RECENT_LIMIT),
        })
        .await?;
    Ok(page.results)
}

/// Reads the full list and aggregates it.
///
/// Any transaction that cannot be converted aborts the whole aggregation.
pub async fn fetch_summary(
    client: &Client,
    today: NaiveDate,
    currency: Currency,
) -> Result<DashboardSummary, ClientError> {
    let all = client
        .transactions_list(&TransactionQuery::default())
        .await?
        .results;

    let records = all
        .iter()
        .map(|tx| {
            to_record(tx, currency)
                .map_err(|err| ClientError::Decode(format!("transaction {}: {err}", tx.id)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(total = records.len(), "transactions aggregated");
    Ok(summarize(&records, today))
}

/// Loads into `state`: the recent page first, then the full list.
///
/// The full list is only requested once the recent page has been committed.
/// If it fails, `summary` and `last_refresh` keep their previous values.
pub async fn refresh(
    state: &mut DashboardState,
    client: &Client,
    tz: Tz,
    currency: Currency,
) -> Result<(), ClientError> {
    state.recent = fetch_recent(client).await?;
    tracing::debug!(recent = state.recent.len(), "recent transactions loaded");

    state.summary = fetch_summary(client, today_in(tz), currency).await?;
    state.last_refresh = Some(Utc::now().with_timezone(&tz));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use axum::{
        Json, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::get,
    };
    use chrono::Datelike;
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        local_state::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore},
        test_support::spawn_stub,
    };

    type Calls = Arc<Mutex<Vec<Option<String>>>>;

    fn tx(id: u32, amount: &str, kind: &str, category: &str, date: NaiveDate) -> Value {
        json!({
            "id": id,
            "title": format!("tx {id}"),
            "amount": amount,
            "type": kind,
            "category": {"name": category},
            "date": date.format("%Y-%m-%d").to_string(),
        })
    }

    fn stub(full: Value, fail_full: bool) -> (Router, Calls) {
        let calls: Calls = Arc::default();
        let router = Router::new()
            .route(
                "/transactions/",
                get(
                    move |State(calls): State<Calls>,
                          Query(query): Query<HashMap<String, String>>| {
                        let full = full.clone();
                        async move {
                            let limit = query.get("limit").cloned();
                            calls.lock().unwrap().push(limit.clone());
                            match limit {
                                Some(_) => (
                                    StatusCode::OK,
                                    Json(json!({"results": [full["results"][0].clone()]})),
                                ),
                                None if fail_full => (
                                    StatusCode::INTERNAL_SERVER_ERROR,
                                    Json(json!({"detail": "boom"})),
                                ),
                                None => (StatusCode::OK, Json(full)),
                            }
                        }
                    },
                ),
            )
            .with_state(calls.clone());
        (router, calls)
    }

    async fn client_for(router: Router) -> Client {
        let base = spawn_stub(router).await;
        let store = Arc::new(MemoryStore::default());
        store.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        Client::new(&base, store).unwrap()
    }

    #[tokio::test]
    async fn refresh_reads_recent_then_full_and_aggregates() {
        let today = today_in(chrono_tz::UTC);
        let full = json!({"results": [
            tx(1, "100.00", "income", "Job", today),
            tx(2, "40", "expense", "Food", today),
        ]});
        let (router, calls) = stub(full, false);
        let client = client_for(router).await;

        let mut state = DashboardState::new(today);
        refresh(&mut state, &client, chrono_tz::UTC, Currency::Usd)
            .await
            .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![Some(RECENT_LIMIT.to_string()), None]
        );
        assert_eq!(state.recent.len(), 1);
        let m = state.summary.metrics;
        assert_eq!(m.total_income, Money::new(100_00));
        assert_eq!(m.total_expense, Money::new(40_00));
        assert_eq!(m.current_balance, Money::new(60_00));
        assert_eq!(state.summary.categories.get("Food"), Some(Money::new(40_00)));
        assert_eq!(
            state.summary.trend.buckets().last().map(|b| b.month.month),
            Some(today.month())
        );
    }

    #[tokio::test]
    async fn failed_full_read_keeps_recent_page_and_previous_summary() {
        let today = today_in(chrono_tz::UTC);
        let full = json!({"results": [tx(1, "10", "expense", "Food", today)]});
        let (router, calls) = stub(full, true);
        let client = client_for(router).await;

        let mut state = DashboardState::new(today);
        let before = state.summary.clone();
        let err = refresh(&mut state, &client, chrono_tz::UTC, Currency::Usd)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Server { status: 500, .. }));
        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(state.recent.len(), 1);
        assert_eq!(state.recent[0].id.to_string(), "1");
        assert_eq!(state.summary, before);
        assert!(state.last_refresh.is_none());
    }

    #[tokio::test]
    async fn malformed_amount_aborts_the_load() {
        let today = today_in(chrono_tz::UTC);
        let full = json!({"results": [tx(7, "12.345", "expense", "Food", today)]});
        let (router, _) = stub(full, false);
        let client = client_for(router).await;

        let err = fetch_summary(&client, today, Currency::Usd)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn refresh_replaces_state_on_success() {
        let today = today_in(chrono_tz::UTC);
        let full = json!({"results": [tx(1, "5.50", "income", "Gift", today)]});
        let (router, _) = stub(full, false);
        let client = client_for(router).await;

        let mut state = DashboardState::new(today);
        refresh(&mut state, &client, chrono_tz::UTC, Currency::Usd)
            .await
            .unwrap();
        assert_eq!(state.recent.len(), 1);
        assert_eq!(state.summary.metrics.total_income, Money::new(5_50));
        assert!(state.last_refresh.is_some());
    }

    #[test]
    fn uncategorized_expense_maps_to_placeholder_name() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 3, "amount": 2, "type": "expense", "category": null, "date": "2026-01-05"
        }))
        .unwrap();
        let record = to_record(&tx, Currency::Usd).unwrap();
        assert_eq!(record.category, api_types::transaction::UNCATEGORIZED);
        assert_eq!(record.amount, Money::new(2_00));
        assert_eq!(record.kind, EntryKind::Expense);
    }
}
