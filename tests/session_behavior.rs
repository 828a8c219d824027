//! Behavior tests for the dashboard session
//!
//! These tests follow a user through fetches and window changes and check
//! what the dashboard shows after each action.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tickview_core::{
    AnalysisError, HistoryRequest, Notice, Presentation, PriceRow, PriceSource, PriceTable,
    ProviderId, Session, SessionState, SourceError, TradingDate,
};

/// Price source that replays scripted answers and counts calls.
struct ScriptedSource {
    answers: Mutex<Vec<Result<Vec<f64>, SourceError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(answers: Vec<Result<Vec<f64>, SourceError>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into_iter().rev().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceSource for ScriptedSource {
    fn id(&self) -> ProviderId {
        ProviderId::Synthetic
    }

    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .answers
            .lock()
            .expect("answers lock is not poisoned")
            .pop()
            .unwrap_or_else(|| Err(SourceError::internal("no scripted answer left")));

        Box::pin(async move {
            let closes = answer?;
            let mut date = req.range.start();
            let mut rows = Vec::with_capacity(closes.len());
            for close in closes {
                rows.push(PriceRow::close_only(date, close)?);
                date = date.next_day().expect("next day exists");
            }
            Ok(PriceTable::new(req.symbol, rows)?)
        })
    }
}

fn ramp(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64 * 10.0).collect()
}

// =============================================================================
// Fetch step
// =============================================================================

#[tokio::test]
async fn successful_fetch_stores_table_and_reports_row_count() {
    // Given: a fresh session with default inputs
    let source = ScriptedSource::new(vec![Ok(ramp(30))]);
    let mut session = Session::new(source.clone());

    // When: the user presses fetch
    let notice = session.fetch().await;

    // Then: a success message names the ticker and row count
    assert_eq!(
        notice,
        Notice::Success(String::from(
            "Data fetched successfully for AAPL with 30 rows."
        ))
    );

    // And: the session holds the data under the fetched ticker
    let SessionState::HasData { ticker, table } = session.state() else {
        panic!("expected data");
    };
    assert_eq!(ticker.as_str(), "AAPL");
    assert_eq!(table.len(), 30);
    assert_eq!(table.first_date(), Some(TradingDate::parse("2020-01-01").expect("date")));
}

#[tokio::test]
async fn empty_result_resets_to_no_data_with_error() {
    // Given: a session that already holds data
    let source = ScriptedSource::new(vec![Ok(ramp(10)), Ok(Vec::new())]);
    let mut session = Session::new(source);
    session.fetch().await;
    assert!(session.has_data());

    // When: the next fetch comes back empty
    let notice = session.fetch().await;

    // Then: the user sees the no-data error and the dashboard is cleared
    assert_eq!(
        notice,
        Notice::Error(String::from(
            "No data found. Please check the ticker symbol and date range."
        ))
    );
    assert_eq!(session.state(), &SessionState::NoData);
    assert_eq!(session.present(), Presentation::NoData);
}

#[tokio::test]
async fn source_failure_resets_state_and_is_not_retried() {
    // Given: a session with data and a source that will fail once
    let source = ScriptedSource::new(vec![
        Ok(ramp(10)),
        Err(SourceError::unavailable("upstream down")),
    ]);
    let mut session = Session::new(source.clone());
    session.fetch().await;

    // When: the failing fetch runs
    let notice = session.fetch().await;

    // Then: the error is surfaced, data is cleared, and only one attempt was made
    assert_eq!(
        notice,
        Notice::Error(String::from("Error fetching data: upstream down"))
    );
    assert!(!session.has_data());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn invalid_ticker_fails_without_calling_the_source() {
    // Given: a ticker that cannot be a symbol
    let source = ScriptedSource::new(vec![]);
    let mut session = Session::new(source.clone());
    session.inputs_mut().ticker = String::from("   ");

    // When: the user fetches
    let notice = session.fetch().await;

    // Then: the fetch fails up front
    assert!(notice.is_error());
    assert!(notice.message().contains("symbol cannot be empty"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn new_fetch_replaces_data_and_ticker_wholesale() {
    // Given: a session holding AAPL
    let source = ScriptedSource::new(vec![Ok(ramp(40)), Ok(ramp(5))]);
    let mut session = Session::new(source);
    session.fetch().await;

    // When: the user switches to msft and fetches again
    session.inputs_mut().ticker = String::from("msft");
    session.fetch().await;

    // Then: only the MSFT data remains
    let SessionState::HasData { ticker, table } = session.state() else {
        panic!("expected data");
    };
    assert_eq!(ticker.as_str(), "MSFT");
    assert_eq!(table.len(), 5);
}

// =============================================================================
// Window changes
// =============================================================================

#[tokio::test]
async fn default_window_is_twenty_or_row_count() {
    // Given: a long and a short fetch
    let source = ScriptedSource::new(vec![Ok(ramp(60)), Ok(ramp(8))]);
    let mut session = Session::new(source);

    // When/Then: the default window follows min(20, rows)
    session.fetch().await;
    assert_eq!(session.window().map(|w| w.get()), Some(20));

    session.fetch().await;
    assert_eq!(session.window().map(|w| w.get()), Some(8));
}

#[tokio::test]
async fn changing_window_recomputes_without_refetching() {
    // Given: a session with 50 rows fetched once
    let source = ScriptedSource::new(vec![Ok(ramp(50))]);
    let mut session = Session::new(source.clone());
    session.fetch().await;

    // When: the user changes the window twice
    session.set_window(5).expect("in bounds");
    let Presentation::Dashboard(five) = session.present() else {
        panic!("expected dashboard");
    };
    session.set_window(45).expect("in bounds");
    let Presentation::Dashboard(forty_five) = session.present() else {
        panic!("expected dashboard");
    };

    // Then: each view reflects its own window
    assert_eq!(five.ma_column, "MA5");
    assert_eq!(
        five.table.iter().filter(|r| r.moving_average.is_some()).count(),
        46
    );
    assert_eq!(forty_five.ma_column, "MA45");
    assert_eq!(
        forty_five
            .table
            .iter()
            .filter(|r| r.moving_average.is_some())
            .count(),
        6
    );

    // And: the source was only hit by the first fetch
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn out_of_range_window_keeps_previous_window() {
    // Given: a session with 10 rows and window 4
    let source = ScriptedSource::new(vec![Ok(ramp(10))]);
    let mut session = Session::new(source);
    session.fetch().await;
    session.set_window(4).expect("in bounds");

    // When: the user enters 0 and then 11
    let zero = session.set_window(0);
    let eleven = session.set_window(11);

    // Then: both are refused and window 4 remains
    assert!(matches!(zero, Err(AnalysisError::Window(_))));
    assert!(matches!(eleven, Err(AnalysisError::Window(_))));
    assert_eq!(session.window().map(|w| w.get()), Some(4));
}

#[tokio::test]
async fn chosen_window_falls_back_to_default_when_new_table_is_shorter() {
    // Given: a window of 30 chosen on a 100-row table
    let source = ScriptedSource::new(vec![Ok(ramp(100)), Ok(ramp(12))]);
    let mut session = Session::new(source);
    session.fetch().await;
    session.set_window(30).expect("in bounds");

    // When: a 12-row table is fetched
    session.fetch().await;

    // Then: the window drops to min(20, 12)
    assert_eq!(session.window().map(|w| w.get()), Some(12));
}

#[tokio::test]
async fn single_row_fetch_succeeds_but_dashboard_shows_error() {
    // Given: a fetch that returns exactly one row
    let source = ScriptedSource::new(vec![Ok(vec![123.0])]);
    let mut session = Session::new(source);

    // When: fetched and presented
    let notice = session.fetch().await;
    let presentation = session.present();

    // Then: the fetch itself succeeded
    assert!(matches!(notice, Notice::Success(_)));

    // And: derivation is skipped with an error
    let Presentation::Unavailable { notice } = presentation else {
        panic!("expected unavailable");
    };
    assert_eq!(
        notice.message(),
        "Not enough data to perform analysis. Try a wider date range."
    );

    // And: the window input is refused
    assert_eq!(
        session.set_window(1),
        Err(AnalysisError::InsufficientRows { rows: 1 })
    );
}
