use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use oi_flow::fetch::{FetchError, Provider};
use oi_flow::model::{ExpirationSet, OiSnapshot, OptionQuote, OptionSide};
use oi_flow::present::Presentation;
use oi_flow::session::Session;

// ── Mock provider ───────────────────────────────────────────────────

/// Call counters shared between the test and the provider after it has
/// moved into the session.
#[derive(Clone, Default)]
struct Counters {
    expirations: Arc<AtomicU32>,
    snapshots: Arc<AtomicU32>,
}

/// Scripted provider: two known tickers, one that is never recognized,
/// and one behind an unreachable network.
struct MockProvider {
    counters: Counters,
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

#[async_trait]
impl Provider for MockProvider {
    async fn expirations(&self, ticker: &str) -> Result<ExpirationSet, FetchError> {
        self.counters.expirations.fetch_add(1, Ordering::SeqCst);
        match ticker {
            "SPY" => Ok(ExpirationSet::new(
                "SPY",
                vec![day("2026-08-14"), day("2026-08-21")],
            )),
            "QQQ" => Ok(ExpirationSet::new("QQQ", vec![day("2026-09-18")])),
            "DOWN" => Err(FetchError::Unreachable("connection refused".to_string())),
            other => Err(FetchError::UnknownTicker {
                ticker: other.to_string(),
            }),
        }
    }

    async fn snapshot(
        &self,
        ticker: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<OiSnapshot, FetchError> {
        self.counters.snapshots.fetch_add(1, Ordering::SeqCst);
        match ticker {
            "SPY" => Ok(OiSnapshot {
                ticker: "SPY".to_string(),
                expiration: expiration.unwrap_or(day("2026-08-14")),
                spot: Some(628.0),
                calls: vec![OptionQuote::new(OptionSide::Call, 620.0, 100)],
                puts: vec![OptionQuote::new(OptionSide::Put, 620.0, 60)],
            }),
            "QQQ" => Ok(OiSnapshot {
                ticker: "QQQ".to_string(),
                expiration: expiration.unwrap_or(day("2026-09-18")),
                spot: Some(560.0),
                calls: vec![],
                puts: vec![],
            }),
            "DOWN" => Err(FetchError::Unreachable("connection refused".to_string())),
            other => Err(FetchError::UnknownTicker {
                ticker: other.to_string(),
            }),
        }
    }
}

fn session() -> (Session<MockProvider>, Counters) {
    let counters = Counters::default();
    let provider = MockProvider {
        counters: counters.clone(),
    };
    (Session::new(provider, None), counters)
}

// ── Selection ───────────────────────────────────────────────────────

#[tokio::test]
async fn select_ticker_loads_expirations_and_normalizes_symbol() {
    let (mut s, _) = session();
    let set = s.select_ticker(" spy ").await.expect("known ticker");
    assert_eq!(set.ticker, "SPY");
    assert_eq!(set.len(), 2);
    assert_eq!(s.ticker(), Some("SPY"));
    assert_eq!(s.selected(), None);
}

#[tokio::test]
async fn empty_ticker_rejected_before_any_fetch() {
    let (mut s, counters) = session();
    let err = s.select_ticker("   ").await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyTicker));
    assert_eq!(counters.expirations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn switching_ticker_replaces_expirations_and_clears_selection() {
    let (mut s, _) = session();
    s.select_ticker("SPY").await.expect("known ticker");
    s.select_expiration(day("2026-08-21")).expect("listed date");

    s.select_ticker("QQQ").await.expect("known ticker");
    let set = s.expirations().expect("expirations loaded");
    assert_eq!(set.ticker, "QQQ");
    assert_eq!(set.dates(), &[day("2026-09-18")]);
    assert_eq!(s.selected(), None);
}

#[tokio::test]
async fn unknown_expiration_rejected_without_chain_fetch() {
    let (mut s, counters) = session();
    s.select_ticker("SPY").await.expect("known ticker");
    let err = s.select_expiration(day("1999-01-01")).unwrap_err();
    assert!(matches!(
        err,
        FetchError::UnknownExpiration { ref ticker, date }
            if ticker == "SPY" && date == day("1999-01-01")
    ));
    assert_eq!(counters.snapshots.load(Ordering::SeqCst), 0);
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_presents_and_resolves_nearest_expiration() {
    let (mut s, _) = session();
    s.select_ticker("SPY").await.expect("known ticker");
    let p = s.refresh().await.expect("fetch succeeds");
    assert!(matches!(p, Presentation::Ready(_)));
    assert_eq!(s.selected(), Some(day("2026-08-14")));
}

#[tokio::test]
async fn refresh_refetches_every_time() {
    let (mut s, counters) = session();
    s.select_ticker("SPY").await.expect("known ticker");
    s.refresh().await.expect("fetch succeeds");
    s.refresh().await.expect("fetch succeeds");
    assert_eq!(counters.snapshots.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn refresh_without_ticker_is_rejected() {
    let (mut s, _) = session();
    let err = s.refresh().await.unwrap_err();
    assert!(matches!(err, FetchError::NoTicker));
}

#[tokio::test]
async fn empty_chain_presents_as_no_data() {
    let (mut s, _) = session();
    s.select_ticker("QQQ").await.expect("known ticker");
    let p = s.refresh().await.expect("fetch succeeds");
    assert!(matches!(p, Presentation::NoData { .. }));
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn failed_ticker_switch_leaves_session_untouched() {
    let (mut s, _) = session();
    s.select_ticker("SPY").await.expect("known ticker");
    s.refresh().await.expect("fetch succeeds");

    let err = s.select_ticker("MISSING").await.unwrap_err();
    assert!(matches!(err, FetchError::UnknownTicker { .. }));

    // Previous selections and the previous render are still in place.
    assert_eq!(s.ticker(), Some("SPY"));
    assert_eq!(s.expirations().map(|set| set.len()), Some(2));
    match s.last() {
        Some(Presentation::Ready(plan)) => assert_eq!(plan.ticker, "SPY"),
        other => panic!("expected previous render to survive, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_and_unknown_ticker_are_distinct_failures() {
    let (mut s, _) = session();
    let down = s.select_ticker("DOWN").await.unwrap_err();
    let missing = s.select_ticker("MISSING").await.unwrap_err();
    assert!(matches!(down, FetchError::Unreachable(_)));
    assert!(matches!(missing, FetchError::UnknownTicker { .. }));
}
