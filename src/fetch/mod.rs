pub mod yahoo;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{ExpirationSet, OiSnapshot};

pub use yahoo::YahooFinance;

// ── Error taxonomy ──────────────────────────────────────────────────

/// Failures of one fetch cycle. Each is shown to the user in place of
/// the render; none is retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("ticker symbol must be non-empty")]
    EmptyTicker,

    #[error("select a ticker first")]
    NoTicker,

    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("ticker `{ticker}` not recognized by the provider")]
    UnknownTicker { ticker: String },

    #[error("no options listed for `{ticker}`")]
    NoOptions { ticker: String },

    #[error("expiration {date} is not offered for `{ticker}`")]
    UnknownExpiration { ticker: String, date: NaiveDate },

    #[error("malformed provider response: {0}")]
    BadResponse(String),
}

// ── Provider seam ───────────────────────────────────────────────────

/// A market-data backend. One implementation per upstream API; tests
/// drive the session with a mock.
#[async_trait]
pub trait Provider {
    /// List the expiration dates offered for `ticker`.
    async fn expirations(&self, ticker: &str) -> Result<ExpirationSet, FetchError>;

    /// Fetch the spot price and the call/put chain for one expiration.
    /// `None` requests the nearest available date.
    async fn snapshot(
        &self,
        ticker: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<OiSnapshot, FetchError>;
}

// ── HTTP client ─────────────────────────────────────────────────────

/// Shared client for provider implementations.
pub fn new_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("oi-flow/0.1")
        .build()
        .context("creating HTTP client")
}
