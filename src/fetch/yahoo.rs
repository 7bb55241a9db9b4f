use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::model::{ExpirationSet, OiSnapshot, OptionQuote, OptionSide};

use super::{FetchError, Provider};

const API_URL: &str = "https://query2.finance.yahoo.com/v7/finance/options";

// ── Yahoo API response types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: ChainEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChainEnvelope {
    #[serde(default)]
    result: Vec<ChainResult>,
}

#[derive(Debug, Deserialize)]
struct ChainResult {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    quote: Option<UnderlyingQuote>,
    #[serde(default)]
    options: Vec<ChainSlice>,
}

#[derive(Debug, Deserialize)]
struct UnderlyingQuote {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChainSlice {
    #[serde(rename = "expirationDate")]
    expiration_date: i64,
    #[serde(default)]
    calls: Vec<ContractEntry>,
    #[serde(default)]
    puts: Vec<ContractEntry>,
}

#[derive(Debug, Deserialize)]
struct ContractEntry {
    strike: f64,
    #[serde(rename = "openInterest", default)]
    open_interest: Option<u64>,
}

// ── Provider ────────────────────────────────────────────────────────

/// Yahoo Finance v7 options endpoint. One GET returns the underlying
/// quote, the full expiration list, and the chain for one expiration.
pub struct YahooFinance {
    client: reqwest::Client,
}

impl YahooFinance {
    pub fn new(client: reqwest::Client) -> Self {
        YahooFinance { client }
    }

    async fn fetch_chain(
        &self,
        ticker: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<ChainResult, FetchError> {
        let url = match expiration {
            Some(date) => format!("{API_URL}/{ticker}?date={}", to_epoch(date)),
            None => format!("{API_URL}/{ticker}"),
        };

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        // The provider answers an error status (404) for symbols it does
        // not know; anything it refuses to serve is an unknown ticker.
        if !resp.status().is_success() {
            return Err(FetchError::UnknownTicker {
                ticker: ticker.to_string(),
            });
        }

        let body: OptionsResponse = resp
            .json()
            .await
            .map_err(|e| FetchError::BadResponse(e.to_string()))?;

        first_result(ticker, body)
    }
}

#[async_trait]
impl Provider for YahooFinance {
    async fn expirations(&self, ticker: &str) -> Result<ExpirationSet, FetchError> {
        let chain = self.fetch_chain(ticker, None).await?;
        map_expirations(ticker, &chain)
    }

    async fn snapshot(
        &self,
        ticker: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<OiSnapshot, FetchError> {
        let chain = self.fetch_chain(ticker, expiration).await?;
        map_snapshot(ticker, chain)
    }
}

// ── Response mapping ────────────────────────────────────────────────

fn first_result(ticker: &str, body: OptionsResponse) -> Result<ChainResult, FetchError> {
    body.option_chain
        .result
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::UnknownTicker {
            ticker: ticker.to_string(),
        })
}

fn map_expirations(ticker: &str, chain: &ChainResult) -> Result<ExpirationSet, FetchError> {
    if chain.expiration_dates.is_empty() {
        return Err(FetchError::NoOptions {
            ticker: ticker.to_string(),
        });
    }
    let dates = chain
        .expiration_dates
        .iter()
        .copied()
        .map(from_epoch)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ExpirationSet::new(ticker, dates))
}

fn map_snapshot(ticker: &str, chain: ChainResult) -> Result<OiSnapshot, FetchError> {
    if chain.expiration_dates.is_empty() {
        return Err(FetchError::NoOptions {
            ticker: ticker.to_string(),
        });
    }

    let spot = chain.quote.and_then(|q| q.regular_market_price);
    let slice = chain
        .options
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::BadResponse("response carries no chain data".to_string()))?;

    let expiration = from_epoch(slice.expiration_date)?;
    let calls = map_side(OptionSide::Call, &slice.calls);
    let puts = map_side(OptionSide::Put, &slice.puts);

    Ok(OiSnapshot {
        ticker: ticker.to_string(),
        expiration,
        spot,
        calls,
        puts,
    })
}

fn map_side(side: OptionSide, entries: &[ContractEntry]) -> Vec<OptionQuote> {
    entries
        .iter()
        .map(|e| OptionQuote::new(side, e.strike, e.open_interest.unwrap_or(0)))
        .collect()
}

// Yahoo expirations are epoch seconds at UTC midnight, so the date
// round-trips exactly.
fn to_epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn from_epoch(secs: i64) -> Result<NaiveDate, FetchError> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| FetchError::BadResponse(format!("timestamp {secs} out of range")))
}

// ── Tests ───────────────────────────────────────────────────────────
