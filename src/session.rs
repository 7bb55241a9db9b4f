use chrono::NaiveDate;

use crate::fetch::{FetchError, Provider};
use crate::model::ExpirationSet;
use crate::present::{self, Presentation};

/// The input controller: the current (ticker, expiration) selection plus
/// the last successful render. Changing either selection re-runs the
/// whole fetch -> present pipeline; nothing is cached between runs, and
/// a failed run leaves the previous presentation untouched.
pub struct Session<P> {
    provider: P,
    range: Option<f64>,
    ticker: Option<String>,
    expirations: Option<ExpirationSet>,
    selected: Option<NaiveDate>,
    last: Option<Presentation>,
}

impl<P: Provider> Session<P> {
    pub fn new(provider: P, range: Option<f64>) -> Self {
        Session {
            provider,
            range,
            ticker: None,
            expirations: None,
            selected: None,
            last: None,
        }
    }

    /// Switch to a new ticker: load its expiration set and drop the
    /// previous expiration selection. On failure the session is left
    /// exactly as it was.
    pub async fn select_ticker(&mut self, ticker: &str) -> Result<&ExpirationSet, FetchError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(FetchError::EmptyTicker);
        }

        let expirations = self.provider.expirations(&ticker).await?;
        self.ticker = Some(ticker);
        self.selected = None;
        Ok(&*self.expirations.insert(expirations))
    }

    /// Select one of the listed expirations. Dates outside the current
    /// ticker's set are rejected before any chain fetch.
    pub fn select_expiration(&mut self, date: NaiveDate) -> Result<(), FetchError> {
        let set = self.expirations.as_ref().ok_or(FetchError::NoTicker)?;
        if !set.contains(date) {
            return Err(FetchError::UnknownExpiration {
                ticker: set.ticker.clone(),
                date,
            });
        }
        self.selected = Some(date);
        Ok(())
    }

    /// Run the pipeline: fetch a fresh snapshot for the current selection
    /// and present it. Every call refetches from the provider.
    pub async fn refresh(&mut self) -> Result<&Presentation, FetchError> {
        let ticker = self.ticker.clone().ok_or(FetchError::NoTicker)?;
        let snapshot = self.provider.snapshot(&ticker, self.selected).await?;
        // The provider resolves an unspecified expiration to the nearest
        // date; reflect that in the selection.
        self.selected = Some(snapshot.expiration);
        let presentation = present::present(&snapshot, self.range);
        Ok(&*self.last.insert(presentation))
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }

    pub fn expirations(&self) -> Option<&ExpirationSet> {
        self.expirations.as_ref()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn last(&self) -> Option<&Presentation> {
        self.last.as_ref()
    }
}
