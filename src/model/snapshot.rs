use chrono::NaiveDate;

use super::quote::OptionQuote;

/// Expiration dates the provider lists for one ticker, earliest first.
/// Only ever used to populate the expiration selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationSet {
    pub ticker: String,
    dates: Vec<NaiveDate>,
}

impl ExpirationSet {
    pub fn new(ticker: impl Into<String>, mut dates: Vec<NaiveDate>) -> Self {
        dates.sort();
        dates.dedup();
        ExpirationSet {
            ticker: ticker.into(),
            dates,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Earliest listed date; the default selection.
    pub fn nearest(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }
}

/// Everything one pipeline run fetches for a (ticker, expiration) pair.
/// Ephemeral: built fresh per interaction, discarded after rendering,
/// never mutated after construction.
#[derive(Debug, Clone)]
pub struct OiSnapshot {
    pub ticker: String,
    /// The expiration the chain was actually fetched for (the provider
    /// resolves an unspecified date to the nearest one).
    pub expiration: NaiveDate,
    /// Current underlying price. None outside market-data coverage.
    pub spot: Option<f64>,
    pub calls: Vec<OptionQuote>,
    pub puts: Vec<OptionQuote>,
}
