use serde::{Deserialize, Serialize};

/// Which side of the chain a contract sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

/// A single listed contract as reported by the provider. No derived or
/// cached fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Exercise price.
    pub strike: f64,
    /// Outstanding contracts at this strike and side. Providers omit the
    /// field for dead strikes; absent means zero.
    pub open_interest: u64,
    pub side: OptionSide,
}

impl OptionQuote {
    pub fn new(side: OptionSide, strike: f64, open_interest: u64) -> Self {
        OptionQuote {
            strike,
            open_interest,
            side,
        }
    }
}
