pub mod quote;
pub mod snapshot;

pub use quote::{OptionQuote, OptionSide};
pub use snapshot::{ExpirationSet, OiSnapshot};
