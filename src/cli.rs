use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Options open-interest tracker: fetch a ticker's chain for one
/// expiration and map call/put open interest by strike.
#[derive(Parser)]
#[command(name = "oi-flow", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the expiration dates the provider offers for a ticker
    Expirations {
        /// Ticker symbol (e.g. SPY)
        ticker: String,
    },

    /// Fetch one (ticker, expiration) chain and render the open-interest map
    Snapshot {
        /// Ticker symbol (e.g. SPY)
        ticker: String,

        /// Expiration date (YYYY-MM-DD); defaults to the nearest listed date
        #[arg(long)]
        expiration: Option<NaiveDate>,

        /// Only keep strikes within this many dollars of spot (0 = no filter)
        #[arg(long, default_value = "100.0")]
        range: f64,

        /// Output format: chart, table, or both
        #[arg(long, default_value = "both")]
        format: String,

        /// Also write the strike rows as CSV to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Prompt loop: re-select ticker/expiration and re-render on each change
    Interactive {
        /// Only keep strikes within this many dollars of spot (0 = no filter)
        #[arg(long, default_value = "100.0")]
        range: f64,
    },
}
