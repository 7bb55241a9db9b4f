use anyhow::{Context, Result};

use crate::fetch::{self, YahooFinance};
use crate::session::Session;

/// CLI entry point for the `expirations` subcommand.
pub fn run(ticker: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
    rt.block_on(async {
        let mut session = Session::new(YahooFinance::new(fetch::new_client()?), None);
        match session.select_ticker(ticker).await {
            Ok(set) => {
                println!("{}: {} expirations", set.ticker, set.len());
                for (i, date) in set.dates().iter().enumerate() {
                    println!("  {:>3}. {date}", i + 1);
                }
                Ok::<(), anyhow::Error>(())
            }
            Err(e) => {
                eprintln!("ERROR: {e}");
                std::process::exit(1);
            }
        }
    })?;
    Ok(())
}
