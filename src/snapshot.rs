use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use crate::fetch::{self, FetchError, YahooFinance};
use crate::present::{Presentation, chart, table};
use crate::session::Session;

pub struct SnapshotConfig {
    pub ticker: String,
    pub expiration: Option<NaiveDate>,
    pub range: f64,
    pub format: String,
    pub output: Option<PathBuf>,
}

/// CLI entry point for the `snapshot` subcommand: one full
/// fetch -> reshape -> render cycle.
pub fn run(config: &SnapshotConfig) -> Result<()> {
    match config.format.as_str() {
        "chart" | "table" | "both" => {}
        other => bail!("Unknown format '{other}'. Use: chart, table, both"),
    }

    let range = (config.range > 0.0).then_some(config.range);

    let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
    rt.block_on(async {
        let mut session = Session::new(YahooFinance::new(fetch::new_client()?), range);

        let spinner = fetch_spinner(&format!(
            "Fetching data for {} ...",
            config.ticker.trim().to_uppercase()
        ));
        let outcome = async {
            session.select_ticker(&config.ticker).await?;
            if let Some(date) = config.expiration {
                session.select_expiration(date)?;
            }
            session.refresh().await?;
            Ok::<(), FetchError>(())
        }
        .await;
        spinner.finish_and_clear();

        if let Err(e) = outcome {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }

        match session.last() {
            Some(Presentation::NoData { ticker, expiration }) => {
                println!("No open interest for {ticker} at {expiration}.");
            }
            Some(Presentation::Ready(plan)) => {
                if let Some(spot) = plan.spot {
                    println!("Fetched {} spot price: ${spot:.2}", plan.ticker);
                }
                match config.format.as_str() {
                    "chart" => println!("{}", chart::render_chart(plan)),
                    "table" => println!("{}", table::render_table(plan)),
                    _ => {
                        println!("{}", chart::render_chart(plan));
                        println!("{}", table::render_table(plan));
                    }
                }
                if let Some(path) = &config.output {
                    table::write_csv(path, &plan.rows)?;
                    println!("Wrote {} strike rows to {}", plan.rows.len(), path.display());
                }
            }
            None => {}
        }

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}

/// Spinner shown while the blocking fetch is in flight.
pub(crate) fn fetch_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
