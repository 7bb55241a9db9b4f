use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::fetch::{self, FetchError, Provider, YahooFinance};
use crate::present::{Presentation, chart, table};
use crate::session::Session;
use crate::snapshot::fetch_spinner;

/// CLI entry point for the `interactive` subcommand.
///
/// Maps the dashboard's two selection controls onto a prompt loop: `t`
/// re-selects the ticker, `e` re-selects the expiration, and either
/// change refetches and re-renders immediately. Fetch errors are printed
/// inline; the previously rendered output stays as it was.
pub fn run(range: f64) -> Result<()> {
    let range = (range > 0.0).then_some(range);

    let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
    let mut session = Session::new(YahooFinance::new(fetch::new_client()?), range);

    println!("Commands:");
    println!("  t <ticker>          select a ticker (loads its expirations)");
    println!("  e <n | YYYY-MM-DD>  select an expiration from the list");
    println!("  x                   list expirations for the current ticker");
    println!("  r                   refetch and re-render the current selection");
    println!("  q                   quit");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("oi-flow> ");
        io::stdout().flush().context("flushing prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("reading input")? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (input, ""),
        };

        match cmd {
            "q" | "quit" => break,

            "t" | "ticker" => {
                let spinner = fetch_spinner(&format!(
                    "Fetching data for {} ...",
                    arg.trim().to_uppercase()
                ));
                let outcome = rt.block_on(async {
                    session.select_ticker(arg).await?;
                    session.refresh().await?;
                    Ok::<(), FetchError>(())
                });
                spinner.finish_and_clear();
                match outcome {
                    Ok(()) => {
                        if let (Some(set), Some(date)) =
                            (session.expirations(), session.selected())
                        {
                            println!(
                                "{} expirations loaded, showing nearest ({date})",
                                set.len()
                            );
                        }
                        render_last(&session);
                    }
                    Err(e) => eprintln!("ERROR: {e}"),
                }
            }

            "e" | "expiration" => match pick_date(&session, arg) {
                Ok(date) => match session.select_expiration(date) {
                    Ok(()) => {
                        let spinner = fetch_spinner(&format!("Fetching data for {date} ..."));
                        let outcome = rt.block_on(async { session.refresh().await.map(|_| ()) });
                        spinner.finish_and_clear();
                        match outcome {
                            Ok(()) => render_last(&session),
                            Err(e) => eprintln!("ERROR: {e}"),
                        }
                    }
                    Err(e) => eprintln!("ERROR: {e}"),
                },
                Err(msg) => eprintln!("ERROR: {msg}"),
            },

            "x" | "expirations" => match session.expirations() {
                Some(set) => {
                    for (i, date) in set.dates().iter().enumerate() {
                        let mark = if session.selected() == Some(*date) {
                            "*"
                        } else {
                            " "
                        };
                        println!(" {mark}{:>3}. {date}", i + 1);
                    }
                }
                None => eprintln!("ERROR: select a ticker first"),
            },

            "r" | "refresh" => {
                let spinner = fetch_spinner("Refreshing ...");
                let outcome = rt.block_on(async { session.refresh().await.map(|_| ()) });
                spinner.finish_and_clear();
                match outcome {
                    Ok(()) => render_last(&session),
                    Err(e) => eprintln!("ERROR: {e}"),
                }
            }

            other => eprintln!("ERROR: unknown command '{other}' (t, e, x, r, q)"),
        }
    }

    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Resolve the `e` argument: a 1-based index into the listed set, or a
/// literal date.
fn pick_date<P: Provider>(session: &Session<P>, arg: &str) -> Result<NaiveDate, String> {
    let set = session
        .expirations()
        .ok_or_else(|| "select a ticker first".to_string())?;
    if arg.is_empty() {
        return Err("expected an index or YYYY-MM-DD".to_string());
    }
    if let Ok(idx) = arg.parse::<usize>() {
        return idx
            .checked_sub(1)
            .and_then(|i| set.dates().get(i).copied())
            .ok_or_else(|| format!("index {idx} out of range (1..={})", set.len()));
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map_err(|_| format!("expected an index or YYYY-MM-DD, got '{arg}'"))
}

fn render_last<P: Provider>(session: &Session<P>) {
    match session.last() {
        Some(Presentation::NoData { ticker, expiration }) => {
            println!("No open interest for {ticker} at {expiration}.");
        }
        Some(Presentation::Ready(plan)) => {
            if let Some(spot) = plan.spot {
                println!("Fetched {} spot price: ${spot:.2}", plan.ticker);
            }
            println!("{}", chart::render_chart(plan));
            println!("{}", table::render_table(plan));
        }
        None => {}
    }
}
