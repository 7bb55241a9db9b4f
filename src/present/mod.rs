pub mod chart;
pub mod table;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{OiSnapshot, OptionQuote};

// ── Strike rows ─────────────────────────────────────────────────────

/// One strike's merged open interest. `net_delta` is always
/// `call_oi - put_oi`, with an absent side counted as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrikeRow {
    pub strike: f64,
    pub call_oi: u64,
    pub put_oi: u64,
    pub net_delta: i64,
}

/// What the renderers consume: the rows plus the context they are drawn
/// against.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub ticker: String,
    pub expiration: NaiveDate,
    pub spot: Option<f64>,
    pub rows: Vec<StrikeRow>,
}

/// Outcome of one presenter run.
#[derive(Debug, Clone)]
pub enum Presentation {
    /// Both sides were empty after filtering: nothing to draw.
    NoData {
        ticker: String,
        expiration: NaiveDate,
    },
    Ready(RenderPlan),
}

// ── Reshaping ───────────────────────────────────────────────────────

/// Outer-merge both chain sides into strike rows, sorted strictly
/// ascending. Strikes come out of a single JSON payload, so bit-equality
/// is exact; duplicate strikes within a side are summed.
pub fn build_rows(calls: &[OptionQuote], puts: &[OptionQuote]) -> Vec<StrikeRow> {
    let mut by_strike: HashMap<u64, (f64, u64, u64)> = HashMap::new();

    for q in calls {
        let entry = by_strike
            .entry(q.strike.to_bits())
            .or_insert((q.strike, 0, 0));
        entry.1 += q.open_interest;
    }
    for q in puts {
        let entry = by_strike
            .entry(q.strike.to_bits())
            .or_insert((q.strike, 0, 0));
        entry.2 += q.open_interest;
    }

    let mut rows: Vec<StrikeRow> = by_strike
        .into_values()
        .map(|(strike, call_oi, put_oi)| StrikeRow {
            strike,
            call_oi,
            put_oi,
            net_delta: call_oi as i64 - put_oi as i64,
        })
        .collect();
    rows.sort_by(|a, b| a.strike.total_cmp(&b.strike));
    rows
}

/// Reshape a snapshot into a render plan, keeping only strikes within
/// `spot ± range` when a range is given. The filter is skipped when the
/// spot price is unavailable (there is no point to center the window on).
pub fn present(snapshot: &OiSnapshot, range: Option<f64>) -> Presentation {
    let window = match (snapshot.spot, range) {
        (Some(spot), Some(r)) if r > 0.0 => Some((spot - r, spot + r)),
        _ => None,
    };
    let in_window = |strike: f64| match window {
        Some((lo, hi)) => strike >= lo && strike <= hi,
        None => true,
    };

    let calls: Vec<OptionQuote> = snapshot
        .calls
        .iter()
        .filter(|q| in_window(q.strike))
        .cloned()
        .collect();
    let puts: Vec<OptionQuote> = snapshot
        .puts
        .iter()
        .filter(|q| in_window(q.strike))
        .cloned()
        .collect();

    let rows = build_rows(&calls, &puts);
    if rows.is_empty() {
        return Presentation::NoData {
            ticker: snapshot.ticker.clone(),
            expiration: snapshot.expiration,
        };
    }

    Presentation::Ready(RenderPlan {
        ticker: snapshot.ticker.clone(),
        expiration: snapshot.expiration,
        spot: snapshot.spot,
        rows,
    })
}
