use std::path::Path;

use anyhow::{Context, Result};

use super::{RenderPlan, StrikeRow};

/// Aligned tabular dump of the strike rows plus the net-delta summary.
pub fn render_table(plan: &RenderPlan) -> String {
    let rule = "-".repeat(46);

    let mut out = String::new();
    out.push_str(&format!(
        "  {} open interest - {}\n",
        plan.ticker, plan.expiration
    ));
    out.push_str(&format!("  {rule}\n"));
    out.push_str(&format!(
        "  {:>10} {:>10} {:>10} {:>10}\n",
        "strike", "call OI", "put OI", "net"
    ));
    for r in &plan.rows {
        out.push_str(&format!(
            "  {:>10.2} {:>10} {:>10} {:>+10}\n",
            r.strike, r.call_oi, r.put_oi, r.net_delta
        ));
    }
    out.push_str(&format!("  {rule}\n"));

    let call_total: u64 = plan.rows.iter().map(|r| r.call_oi).sum();
    let put_total: u64 = plan.rows.iter().map(|r| r.put_oi).sum();
    let net_total = call_total as i64 - put_total as i64;
    out.push_str(&format!(
        "  total: {call_total} calls, {put_total} puts, net {net_total:+}\n"
    ));
    out
}

/// Write the strike rows as CSV (strike, call_oi, put_oi, net_delta).
pub fn write_csv(path: &Path, rows: &[StrikeRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
