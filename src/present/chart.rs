use super::RenderPlan;

const BAR_WIDTH: usize = 24;
const STRIKE_WIDTH: usize = 10;
const NET_WIDTH: usize = 10;

/// Render the open-interest map: one line per strike, put bar growing
/// left and call bar growing right from a center gutter, net delta at
/// the end, and a dashed marker line at the spot price.
pub fn render_chart(plan: &RenderPlan) -> String {
    let sw = STRIKE_WIDTH;
    let nw = NET_WIDTH;
    // bar + space + count
    let cell = BAR_WIDTH + 9;
    let line_width = sw + 2 + cell + 3 + cell + 2 + nw;

    let spot_label = match plan.spot {
        Some(spot) => format!("spot {spot:.2}"),
        None => "spot unavailable".to_string(),
    };

    let mut out = String::new();
    out.push_str(&"═".repeat(line_width));
    out.push('\n');
    out.push_str(&format!(
        "  {} open interest by strike - {} ({spot_label})\n",
        plan.ticker, plan.expiration
    ));
    out.push_str(&"═".repeat(line_width));
    out.push('\n');
    out.push_str(&format!(
        "{:>sw$}  {:>cell$} | {:<cell$}  {:>nw$}\n",
        "strike", "puts <", "> calls", "net"
    ));

    let max_oi = plan
        .rows
        .iter()
        .map(|r| r.call_oi.max(r.put_oi))
        .max()
        .unwrap_or(0);

    let mut marker_drawn = plan.spot.is_none();
    for row in &plan.rows {
        if let Some(spot) = plan.spot {
            if !marker_drawn && row.strike > spot {
                out.push_str(&marker_line(spot, line_width));
                marker_drawn = true;
            }
        }
        out.push_str(&format!(
            "{:>sw$.2}  {:>cell$} | {:<cell$}  {:>+nw$}\n",
            row.strike,
            put_cell(row.put_oi, max_oi),
            call_cell(row.call_oi, max_oi),
            row.net_delta
        ));
    }
    if let Some(spot) = plan.spot {
        if !marker_drawn {
            out.push_str(&marker_line(spot, line_width));
        }
    }

    out.push_str("  puts < | > calls   net = call OI - put OI   ---- spot\n");
    out
}

// ── Cells ───────────────────────────────────────────────────────────

fn bar(oi: u64, max_oi: u64) -> String {
    if oi == 0 || max_oi == 0 {
        return String::new();
    }
    let len = ((oi as f64 / max_oi as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

/// Right-aligned in its cell, so the bar grows leftward from the gutter.
fn put_cell(oi: u64, max_oi: u64) -> String {
    let bar = bar(oi, max_oi);
    if bar.is_empty() {
        oi.to_string()
    } else {
        format!("{oi} {bar}")
    }
}

/// Left-aligned in its cell, so the bar grows rightward from the gutter.
fn call_cell(oi: u64, max_oi: u64) -> String {
    let bar = bar(oi, max_oi);
    if bar.is_empty() {
        oi.to_string()
    } else {
        format!("{bar} {oi}")
    }
}

fn marker_line(spot: f64, width: usize) -> String {
    let label = format!("  spot {spot:.2}  ");
    format!("{label:-^width$}\n")
}
