//! Aggregated usage display.

use comfy_table::Color;

use crate::core::{ModelUsage, UsageStat};

use super::format::{create_styled_table, format_number, format_usd, header_cell, right_cell, styled_cell};

pub(crate) fn print_usage_table(
    ranked: &[ModelUsage],
    totals: &UsageStat,
    days: i64,
    use_color: bool,
) {
    println!("Usage by model (last {days} days)");

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell("Model", use_color),
        header_cell("Cost", use_color),
        header_cell("Requests", use_color),
        header_cell("Tokens", use_color),
    ]);
    for (rank, usage) in ranked.iter().enumerate() {
        let name_color = if use_color { Some(Color::Green) } else { None };
        table.add_row(vec![
            right_cell(&(rank + 1).to_string()),
            styled_cell(&usage.model, name_color, rank == 0),
            right_cell(&format_usd(Some(usage.stats.quota_usd()))),
            right_cell(&format_number(usage.stats.count)),
            right_cell(&format_number(usage.stats.token_used)),
        ]);
    }
    println!("{table}");

    println!(
        "\n  Total: {} across {} requests ({} tokens)\n",
        format_usd(Some(totals.quota_usd())),
        format_number(totals.count),
        format_number(totals.token_used),
    );
}

pub(crate) fn output_usage_json(ranked: &[ModelUsage], totals: &UsageStat) -> String {
    let models: Vec<serde_json::Value> = ranked
        .iter()
        .map(|usage| {
            serde_json::json!({
                "model": usage.model,
                "quota": usage.stats.quota,
                "cost": usage.stats.quota_usd(),
                "requests": usage.stats.count,
                "tokens": usage.stats.token_used,
            })
        })
        .collect();
    let wrapper = serde_json::json!({
        "models": models,
        "total": {
            "quota": totals.quota,
            "cost": totals.quota_usd(),
            "requests": totals.count,
            "tokens": totals.token_used,
        },
    });
    serde_json::to_string_pretty(&wrapper).unwrap_or_else(|_| "{}".to_string())
}
