//! Recommendation views: overall ranking, per-family picks, and
//! cheaper-alternative listings.

use comfy_table::Color;

use crate::core::{
    Alternative, CATEGORIES, MatchStrategy, PriceQuote, RateCardEntry, classify,
};

use super::format::{create_styled_table, format_rate, header_cell, right_cell, styled_cell};

pub(crate) fn print_recommend_header(fetched_at: &str, group_ratio: f64) {
    println!("Based on pricing data from {fetched_at}");
    println!("Group discount: {group_ratio}");
}

/// Overall ranking: cheapest text models first.
pub(crate) fn print_overall(ranked: &[(&RateCardEntry, PriceQuote)], top: usize, use_color: bool) {
    println!("\nBest value models (top {top})");

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell("Model", use_color),
        header_cell("Avg $/M", use_color),
        header_cell("In x", use_color),
        header_cell("Out x", use_color),
        header_cell("Endpoints", use_color),
    ]);
    for (rank, (entry, quote)) in ranked.iter().take(top).enumerate() {
        let name_color = if use_color { Some(Color::Green) } else { None };
        table.add_row(vec![
            right_cell(&(rank + 1).to_string()),
            styled_cell(&entry.model_name, name_color, rank == 0),
            right_cell(&format_rate(quote.avg_cost)),
            right_cell(&format!("{}", entry.model_ratio.unwrap_or(0.0))),
            right_cell(&format!("{}", entry.completion_ratio.unwrap_or(1.0))),
            styled_cell(&entry.supported_endpoint_types.join(", "), None, false),
        ]);
    }
    println!("{table}");
}

pub(crate) fn output_overall_json(
    ranked: &[(&RateCardEntry, PriceQuote)],
    top: usize,
) -> String {
    let models: Vec<serde_json::Value> = ranked
        .iter()
        .take(top)
        .map(|(entry, quote)| {
            serde_json::json!({
                "model": entry.model_name,
                "avg_cost": quote.avg_cost,
                "input_price": quote.input_price,
                "output_price": quote.output_price,
            })
        })
        .collect();
    serde_json::to_string_pretty(&models).unwrap_or_else(|_| "[]".to_string())
}

/// Per-family picks: the three cheapest models of each declared family.
/// Unclassified models are skipped, matching the upstream report.
pub(crate) fn print_by_category(ranked: &[(&RateCardEntry, PriceQuote)], use_color: bool) {
    for category in CATEGORIES {
        let members: Vec<&(&RateCardEntry, PriceQuote)> = ranked
            .iter()
            .filter(|(entry, _)| classify(&entry.model_name) == category.id)
            .collect();
        if members.is_empty() {
            continue;
        }

        println!(
            "\n{} ({} models) - {}",
            category.name,
            members.len(),
            category.desc
        );
        let mut table = create_styled_table();
        table.set_header(vec![
            header_cell("Model", use_color),
            header_cell("Avg $/M", use_color),
            header_cell("In x", use_color),
            header_cell("Out x", use_color),
        ]);
        for (entry, quote) in members.into_iter().take(3) {
            let name_color = if use_color { Some(Color::Green) } else { None };
            table.add_row(vec![
                styled_cell(&entry.model_name, name_color, false),
                right_cell(&format_rate(quote.avg_cost)),
                right_cell(&format!("{}", entry.model_ratio.unwrap_or(0.0))),
                right_cell(&format!("{}", entry.completion_ratio.unwrap_or(1.0))),
            ]);
        }
        println!("{table}");
    }
}

pub(crate) fn output_category_json(ranked: &[(&RateCardEntry, PriceQuote)]) -> String {
    let mut output: Vec<serde_json::Value> = Vec::new();
    for category in CATEGORIES {
        let members: Vec<serde_json::Value> = ranked
            .iter()
            .filter(|(entry, _)| classify(&entry.model_name) == category.id)
            .take(3)
            .map(|(entry, quote)| {
                serde_json::json!({
                    "model": entry.model_name,
                    "avg_cost": quote.avg_cost,
                })
            })
            .collect();
        if members.is_empty() {
            continue;
        }
        output.push(serde_json::json!({
            "category": category.id,
            "name": category.name,
            "models": members,
        }));
    }
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}

fn strategy_label(strategy: MatchStrategy) -> &'static str {
    match strategy {
        MatchStrategy::Capability => "similar capability",
        MatchStrategy::Category => "same family",
        MatchStrategy::None => "",
    }
}

/// Cheaper-alternative listing for one target model. `target_quote` is
/// None when the target is absent from the rate card.
pub(crate) fn print_alternatives(
    target: &str,
    target_quote: Option<&PriceQuote>,
    alternatives: &[Alternative],
    strategy: MatchStrategy,
    use_color: bool,
) {
    let Some(target_quote) = target_quote else {
        println!("\nModel not found in the rate card: {target}");
        return;
    };

    println!("\nCheaper alternatives for {target}");
    println!("Target average cost: {}/M tokens", format_rate(target_quote.avg_cost));

    if alternatives.is_empty() {
        println!("No cheaper alternative found.");
        return;
    }

    println!("Matched by: {}", strategy_label(strategy));
    let mut table = create_styled_table();
    let mut header = vec![
        header_cell("Model", use_color),
        header_cell("Avg $/M", use_color),
        header_cell("Savings", use_color),
    ];
    if strategy == MatchStrategy::Capability {
        header.push(header_cell("Similarity", use_color));
    }
    table.set_header(header);

    for alt in alternatives {
        let savings = target_quote.avg_cost - alt.quote.avg_cost;
        let percent = if target_quote.avg_cost > 0.0 {
            savings / target_quote.avg_cost * 100.0
        } else {
            0.0
        };
        let name_color = if use_color { Some(Color::Green) } else { None };
        let mut row = vec![
            styled_cell(&alt.model, name_color, false),
            right_cell(&format_rate(alt.quote.avg_cost)),
            right_cell(&format!("{} ({percent:.1}%)", format_rate(savings))),
        ];
        if strategy == MatchStrategy::Capability {
            let similarity = alt.similarity.unwrap_or(0.0);
            row.push(right_cell(&format!("{similarity:.2}")));
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub(crate) fn output_alternatives_json(
    target: &str,
    target_quote: Option<&PriceQuote>,
    alternatives: &[Alternative],
    strategy: MatchStrategy,
) -> String {
    let alts: Vec<serde_json::Value> = alternatives
        .iter()
        .map(|alt| {
            serde_json::json!({
                "model": alt.model,
                "avg_cost": alt.quote.avg_cost,
                "input_price": alt.quote.input_price,
                "output_price": alt.quote.output_price,
                "similarity": alt.similarity,
            })
        })
        .collect();
    let wrapper = serde_json::json!({
        "target": target,
        "target_avg_cost": target_quote.map(|q| q.avg_cost),
        "strategy": strategy.as_str(),
        "alternatives": alts,
    });
    serde_json::to_string_pretty(&wrapper).unwrap_or_else(|_| "{}".to_string())
}
