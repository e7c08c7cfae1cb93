//! Combined account report: balance, top models by spend, their
//! prices, and cheaper alternatives for each.

use std::collections::HashMap;

use crate::api::UserInfo;
use crate::core::{AlternativeFinder, MatchStrategy, ModelUsage, PriceQuote};

use super::format::{format_number, format_rate, format_usd};

pub(crate) struct ReportView<'a> {
    pub(crate) user: &'a UserInfo,
    pub(crate) group_ratio: f64,
    /// False when the pricing fetch degraded to "unavailable".
    pub(crate) pricing_available: bool,
    pub(crate) top_models: &'a [ModelUsage],
    pub(crate) price_map: &'a HashMap<String, PriceQuote>,
    pub(crate) finder: &'a AlternativeFinder<'a>,
}

fn strategy_note(strategy: MatchStrategy) -> &'static str {
    match strategy {
        MatchStrategy::Capability => " (similar capability)",
        MatchStrategy::Category | MatchStrategy::None => "",
    }
}

pub(crate) fn print_report(view: &ReportView<'_>, timestamp: &str) {
    println!("Account report");
    println!("Queried at: {timestamp}");
    println!("Username:   {}", view.user.username.as_deref().unwrap_or("N/A"));
    println!("Remaining:  {}", format_usd(view.user.remaining_usd()));
    println!("Spent:      {}", format_usd(view.user.used_usd()));
    println!("Discount:   {}", view.group_ratio);

    if view.top_models.is_empty() {
        println!("\nNo usage data for the window.");
        return;
    }

    println!("\nTop models by spend");
    for (rank, usage) in view.top_models.iter().enumerate() {
        println!("\n{}. {}", rank + 1, usage.model);
        println!(
            "   Spend: {} over {} requests ({} tokens)",
            format_usd(Some(usage.stats.quota_usd())),
            format_number(usage.stats.count),
            format_number(usage.stats.token_used),
        );

        match view.price_map.get(&usage.model) {
            Some(quote) => {
                println!(
                    "   Price: in {}/M, out {}/M (avg {}/M)",
                    format_rate(quote.input_price),
                    format_rate(quote.output_price),
                    format_rate(quote.avg_cost),
                );
            }
            None if !view.pricing_available => {
                println!("   Price: unavailable (pricing endpoint did not respond)");
            }
            None => {
                println!("   Price: not in the rate card");
            }
        }

        let (alternatives, strategy) = view.finder.find(&usage.model);
        if alternatives.is_empty() {
            println!("   Cheaper alternatives: none");
        } else {
            println!("   Cheaper alternatives{}:", strategy_note(strategy));
            for alt in &alternatives {
                println!(
                    "     - {}: {}/M",
                    alt.model,
                    format_rate(alt.quote.avg_cost)
                );
            }
        }
    }
}

pub(crate) fn output_report_json(view: &ReportView<'_>, timestamp: &str) -> String {
    let models: Vec<serde_json::Value> = view
        .top_models
        .iter()
        .map(|usage| {
            let price = view.price_map.get(&usage.model);
            let (alternatives, strategy) = view.finder.find(&usage.model);
            let alts: Vec<serde_json::Value> = alternatives
                .iter()
                .map(|alt| {
                    serde_json::json!({
                        "model": alt.model,
                        "avg_cost": alt.quote.avg_cost,
                        "similarity": alt.similarity,
                    })
                })
                .collect();
            serde_json::json!({
                "model": usage.model,
                "cost": usage.stats.quota_usd(),
                "requests": usage.stats.count,
                "tokens": usage.stats.token_used,
                "price": price.map(|q| serde_json::json!({
                    "input_price": q.input_price,
                    "output_price": q.output_price,
                    "avg_cost": q.avg_cost,
                })),
                "alternatives": alts,
                "strategy": strategy.as_str(),
            })
        })
        .collect();

    let wrapper = serde_json::json!({
        "timestamp": timestamp,
        "user": {
            "username": view.user.username,
            "remaining": view.user.remaining_usd(),
            "spent": view.user.used_usd(),
        },
        "group_ratio": view.group_ratio,
        "pricing_available": view.pricing_available,
        "top_models": models,
    });
    serde_json::to_string_pretty(&wrapper).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CapabilityIndex, UsageStat};

    #[test]
    fn report_json_carries_strategy_per_model() {
        let user: UserInfo =
            serde_json::from_str(r#"{"username": "u", "quota": 1000000}"#).unwrap();
        let price_map: HashMap<String, PriceQuote> = [
            (
                "gpt-5.2".to_string(),
                PriceQuote {
                    input_price: 2.0,
                    output_price: 2.0,
                    avg_cost: 2.0,
                },
            ),
            (
                "gpt-5-mini".to_string(),
                PriceQuote {
                    input_price: 0.5,
                    output_price: 0.5,
                    avg_cost: 0.5,
                },
            ),
        ]
        .into();
        let capabilities = CapabilityIndex::default();
        let finder = AlternativeFinder::new(&price_map, &capabilities);
        let top_models = vec![ModelUsage {
            model: "gpt-5.2".to_string(),
            stats: UsageStat {
                quota: 500_000,
                token_used: 100,
                count: 3,
            },
        }];
        let view = ReportView {
            user: &user,
            group_ratio: 0.23,
            pricing_available: true,
            top_models: &top_models,
            price_map: &price_map,
            finder: &finder,
        };
        let json = output_report_json(&view, "2026-01-01 00:00:00");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["top_models"][0]["strategy"], "category");
        assert_eq!(
            value["top_models"][0]["alternatives"][0]["model"],
            "gpt-5-mini"
        );
        assert!((value["user"]["remaining"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    }
}
