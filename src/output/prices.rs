//! Rate-card display: text and image model price tables.

use comfy_table::Color;

use crate::api::PricingPayload;
use crate::core::{ModelPrice, PriceCalculator, RateCardEntry};

use super::format::{create_styled_table, format_rate, format_unit_price, header_cell, right_cell, styled_cell};

fn matches_filter(entry: &RateCardEntry, filter: Option<&str>) -> bool {
    match filter {
        Some(keyword) => entry
            .model_name
            .to_lowercase()
            .contains(&keyword.to_lowercase()),
        None => true,
    }
}

fn endpoints(entry: &RateCardEntry) -> String {
    entry.supported_endpoint_types.join(", ")
}

pub(crate) fn print_price_tables(
    payload: &PricingPayload,
    fetched_at: &str,
    filter: Option<&str>,
    use_color: bool,
) {
    let group_ratio = payload.default_group_ratio();
    let calculator = PriceCalculator::default();

    let entries: Vec<&RateCardEntry> = payload
        .data
        .iter()
        .filter(|entry| !entry.model_name.is_empty() && matches_filter(entry, filter))
        .collect();

    println!("Model prices as of {fetched_at}");
    println!("Group discount: {group_ratio}");
    if let Some(keyword) = filter {
        println!("Filter: {keyword}");
    }
    println!("Models: {}", entries.len());

    if entries.is_empty() {
        println!("\nNo models match.");
        return;
    }

    let mut text_rows: Vec<(&RateCardEntry, f64, f64)> = Vec::new();
    let mut image_rows: Vec<(&RateCardEntry, f64)> = Vec::new();
    for entry in entries {
        match calculator.quote(entry, group_ratio) {
            ModelPrice::Text(quote) => {
                text_rows.push((entry, quote.input_price, quote.output_price));
            }
            ModelPrice::Image { price_per_image } => image_rows.push((entry, price_per_image)),
        }
    }
    text_rows.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.model_name.cmp(&b.0.model_name))
    });
    image_rows.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.model_name.cmp(&b.0.model_name))
    });

    if !text_rows.is_empty() {
        println!("\nText models ({})", text_rows.len());
        let mut table = create_styled_table();
        table.set_header(vec![
            header_cell("Model", use_color),
            header_cell("Input $/M", use_color),
            header_cell("Output $/M", use_color),
            header_cell("In x", use_color),
            header_cell("Out x", use_color),
            header_cell("Endpoints", use_color),
        ]);
        for (entry, input_price, output_price) in text_rows {
            let name_color = if use_color { Some(Color::Green) } else { None };
            table.add_row(vec![
                styled_cell(&entry.model_name, name_color, false),
                right_cell(&format_rate(input_price)),
                right_cell(&format_rate(output_price)),
                right_cell(&format!("{}", entry.model_ratio.unwrap_or(0.0))),
                right_cell(&format!("{}", entry.completion_ratio.unwrap_or(1.0))),
                styled_cell(&endpoints(entry), None, false),
            ]);
        }
        println!("{table}");
    }

    if !image_rows.is_empty() {
        println!("\nImage models ({})", image_rows.len());
        let mut table = create_styled_table();
        table.set_header(vec![
            header_cell("Model", use_color),
            header_cell("$/image", use_color),
            header_cell("Endpoints", use_color),
        ]);
        for (entry, price_per_image) in image_rows {
            let name_color = if use_color { Some(Color::Magenta) } else { None };
            table.add_row(vec![
                styled_cell(&entry.model_name, name_color, false),
                right_cell(&format_unit_price(price_per_image)),
                styled_cell(&endpoints(entry), None, false),
            ]);
        }
        println!("{table}");
    }
}

pub(crate) fn output_prices_json(payload: &PricingPayload, filter: Option<&str>) -> String {
    let group_ratio = payload.default_group_ratio();
    let calculator = PriceCalculator::default();

    let mut output: Vec<serde_json::Value> = Vec::new();
    for entry in &payload.data {
        if entry.model_name.is_empty() || !matches_filter(entry, filter) {
            continue;
        }
        let value = match calculator.quote(entry, group_ratio) {
            ModelPrice::Text(quote) => serde_json::json!({
                "model_name": entry.model_name,
                "type": "text",
                "input_price": quote.input_price,
                "output_price": quote.output_price,
                "avg_cost": quote.avg_cost,
                "model_ratio": entry.model_ratio.unwrap_or(0.0),
                "completion_ratio": entry.completion_ratio.unwrap_or(1.0),
                "supported_endpoint_types": entry.supported_endpoint_types,
            }),
            ModelPrice::Image { price_per_image } => serde_json::json!({
                "model_name": entry.model_name,
                "type": "image",
                "price_per_image": price_per_image,
                "supported_endpoint_types": entry.supported_endpoint_types,
            }),
        };
        output.push(value);
    }
    output.sort_by(|a, b| {
        let cost_a = a.get("input_price").and_then(|v| v.as_f64()).unwrap_or(f64::MAX);
        let cost_b = b.get("input_price").and_then(|v| v.as_f64()).unwrap_or(f64::MAX);
        cost_a
            .partial_cmp(&cost_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                a.get("model_name")
                    .and_then(|v| v.as_str())
                    .cmp(&b.get("model_name").and_then(|v| v.as_str()))
            })
    });

    let wrapper = serde_json::json!({
        "group_ratio": group_ratio,
        "models": output,
    });
    serde_json::to_string_pretty(&wrapper).unwrap_or_else(|_| "{}".to_string())
}
