//! Command handlers.
//!
//! Policy decisions about degraded inputs live here: a missing user
//! identity aborts the balance and report commands, while unavailable
//! usage or pricing data degrades to a partial report with a stderr
//! warning.

use chrono::{Local, Utc};

use crate::api::{AuthState, ConsoleClient, PricingPayload};
use crate::cli::{Cli, Commands};
use crate::core::{
    AlternativeFinder, PriceCalculator, aggregate_usage, build_price_map, rank_by_avg_cost,
    total_usage,
};
use crate::error::AppError;
use crate::output;
use crate::store::{self, history, load_capability_index};

pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Some(Commands::Balance) => cmd_balance(cli),
        Some(Commands::Usage) => cmd_usage(cli),
        Some(Commands::Recommend {
            category,
            alternative,
            top,
        }) => cmd_recommend(cli, *category, alternative.as_deref(), *top),
        Some(Commands::Report) => cmd_report(cli),
        Some(Commands::Prices { filter }) => cmd_prices(cli, filter.as_deref()),
        None => cmd_prices(cli, None),
    }
}

fn console_client(cli: &Cli) -> ConsoleClient {
    ConsoleClient::new(cli.base_url(), cli.timeout())
}

fn load_auth(cli: &Cli) -> Result<AuthState, AppError> {
    let path = cli
        .auth_file
        .clone()
        .or_else(store::paths::auth_state_path)
        .ok_or(AppError::AuthMissing {
            path: "auth_state.json".to_string(),
        })?;
    AuthState::load(&path).ok_or_else(|| AppError::AuthMissing {
        path: path.display().to_string(),
    })
}

fn usage_window(cli: &Cli) -> (i64, i64) {
    let end = Utc::now().timestamp();
    let start = end - cli.days() * 86_400;
    (start, end)
}

/// Snapshot timestamps are ISO-8601 with offset; keep the date and time.
fn short_timestamp(timestamp: &str) -> &str {
    timestamp.get(..19).unwrap_or(timestamp)
}

fn cmd_prices(cli: &Cli, filter: Option<&str>) -> Result<(), AppError> {
    let (raw, fetched_at, fresh) = if cli.offline {
        let entry = history::load_latest().ok_or(AppError::HistoryEmpty)?;
        let label = short_timestamp(&entry.timestamp).to_string();
        (entry.data, label, false)
    } else {
        eprint!("Fetching prices...");
        let Some(raw) = console_client(cli).fetch_pricing() else {
            eprintln!(" failed");
            return Err(AppError::PricingUnavailable);
        };
        eprintln!(" ok");
        let label = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        (raw, label, true)
    };

    let payload = PricingPayload::from_value(&raw)
        .filter(|payload| payload.success)
        .ok_or(AppError::PricingUnavailable)?;

    if cli.json {
        println!("{}", output::output_prices_json(&payload, filter));
    } else {
        output::print_price_tables(&payload, &fetched_at, filter, cli.use_color());
    }

    if fresh {
        match history::append(raw) {
            Some(len) => eprintln!("Saved to price history ({len} entries)"),
            None => eprintln!("Warning: failed to save price history"),
        }
    }
    Ok(())
}

fn cmd_balance(cli: &Cli) -> Result<(), AppError> {
    let auth = load_auth(cli)?;
    let client = console_client(cli);

    let user = client
        .fetch_user_self(&auth)
        .ok_or(AppError::UserUnavailable)?;

    let (start_ts, end_ts) = usage_window(cli);
    let records = client.fetch_usage(&auth, start_ts, end_ts);
    if records.is_none() {
        eprintln!("Warning: usage endpoint unavailable, usage summary omitted");
    }
    let records = records.unwrap_or_default();

    let snapshot = store::build_snapshot(&user, &records, start_ts, end_ts);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        output::print_balance(&snapshot, cli.use_color());
    }

    if !store::save_snapshot(&snapshot) {
        eprintln!("Warning: failed to save balance snapshot");
    }
    Ok(())
}

fn cmd_usage(cli: &Cli) -> Result<(), AppError> {
    let auth = load_auth(cli)?;
    let client = console_client(cli);

    let (start_ts, end_ts) = usage_window(cli);
    let records = client
        .fetch_usage(&auth, start_ts, end_ts)
        .ok_or(AppError::UsageUnavailable)?;

    let ranked = aggregate_usage(&records);
    let totals = total_usage(&records);

    if cli.json {
        println!("{}", output::output_usage_json(&ranked, &totals));
    } else if ranked.is_empty() {
        println!("No usage data for the last {} days.", cli.days());
    } else {
        output::print_usage_table(&ranked, &totals, cli.days(), cli.use_color());
    }
    Ok(())
}

fn cmd_recommend(
    cli: &Cli,
    by_category: bool,
    alternative: Option<&str>,
    top: usize,
) -> Result<(), AppError> {
    let entry = history::load_latest().ok_or(AppError::HistoryEmpty)?;
    let payload = PricingPayload::from_value(&entry.data)
        .filter(|payload| payload.success)
        .ok_or(AppError::HistoryEmpty)?;
    let group_ratio = payload.default_group_ratio();
    let calculator = PriceCalculator::default();

    if let Some(target) = alternative {
        let price_map = build_price_map(&calculator, &payload.data, group_ratio);
        let capabilities = load_capability_index();
        if capabilities.is_empty() {
            eprintln!("Note: no capability data, alternatives fall back to family matching");
        }
        let finder = AlternativeFinder::new(&price_map, &capabilities);
        let (found, strategy) = finder.find(target);
        let target_quote = price_map.get(target);

        if cli.json {
            println!(
                "{}",
                output::output_alternatives_json(target, target_quote, &found, strategy)
            );
        } else {
            output::print_recommend_header(short_timestamp(&entry.timestamp), group_ratio);
            output::print_alternatives(target, target_quote, &found, strategy, cli.use_color());
        }
        return Ok(());
    }

    let ranked = rank_by_avg_cost(&calculator, &payload.data, group_ratio);
    if cli.json {
        if by_category {
            println!("{}", output::output_category_json(&ranked));
        } else {
            println!("{}", output::output_overall_json(&ranked, top));
        }
    } else {
        output::print_recommend_header(short_timestamp(&entry.timestamp), group_ratio);
        if by_category {
            output::print_by_category(&ranked, cli.use_color());
        } else {
            output::print_overall(&ranked, top, cli.use_color());
        }
    }
    Ok(())
}

fn cmd_report(cli: &Cli) -> Result<(), AppError> {
    let auth = load_auth(cli)?;
    let client = console_client(cli);

    let user = client
        .fetch_user_self(&auth)
        .ok_or(AppError::UserUnavailable)?;

    let (start_ts, end_ts) = usage_window(cli);
    let records = client.fetch_usage(&auth, start_ts, end_ts);
    if records.is_none() {
        eprintln!("Warning: usage endpoint unavailable");
    }
    let records = records.unwrap_or_default();

    // Pricing degrades to an empty map; per-model rows then say so
    // instead of failing the whole report.
    let payload = if cli.offline {
        history::load_latest()
            .and_then(|entry| PricingPayload::from_value(&entry.data))
            .filter(|payload| payload.success)
    } else {
        client.fetch_pricing_parsed().map(|(_, payload)| payload)
    };
    let pricing_available = payload.is_some();
    if !pricing_available {
        eprintln!("Warning: pricing unavailable, price columns degrade to N/A");
    }
    let payload = payload.unwrap_or_default();
    let group_ratio = payload.default_group_ratio();

    let calculator = PriceCalculator::default();
    let price_map = build_price_map(&calculator, &payload.data, group_ratio);
    let capabilities = load_capability_index();
    let finder = AlternativeFinder::new(&price_map, &capabilities);

    let mut top_models = aggregate_usage(&records);
    top_models.truncate(3);

    let view = output::ReportView {
        user: &user,
        group_ratio,
        pricing_available,
        top_models: &top_models,
        price_map: &price_map,
        finder: &finder,
    };
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    if cli.json {
        println!("{}", output::output_report_json(&view, &timestamp));
    } else {
        output::print_report(&view, &timestamp);
    }
    Ok(())
}
