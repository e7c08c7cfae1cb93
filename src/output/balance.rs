//! Account balance display.

use crate::consts::{BALANCE_WARN_CRITICAL, BALANCE_WARN_LOW, QUOTA_PER_USD};
use crate::store::BalanceSnapshot;

use super::format::{format_number, format_usd};

pub(crate) fn print_balance(snapshot: &BalanceSnapshot, use_color: bool) {
    println!("Account balance");
    println!("Queried at: {}", snapshot.timestamp);
    println!();
    println!("  Username:  {}", snapshot.user.username.as_deref().unwrap_or("N/A"));
    println!("  Email:     {}", snapshot.user.email.as_deref().unwrap_or("N/A"));
    println!("  Group:     {}", snapshot.user.group.as_deref().unwrap_or("default"));
    if let Some(count) = snapshot.user.request_count {
        println!("  Requests:  {}", format_number(count));
    }
    println!();
    println!("  Remaining: {}", format_usd(snapshot.balance.remaining_amount));
    println!("  Spent:     {}", format_usd(snapshot.balance.used_amount));
    if let (Some(quota), Some(used)) = (snapshot.balance.quota, snapshot.balance.used_quota) {
        let total = quota + used;
        if total > 0 {
            println!(
                "  Usage:     {:.1}% of lifetime quota",
                used as f64 / total as f64 * 100.0
            );
        }
    }

    if let Some(remaining) = snapshot.balance.remaining_amount {
        if remaining < BALANCE_WARN_CRITICAL {
            warn_line("Balance below $1, top up now", "\x1b[31m", use_color);
        } else if remaining < BALANCE_WARN_LOW {
            warn_line("Balance below $5, consider topping up", "\x1b[33m", use_color);
        }
    }

    let summary = &snapshot.usage_summary;
    println!();
    println!("Usage in window");
    println!("  Requests:  {}", format_number(summary.total_count));
    println!("  Tokens:    {}", format_number(summary.total_tokens));
    println!(
        "  Spend:     {}",
        format_usd(Some(summary.total_quota as f64 / QUOTA_PER_USD))
    );

    if !summary.top_models.is_empty() {
        println!();
        println!("Top models by spend");
        for usage in &summary.top_models {
            println!(
                "  {}: {} over {} requests",
                usage.model,
                format_usd(Some(usage.stats.quota_usd())),
                format_number(usage.stats.count),
            );
        }
    }
}

fn warn_line(text: &str, color: &str, use_color: bool) {
    if use_color {
        println!("\n  {color}{text}\x1b[0m");
    } else {
        println!("\n  {text}");
    }
}
