//! CLI subcommand definitions.

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Show account balance and usage summary
    Balance,
    /// Fetch and display current model prices (default)
    Prices {
        /// Case-insensitive substring filter on model names
        filter: Option<String>,
    },
    /// Show aggregated per-model usage for the recent window
    Usage,
    /// Recommend cost-effective models from the latest pricing snapshot
    Recommend {
        /// Group recommendations by product family
        #[arg(long)]
        category: bool,
        /// Find cheaper substitutes for a specific model
        #[arg(long, value_name = "MODEL", conflicts_with = "category")]
        alternative: Option<String>,
        /// Number of models in the overall ranking
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Combined report: balance, top models, prices, cheaper alternatives
    Report,
}
