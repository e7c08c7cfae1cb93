//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::consts::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USAGE_WINDOW_DAYS};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "gatecost")]
#[command(about = "Balance, usage, and price monitor for NewAPI-compatible AI gateways", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Use the latest saved pricing snapshot instead of fetching
    #[arg(short = 'O', long, global = true)]
    pub(crate) offline: bool,

    /// Gateway console base URL
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// Usage window in days
    #[arg(short, long, global = true, value_name = "N")]
    pub(crate) days: Option<i64>,

    /// Path to the saved browser login state
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) auth_file: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.offline && config.offline {
            self.offline = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(ref color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            match color.to_lowercase().as_str() {
                "always" => self.color = ColorMode::Always,
                "never" => self.color = ColorMode::Never,
                _ => {}
            }
        }

        if self.base_url.is_none() {
            self.base_url = config.base_url.clone();
        }
        if self.timeout.is_none() {
            self.timeout = config.timeout_secs;
        }
        if self.days.is_none() {
            self.days = config.days;
        }
        if self.auth_file.is_none() {
            self.auth_file = config.auth_file.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub(crate) fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_USAGE_WINDOW_DAYS).max(1)
    }
}
