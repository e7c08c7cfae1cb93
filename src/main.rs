mod api;
mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod store;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);

    if let Err(err) = app::run(&cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
