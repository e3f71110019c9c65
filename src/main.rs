use crate::cli::Cli;
use crate::config::Config;
use crate::filter::ActivityFilter;
use anyhow::Result;
use env_logger::Env;
use log::debug;

mod activity;
mod cli;
mod config;
mod filter;
mod nace;

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout only carries the completion line.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_or_exit();
    let config = Config::default();
    let filter = ActivityFilter::new(cli.code);
    debug!("Filtering on NACE code {} with {:?}", filter.code(), config);

    let summary = filter.run(&config)?;
    println!("{summary}");
    Ok(())
}
