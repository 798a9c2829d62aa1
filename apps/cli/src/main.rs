//! HotelScrub CLI — batch cleaner for scraped hotel-listing extracts.
//!
//! Turns a raw scrape export into a cleaned dataset, per-city aggregates,
//! and an auditable run report.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
