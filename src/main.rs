mod config;
mod loader;
mod models;
mod pipeline;
mod scraper;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "raspar", about = "NOAA observation data scraper", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Get NOAA buoy station data formatted as CSV
    NoaaBuoy {
        /// Station id, comma-separated station ids, or a file with one id per line
        station_id: String,

        /// A year, range of years ("2018-2015"), or "realtime" (default)
        #[arg(short = 'd', long = "date-filter")]
        date_filter: Option<String>,

        /// File to save output to; created if it does not exist
        #[arg(short = 'o', long = "output-file")]
        output_file: Option<PathBuf>,

        /// Save data without column headers
        #[arg(long)]
        without_headers: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "raspar=info,warn",
        1 => "raspar=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::NoaaBuoy {
            station_id,
            date_filter,
            output_file,
            without_headers,
        } => {
            let _t = utils::Timer::start("NOAA buoy scrape");

            let stations = loader::station_list(&station_id)?;
            let result = Pipeline::new(config)?
                .run(&stations, date_filter.as_deref(), !without_headers)
                .await?;

            let output_file = output_file.unwrap_or_else(|| {
                PathBuf::from(utils::default_output_name(
                    &station_id,
                    date_filter.as_deref(),
                    Local::now(),
                ))
            });

            fs::write(&output_file, &result.csv)
                .with_context(|| format!("Failed to write {:?}", output_file))?;

            info!(
                "Done: {} resources fetched, {} unavailable",
                result.tasks - result.failures,
                result.failures
            );
            println!("raspar success!");
            println!("Output file created at: {}", output_file.display());
        }
    }

    Ok(())
}
