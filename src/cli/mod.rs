pub mod slots;
pub mod track;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    tracker::args::TrackArgs,
    utils::logging::{enable_logging, CLI_PREFIX},
};

use self::{slots::print_slots, track::process_track_command};

#[derive(Parser, Debug)]
#[command(name = "Wherelog", version, long_about = None)]
#[command(about = "Logs positions of a device classified by time of day", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable verbose logging")]
    log: bool,
    #[arg(long = "log-filter", help = "Level of logs to show. Overrides --log and RUST_LOG")]
    log_filter: Option<LevelFilter>,
    #[arg(long = "log-dir", help = "Also write logs into daily rotated files in this directory")]
    log_dir: Option<PathBuf>,
    #[arg(long, help = "Don't print notifications to stdout")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Track a simulated device and log every position update")]
    Track {
        #[command(flatten)]
        args: TrackArgs,
    },
    #[command(about = "Show which hours belong to which part of the day")]
    Slots {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = args
        .log_filter
        .or_else(|| args.log.then_some(LevelFilter::TRACE));
    enable_logging(CLI_PREFIX, args.log_dir.as_deref(), logging_level, !args.quiet)?;

    match args.commands {
        Commands::Track { args } => process_track_command(args).await,
        Commands::Slots {} => {
            print_slots();
            Ok(())
        }
    }
}
