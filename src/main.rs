use anyhow::Result;
use clap::Parser;
use humantime::format_duration;
use log::{error, info};
use std::time::{Duration, Instant};

mod argparser;
mod clean_peaks;
mod data;
mod data_load;
mod processing;
mod run_log;

use argparser::{Args, Commands};
use run_log::{init_logging, RunLog};

fn main() -> Result<()> {
    let run_log = RunLog::default();
    init_logging(&run_log);

    let args = Args::parse();
    let total_duration = Instant::now();

    let result = match args.command {
        Commands::CleanPeaks(clean_args) => clean_peaks::clean_peaks(clean_args, &run_log),
    };
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result?;

    let elapsed = Duration::from_millis(total_duration.elapsed().as_millis() as u64);
    info!("Total time: {}", format_duration(elapsed));
    Ok(())
}
