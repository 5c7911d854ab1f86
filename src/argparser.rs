use clap::{Parser, Subcommand};

use crate::clean_peaks::CleanPeaksArgs;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Reads the output of GeneScan in csv format, removes peaks with small area, and calculates, for each sample, the percentage of the total area that each peak covers.",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Merge near-duplicate peaks, drop small peaks and recompute percentage area per sample.")]
    CleanPeaks(CleanPeaksArgs),
}
