use anyhow::{bail, Context, Result};
use genescan::{pipeline::summarize, Pipeline};
use humantime::format_duration;
use log::{info, warn};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::{data_load::load_genescan, processing::clean_samples, run_log::RunLog};

pub mod args;
pub mod writer;

pub use args::CleanPeaksArgs;
use writer::{write_clean_peaks, write_status_report};

#[derive(Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub clean_peaks: PathBuf,
    pub status: PathBuf,
    pub log: PathBuf,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(outdir: P, prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            bail!("No prefix provided for output files.");
        }
        if prefix.contains(['/', '\\']) {
            bail!(
                "Prefix '{}' contains a path separator. Use --outdir to choose the output directory.",
                prefix
            );
        }

        let outdir = outdir.as_ref();
        Ok(Self {
            clean_peaks: outdir.join(format!("{}_cleanPeaks.csv", prefix)),
            status: outdir.join(format!("{}_status.csv", prefix)),
            log: outdir.join(format!("{}_log.txt", prefix)),
        })
    }
}

pub fn clean_peaks(args: CleanPeaksArgs, run_log: &RunLog) -> Result<()> {
    info!(
        "Running genescanner 'clean-peaks' with {} threads",
        &args.threads
    );

    let params = args
        .pipeline_params()
        .context("Invalid pipeline parameters")?;
    let pipeline = Pipeline::new(params)?;
    info!(
        "Parameters: peak_gap={}, cluster_size={}, filter={}",
        params.peak_gap, params.cluster_size, params.filter
    );

    let outpaths = OutputPaths::new(&args.outdir, &args.prefix)?;

    fs::create_dir_all(&args.outdir)
        .with_context(|| format!("Could not create output directory: {:?}", args.outdir))?;
    run_log.attach(&outpaths.log)?;
    info!("program started");
    info!(
        "command line: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );

    let table = load_genescan(&args.input)
        .with_context(|| format!("Error loading datasheet from path: '{}'", args.input))?;
    if table.is_empty() {
        warn!("No peaks found in '{}'", args.input);
    }

    let clean_duration = Instant::now();
    let cleaned = clean_samples(table.samples()?, &pipeline, args.threads)?;
    let elapsed = Duration::from_millis(clean_duration.elapsed().as_millis() as u64);
    info!("Cleaning peaks took: {}", format_duration(elapsed));

    let stats = summarize(&cleaned);
    info!(
        "Samples: {}. Peaks in: {}, merged: {}, filtered: {}, kept: {}",
        stats.samples, stats.peaks_in, stats.merged, stats.filtered, stats.kept
    );

    let outfile = File::create(&outpaths.clean_peaks)
        .with_context(|| format!("Failed to create file at: {:?}", outpaths.clean_peaks))?;
    write_clean_peaks(BufWriter::new(outfile), &table, &cleaned)?;
    info!("Cleaned peaks written to {:?}", outpaths.clean_peaks);

    if args.status_report {
        let outfile = File::create(&outpaths.status)
            .with_context(|| format!("Failed to create file at: {:?}", outpaths.status))?;
        write_status_report(BufWriter::new(outfile), &table, &cleaned)?;
        info!("Peak status written to {:?}", outpaths.status);
    }

    Ok(())
}
