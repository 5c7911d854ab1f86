use anyhow::{Context, Result};
use genescan::{CleanedSample, Pipeline, Sample};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressState, ProgressStyle};
use log::info;
use rayon::prelude::*;
use std::fmt::Write;

/// Runs the pipeline over all samples and returns them in input order.
///
/// With one thread the samples are cleaned in place on the calling thread.
/// Otherwise they are spread over a dedicated rayon pool; the indexed collect
/// keeps the original sample order.
pub fn clean_samples(
    samples: Vec<Sample>,
    pipeline: &Pipeline,
    num_threads: usize,
) -> Result<Vec<CleanedSample>> {
    if num_threads <= 1 {
        return pipeline
            .clean_samples(samples)
            .context("Failed to clean samples");
    }

    info!(
        "Cleaning {} samples on {} threads",
        samples.len(),
        num_threads
    );
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .context("Could not initialize threadpool")?;

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} samples ({eta})",
        )
        .context("Invalid progress bar template")?
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
        })
        .progress_chars("#>-"),
    );

    let cleaned = pool.install(|| {
        samples
            .into_par_iter()
            .progress_with(pb.clone())
            .map(|sample| pipeline.clean_sample(sample))
            .collect::<genescan::Result<Vec<CleanedSample>>>()
    });

    pb.finish_with_message("Finished cleaning all samples.");

    cleaned.context("Failed to clean samples")
}
