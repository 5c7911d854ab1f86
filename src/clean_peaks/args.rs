use clap::Parser;
use genescan::{
    GenescanError, PipelineParams, DEFAULT_CLUSTER_SIZE, DEFAULT_FILTER, DEFAULT_PEAK_GAP,
};

#[derive(Parser, Debug)]
#[command(allow_negative_numbers = true)]
pub struct CleanPeaksArgs {
    #[arg(
        required = true,
        help = "Input GeneScan datasheet from a single run in CSV format."
    )]
    pub input: String,

    #[arg(short, long, default_value = ".", help = "Name of output directory.")]
    pub outdir: String,

    #[arg(short, long, default_value = "out", help = "Prefix name of output files.")]
    pub prefix: String,

    #[arg(
        long,
        default_value_t = DEFAULT_PEAK_GAP,
        help = "A pair of peaks within peak_gap of each other will be processed to give one peak."
    )]
    pub peak_gap: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_CLUSTER_SIZE,
        help = "The maximum number of peaks within peak_gap of each other that will be processed together. Only the peak with the largest area remains."
    )]
    pub cluster_size: usize,

    #[arg(
        long,
        default_value_t = DEFAULT_FILTER,
        help = "Remove all peaks with percentage area lower than filter. Percentage area is the area of the peak over the area of all peaks of the same sample."
    )]
    pub filter: f64,

    #[arg(short, long, default_value_t = 1, help = "Number of parallel tasks.")]
    pub threads: usize,

    #[arg(
        long,
        default_value_t = false,
        help = "Also write <prefix>_status.csv marking every input peak as Kept or Removed."
    )]
    pub status_report: bool,
}

impl CleanPeaksArgs {
    pub fn pipeline_params(&self) -> Result<PipelineParams, GenescanError> {
        PipelineParams::new(self.peak_gap, self.cluster_size, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> anyhow::Result<()> {
        let args = CleanPeaksArgs::try_parse_from(["clean-peaks", "input.csv"])?;

        assert_eq!(args.outdir, ".");
        assert_eq!(args.prefix, "out");
        assert_eq!(args.threads, 1);
        assert!(!args.status_report);
        assert_eq!(args.pipeline_params()?, PipelineParams::default());
        Ok(())
    }

    #[test]
    fn test_negative_gap_reaches_validation() -> anyhow::Result<()> {
        let args =
            CleanPeaksArgs::try_parse_from(["clean-peaks", "input.csv", "--peak-gap", "-1"])?;

        assert_eq!(args.peak_gap, -1.0);
        assert!(matches!(
            args.pipeline_params(),
            Err(GenescanError::InvalidParameter {
                name: "peak_gap",
                ..
            })
        ));
        Ok(())
    }
}
