use crate::error::{GenescanError, Result};

pub const DEFAULT_PEAK_GAP: f64 = 1.7;
pub const DEFAULT_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_FILTER: f64 = 0.0;

/// Parameters for the peak cleaning pipeline.
///
/// # Fields
/// - `peak_gap`: Maximum distance from the first peak of a cluster for another
///   peak to join it. Must be >= 0.
/// - `cluster_size`: Maximum number of peaks collapsed into one cluster. Must be >= 1.
/// - `filter`: Minimum percentage area (0-100 scale) a peak needs to survive. Must be >= 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineParams {
    pub peak_gap: f64,
    pub cluster_size: usize,
    pub filter: f64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            peak_gap: DEFAULT_PEAK_GAP,
            cluster_size: DEFAULT_CLUSTER_SIZE,
            filter: DEFAULT_FILTER,
        }
    }
}

impl PipelineParams {
    pub fn new(peak_gap: f64, cluster_size: usize, filter: f64) -> Result<Self> {
        let params = Self {
            peak_gap,
            cluster_size,
            filter,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        validate_peak_gap(self.peak_gap)?;
        validate_cluster_size(self.cluster_size)?;
        validate_filter(self.filter)
    }
}

pub(crate) fn validate_peak_gap(peak_gap: f64) -> Result<()> {
    // NaN fails the comparison as well
    if !(peak_gap >= 0.0) {
        return Err(GenescanError::invalid_parameter(
            "peak_gap",
            ">= 0",
            peak_gap,
        ));
    }
    Ok(())
}

pub(crate) fn validate_cluster_size(cluster_size: usize) -> Result<()> {
    if cluster_size < 1 {
        return Err(GenescanError::invalid_parameter(
            "cluster_size",
            ">= 1",
            cluster_size,
        ));
    }
    Ok(())
}

pub(crate) fn validate_filter(filter: f64) -> Result<()> {
    if !(filter >= 0.0) {
        return Err(GenescanError::invalid_parameter("filter", ">= 0", filter));
    }
    Ok(())
}
