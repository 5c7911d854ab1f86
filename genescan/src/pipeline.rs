use std::ops::AddAssign;

use log::{debug, warn};

use crate::{
    cluster::cluster_peaks, error::Result, filter::filter_peaks, normalize::normalize_areas,
    params::PipelineParams, peak::Sample,
};

/// Peak counts for one run of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub samples: usize,
    pub peaks_in: usize,
    pub merged: usize,
    pub filtered: usize,
    pub kept: usize,
}

impl AddAssign for PipelineStats {
    fn add_assign(&mut self, other: Self) {
        self.samples += other.samples;
        self.peaks_in += other.peaks_in;
        self.merged += other.merged;
        self.filtered += other.filtered;
        self.kept += other.kept;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSample {
    pub sample: Sample,
    pub stats: PipelineStats,
}

/// Runs cluster -> normalize -> filter -> normalize on each sample.
///
/// Parameters are validated once when the pipeline is built, so no sample is
/// touched when they are out of range.
#[derive(Debug, Clone)]
pub struct Pipeline {
    params: PipelineParams,
}

impl Pipeline {
    pub fn new(params: PipelineParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Cleans one sample. The sample keeps its id even if no peak survives.
    pub fn clean_sample(&self, sample: Sample) -> Result<CleanedSample> {
        let Sample { id, peaks } = sample;
        let peaks_in = peaks.len();

        let mut peaks = cluster_peaks(peaks, self.params.peak_gap, self.params.cluster_size)?;
        let after_clustering = peaks.len();
        normalize_areas(&mut peaks);

        let mut peaks = filter_peaks(peaks, self.params.filter)?;
        normalize_areas(&mut peaks);

        let stats = PipelineStats {
            samples: 1,
            peaks_in,
            merged: peaks_in - after_clustering,
            filtered: after_clustering - peaks.len(),
            kept: peaks.len(),
        };
        debug!(
            "Sample '{}': {} peaks in, {} merged, {} filtered, {} kept",
            id, stats.peaks_in, stats.merged, stats.filtered, stats.kept
        );
        if peaks.is_empty() && peaks_in > 0 {
            warn!("No peaks left for sample '{}' after cleaning", id);
        }

        Ok(CleanedSample {
            sample: Sample { id, peaks },
            stats,
        })
    }

    /// Cleans every sample in order. Stops at the first error.
    pub fn clean_samples(&self, samples: Vec<Sample>) -> Result<Vec<CleanedSample>> {
        samples
            .into_iter()
            .map(|sample| self.clean_sample(sample))
            .collect()
    }
}

pub fn summarize(cleaned: &[CleanedSample]) -> PipelineStats {
    let mut total = PipelineStats::default();
    for sample in cleaned {
        total += sample.stats;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::GenescanError, peak::Peak};

    fn s1() -> Sample {
        Sample {
            id: "S1".to_string(),
            peaks: vec![
                Peak::new("S1", 100.0, 50.0, 0),
                Peak::new("S1", 100.5, 10.0, 1),
                Peak::new("S1", 105.0, 40.0, 2),
            ],
        }
    }

    fn pipeline(peak_gap: f64, cluster_size: usize, filter: f64) -> Pipeline {
        Pipeline::new(PipelineParams {
            peak_gap,
            cluster_size,
            filter,
        })
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-2,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_merge_and_normalize() -> Result<()> {
        let cleaned = pipeline(1.0, 3, 0.0).clean_sample(s1())?;
        let peaks = &cleaned.sample.peaks;

        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].position, 100.0);
        assert_eq!(peaks[0].area, 50.0);
        assert_close(peaks[0].percentage_area, 55.56);
        assert_eq!(peaks[1].position, 105.0);
        assert_close(peaks[1].percentage_area, 44.44);

        assert_eq!(
            cleaned.stats,
            PipelineStats {
                samples: 1,
                peaks_in: 3,
                merged: 1,
                filtered: 0,
                kept: 2
            }
        );
        Ok(())
    }

    #[test]
    fn test_filter_then_renormalize() -> Result<()> {
        let cleaned = pipeline(1.0, 3, 50.0).clean_sample(s1())?;
        let peaks = &cleaned.sample.peaks;

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].position, 100.0);
        assert_eq!(peaks[0].percentage_area, 100.0);
        assert_eq!(cleaned.stats.filtered, 1);
        Ok(())
    }

    #[test]
    fn test_zero_area_sample() -> Result<()> {
        let zeros = Sample {
            id: "Z".to_string(),
            peaks: vec![Peak::new("Z", 10.0, 0.0, 0), Peak::new("Z", 20.0, 0.0, 1)],
        };

        let kept = pipeline(1.7, 3, 0.0).clean_sample(zeros.clone())?;
        assert_eq!(kept.sample.len(), 2);
        assert!(kept.sample.peaks.iter().all(|p| p.percentage_area == 0.0));

        let removed = pipeline(1.7, 3, 0.5).clean_sample(zeros)?;
        assert!(removed.sample.is_empty());
        assert_eq!(removed.sample.id, "Z");
        Ok(())
    }

    #[test]
    fn test_cluster_size_one_keeps_all_peaks() -> Result<()> {
        let cleaned = pipeline(1000.0, 1, 0.0).clean_sample(s1())?;
        assert_eq!(cleaned.sample.len(), 3);
        assert_eq!(cleaned.stats.merged, 0);
        Ok(())
    }

    #[test]
    fn test_percentages_sum_to_hundred() -> Result<()> {
        let peaks: Vec<Peak> = (0..40)
            .map(|i| Peak::new("S", i as f64 * 0.9, ((i * 37) % 11) as f64 + 0.25, i))
            .collect();
        let sample = Sample {
            id: "S".to_string(),
            peaks,
        };

        for filter in [0.0, 1.0, 5.0, 10.0] {
            let cleaned = pipeline(1.7, 3, filter).clean_sample(sample.clone())?;
            if cleaned.sample.is_empty() {
                continue;
            }
            let sum: f64 = cleaned.sample.peaks.iter().map(|p| p.percentage_area).sum();
            assert!((sum - 100.0).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_raising_filter_never_adds_peaks() -> Result<()> {
        let peaks: Vec<Peak> = (0..30)
            .map(|i| Peak::new("S", i as f64 * 2.3, ((i * 13) % 7) as f64, i))
            .collect();
        let sample = Sample {
            id: "S".to_string(),
            peaks,
        };

        let mut previous = usize::MAX;
        for step in 0..40 {
            let filter = step as f64 * 0.5;
            let kept = pipeline(1.7, 3, filter).clean_sample(sample.clone())?.sample.len();
            assert!(kept <= previous);
            previous = kept;
        }
        Ok(())
    }

    #[test]
    fn test_samples_are_independent() -> Result<()> {
        let other = Sample {
            id: "S2".to_string(),
            peaks: vec![Peak::new("S2", 100.2, 1000.0, 3)],
        };
        let cleaned = pipeline(1.0, 3, 0.0).clean_samples(vec![s1(), other])?;

        assert_eq!(cleaned[0].sample.id, "S1");
        assert_eq!(cleaned[0].sample.len(), 2);
        assert_eq!(cleaned[1].sample.id, "S2");
        assert_eq!(cleaned[1].sample.peaks[0].percentage_area, 100.0);

        let total = summarize(&cleaned);
        assert_eq!(total.samples, 2);
        assert_eq!(total.peaks_in, 4);
        assert_eq!(total.kept, 3);
        Ok(())
    }

    #[test]
    fn test_invalid_params_rejected_up_front() {
        let result = Pipeline::new(PipelineParams {
            peak_gap: 1.7,
            cluster_size: 0,
            filter: 0.0,
        });
        assert!(matches!(
            result,
            Err(GenescanError::InvalidParameter {
                name: "cluster_size",
                ..
            })
        ));
    }
}
