use std::{collections::HashMap, fmt::Display};

use crate::error::{GenescanError, Result};

/// A single detected fragment within one sample.
///
/// # Fields
/// - `sample_id`: Name of the sample the peak was measured in.
/// - `position`: Fragment size (bp) or migration distance.
/// - `area`: Signal area under the peak. Never negative.
/// - `percentage_area`: Share of the sample's total area, on a 0-100 scale.
///   Derived; recomputed by [`crate::normalize_areas`] whenever the peak set changes.
/// - `row`: Index of the input row this peak was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub sample_id: String,
    pub position: f64,
    pub area: f64,
    pub percentage_area: f64,
    pub row: usize,
}

impl Peak {
    pub fn new(sample_id: impl Into<String>, position: f64, area: f64, row: usize) -> Self {
        Self {
            sample_id: sample_id.into(),
            position,
            area,
            percentage_area: 0.0,
            row,
        }
    }
}

impl Display for Peak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{} (area {}, {:.2}%)",
            self.sample_id, self.position, self.area, self.percentage_area
        )
    }
}

/// A named group of peaks measured together in one run/lane.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: String,
    pub peaks: Vec<Peak>,
}

impl Sample {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            peaks: Vec::new(),
        }
    }

    pub fn add_peak(&mut self, peak: Peak) -> Result<()> {
        if peak.sample_id != self.id {
            return Err(GenescanError::SampleMismatch {
                expected: self.id.clone(),
                found: peak.sample_id,
            });
        }
        self.peaks.push(peak);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

/// Groups peaks by `sample_id`. Samples come out in the order they were first
/// seen and each sample keeps its peaks in input order.
pub fn group_by_sample<I>(peaks: I) -> Result<Vec<Sample>>
where
    I: IntoIterator<Item = Peak>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut samples: Vec<Sample> = Vec::new();

    for peak in peaks {
        let slot = match index.get(&peak.sample_id) {
            Some(&i) => i,
            None => {
                index.insert(peak.sample_id.clone(), samples.len());
                samples.push(Sample::new(peak.sample_id.clone()));
                samples.len() - 1
            }
        };
        samples[slot].add_peak(peak)?;
    }

    Ok(samples)
}
