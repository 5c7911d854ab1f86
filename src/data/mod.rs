pub mod record;

use ahash::AHashMap;
use anyhow::{bail, Result};
use csv::StringRecord;
use genescan::{group_by_sample, Peak, Sample};

/// A loaded GeneScan datasheet: the raw rows, one typed [`Peak`] per row and
/// the grouping of rows by sample in first-seen order.
pub struct GeneScanTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    peaks: Vec<Peak>,
    sample_order: Vec<String>,
    sample_rows: AHashMap<String, Vec<usize>>,
}

impl GeneScanTable {
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn row(&self, index: usize) -> Option<&StringRecord> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn n_samples(&self) -> usize {
        self.sample_order.len()
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_order
    }

    /// Peaks of one sample in input order.
    pub fn sample_peaks(&self, sample: &str) -> Vec<&Peak> {
        self.sample_rows
            .get(sample)
            .map(|rows| rows.iter().map(|&i| &self.peaks[i]).collect())
            .unwrap_or_default()
    }

    /// Copies the peaks out, grouped per sample in first-seen order.
    pub fn samples(&self) -> Result<Vec<Sample>> {
        Ok(group_by_sample(self.peaks.iter().cloned())?)
    }
}

pub struct GeneScanTableBuilder {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    peaks: Vec<Peak>,
    sample_order: Vec<String>,
    sample_rows: AHashMap<String, Vec<usize>>,
}

impl GeneScanTableBuilder {
    pub fn new(headers: StringRecord) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            peaks: Vec::new(),
            sample_order: Vec::new(),
            sample_rows: AHashMap::new(),
        }
    }

    /// Adds a raw row together with the peak parsed from it. The peak's `row`
    /// must be the index this row will get in the table.
    pub fn add_row(&mut self, record: StringRecord, peak: Peak) -> Result<()> {
        let index = self.rows.len();
        if peak.row != index {
            bail!(
                "Peak for sample '{}' points to row {} but is inserted as row {}",
                peak.sample_id,
                peak.row,
                index
            );
        }
        if record.len() != self.headers.len() {
            bail!(
                "Row {} has {} fields but the header has {}",
                index,
                record.len(),
                self.headers.len()
            );
        }

        match self.sample_rows.get_mut(&peak.sample_id) {
            Some(rows) => rows.push(index),
            None => {
                self.sample_order.push(peak.sample_id.clone());
                self.sample_rows.insert(peak.sample_id.clone(), vec![index]);
            }
        }

        self.rows.push(record);
        self.peaks.push(peak);
        Ok(())
    }

    pub fn build(self) -> GeneScanTable {
        GeneScanTable {
            headers: self.headers,
            rows: self.rows,
            peaks: self.peaks,
            sample_order: self.sample_order,
            sample_rows: self.sample_rows,
        }
    }
}
