use ahash::AHashSet;
use anyhow::{Context, Result};
use csv::{StringRecord, WriterBuilder};
use genescan::CleanedSample;
use serde::Serialize;
use std::io::Write;

use crate::data::{
    record::{ColumnLayout, PERCENTAGE_COLUMN},
    GeneScanTable,
};

/// Writes surviving rows with all input columns plus a recomputed
/// `Percentage` column. Rows are grouped by sample in the order of `cleaned`
/// and the sample column carries the trimmed sample name.
pub fn write_clean_peaks<W: Write>(
    writer: W,
    table: &GeneScanTable,
    cleaned: &[CleanedSample],
) -> Result<()> {
    let layout = ColumnLayout::from_headers(table.headers())?;
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header = without_column(table.headers(), layout.percentage);
    header.push_field(PERCENTAGE_COLUMN);
    wtr.write_record(&header)
        .context("Failed to write output header")?;

    for sample in cleaned {
        for peak in &sample.sample.peaks {
            let row = table
                .row(peak.row)
                .with_context(|| format!("Peak references unknown row {}", peak.row))?;

            let mut record = StringRecord::with_capacity(row.as_slice().len(), row.len() + 1);
            for (i, field) in row.iter().enumerate() {
                if Some(i) == layout.percentage {
                    continue;
                }
                if i == layout.sample {
                    record.push_field(&peak.sample_id);
                } else {
                    record.push_field(field);
                }
            }
            record.push_field(&format!("{:.2}", peak.percentage_area));

            wtr.write_record(&record)
                .with_context(|| format!("Failed to write peak {}", peak))?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeakStatus {
    Kept,
    Removed,
}

#[derive(Debug, Serialize)]
struct StatusRow<'a> {
    #[serde(rename = "Sample File Name")]
    sample: &'a str,
    #[serde(rename = "Size")]
    size: f64,
    #[serde(rename = "Area")]
    area: f64,
    #[serde(rename = "Status")]
    status: PeakStatus,
}

/// Writes every input peak with its fate: samples in first-seen order, peaks
/// ascending by size.
pub fn write_status_report<W: Write>(
    writer: W,
    table: &GeneScanTable,
    cleaned: &[CleanedSample],
) -> Result<()> {
    let kept: AHashSet<usize> = cleaned
        .iter()
        .flat_map(|c| c.sample.peaks.iter().map(|p| p.row))
        .collect();

    let mut wtr = WriterBuilder::new().from_writer(writer);

    for sample in table.sample_names() {
        let mut peaks = table.sample_peaks(sample);
        peaks.sort_by(|a, b| a.position.total_cmp(&b.position));

        for peak in peaks {
            let status = if kept.contains(&peak.row) {
                PeakStatus::Kept
            } else {
                PeakStatus::Removed
            };
            wtr.serialize(StatusRow {
                sample: &peak.sample_id,
                size: peak.position,
                area: peak.area,
                status,
            })
            .with_context(|| format!("Failed to write status of peak {}", peak))?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn without_column(record: &StringRecord, column: Option<usize>) -> StringRecord {
    record
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != column)
        .map(|(_, field)| field)
        .collect()
}
