use crate::{error::Result, params::validate_filter, peak::Peak};

/// Drops peaks whose `percentage_area` is below `filter`. Peaks exactly at the
/// cutoff are kept. Percentages are left untouched; renormalize afterwards.
pub fn filter_peaks(peaks: Vec<Peak>, filter: f64) -> Result<Vec<Peak>> {
    validate_filter(filter)?;

    Ok(peaks
        .into_iter()
        .filter(|peak| peak.percentage_area >= filter)
        .collect())
}
