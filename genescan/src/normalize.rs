use crate::peak::Peak;

/// Recomputes `percentage_area` of every peak as its share of the summed area.
/// When the summed area is zero every peak gets 0.
///
/// Areas are scaled by the largest area before summing, so the sum stays finite
/// for any finite input.
pub fn normalize_areas(peaks: &mut [Peak]) {
    let max_area = peaks.iter().map(|p| p.area).fold(0.0, f64::max);
    if max_area <= 0.0 {
        for peak in peaks.iter_mut() {
            peak.percentage_area = 0.0;
        }
        return;
    }

    let scaled_total: f64 = peaks.iter().map(|p| p.area / max_area).sum();
    for peak in peaks.iter_mut() {
        peak.percentage_area = peak.area / max_area / scaled_total * 100.0;
    }
}
