use std::ops::Range;

use crate::{
    error::Result,
    params::{validate_cluster_size, validate_peak_gap},
    peak::Peak,
};

/// Collapses near-duplicate peaks of one sample.
///
/// Peaks are stably sorted by position and scanned left to right. A peak joins
/// the open cluster when it lies within `peak_gap` of the cluster's first peak
/// and the cluster holds fewer than `cluster_size` peaks; otherwise the cluster
/// is closed and a new one starts at that peak. Every closed cluster keeps only
/// its largest-area peak; on equal areas the first peak in sorted order wins.
///
/// The returned peaks are in ascending position order.
///
/// # Errors
/// Returns `InvalidParameter` if `peak_gap < 0` or `cluster_size < 1`.
///
/// # Examples
/// ```
/// use genescan::{cluster_peaks, Peak};
///
/// let peaks = vec![
///     Peak::new("S1", 105.0, 40.0, 0),
///     Peak::new("S1", 100.0, 50.0, 1),
///     Peak::new("S1", 100.5, 10.0, 2),
/// ];
/// let kept = cluster_peaks(peaks, 1.0, 3).unwrap();
/// let positions: Vec<f64> = kept.iter().map(|p| p.position).collect();
/// assert_eq!(positions, vec![100.0, 105.0]);
/// ```
pub fn cluster_peaks(
    mut peaks: Vec<Peak>,
    peak_gap: f64,
    cluster_size: usize,
) -> Result<Vec<Peak>> {
    validate_peak_gap(peak_gap)?;
    validate_cluster_size(cluster_size)?;

    peaks.sort_by(|a, b| a.position.total_cmp(&b.position));

    let keep: Vec<usize> = find_clusters(&peaks, peak_gap, cluster_size)
        .into_iter()
        .map(|range| range.start + max_area_index(&peaks[range]))
        .collect();

    let mut keep = keep.into_iter().peekable();
    let survivors = peaks
        .into_iter()
        .enumerate()
        .filter_map(|(i, peak)| {
            if keep.peek() == Some(&i) {
                keep.next();
                Some(peak)
            } else {
                None
            }
        })
        .collect();

    Ok(survivors)
}

/// Splits position-sorted peaks into consecutive clusters, returned as index
/// ranges into `sorted`. Every peak belongs to exactly one range.
pub fn find_clusters(
    sorted: &[Peak],
    peak_gap: f64,
    cluster_size: usize,
) -> Vec<Range<usize>> {
    let mut clusters = Vec::new();
    let mut start = 0;

    for i in 1..sorted.len() {
        let full = i - start >= cluster_size;
        let too_far = sorted[i].position - sorted[start].position > peak_gap;
        if full || too_far {
            clusters.push(start..i);
            start = i;
        }
    }

    if !sorted.is_empty() {
        clusters.push(start..sorted.len());
    }

    clusters
}

fn max_area_index(cluster: &[Peak]) -> usize {
    let mut best = 0;
    for (i, peak) in cluster.iter().enumerate().skip(1) {
        if peak.area > cluster[best].area {
            best = i;
        }
    }
    best
}
