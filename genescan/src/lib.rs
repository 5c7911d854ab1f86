mod cluster;
mod error;
mod filter;
mod normalize;
mod params;
mod peak;
pub mod pipeline;

pub use cluster::{cluster_peaks, find_clusters};
pub use error::{GenescanError, Result};
pub use filter::filter_peaks;
pub use normalize::normalize_areas;
pub use params::{PipelineParams, DEFAULT_CLUSTER_SIZE, DEFAULT_FILTER, DEFAULT_PEAK_GAP};
pub use peak::{group_by_sample, Peak, Sample};
pub use pipeline::{CleanedSample, Pipeline, PipelineStats};
