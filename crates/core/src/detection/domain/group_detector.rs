use thiserror::Error;

use crate::config::options::Options;
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::observation::Observation;
use crate::shared::error::DataError;

/// A detection that failed for one frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("inconsistent frame data: {0}")]
    Data(#[from] DataError),
}

/// Domain interface for F-formation detection.
///
/// Detectors hold no per-frame state, so one instance can serve several
/// frames concurrently.
pub trait GroupDetector: Send + Sync {
    fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError>;

    /// The options the detector was built with.
    fn options(&self) -> &Options;
}
