use thiserror::Error;

use crate::config::error::ConfigError;
use crate::detection::domain::group_detector::DetectionError;
use crate::shared::error::DataError;

/// Failure of an evaluation run or of writing its report.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Detection(#[from] DetectionError),
    #[error("cannot write evaluation output: {0}")]
    Io(#[from] std::io::Error),
}
