use std::path::PathBuf;

use thiserror::Error;

use crate::shared::error::DataError;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed dataset: {0}")]
    Format(String),
    #[error(transparent)]
    Data(#[from] DataError),
}
