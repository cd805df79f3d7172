use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::DatasetError;

/// Reads and deserializes a JSON file, keeping the path in the error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let json = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}
