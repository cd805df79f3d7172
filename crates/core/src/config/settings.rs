use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::error::DatasetError;
use crate::dataset::json_file::read_json;

use super::options::{NamedOption, Options};

/// Parameters of the dataset's reference detector. Carried for completeness;
/// only `stride` and `mdl` feed the detectors here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsParams {
    pub covmat: [[f64; 3]; 3],
    pub empty: f64,
    pub radius: f64,
    pub nsamples: usize,
    pub quant: f64,
}

/// Contents of a dataset's `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub params: SettingsParams,
    pub mdl: f64,
    pub stride: f64,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn read(path: &Path) -> Result<Self, DatasetError> {
        read_json(path)
    }

    /// `stride` and `mdl` as detector options.
    pub fn detector_options(&self) -> Options {
        [
            NamedOption::new("stride", self.stride.to_string()),
            NamedOption::new("mdl", self.mdl.to_string()),
        ]
        .into_iter()
        .collect()
    }
}
