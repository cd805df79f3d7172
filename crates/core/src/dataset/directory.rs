use std::path::Path;

use crate::config::settings::Settings;
use crate::shared::constants::{FEATURES_FILE_NAME, GROUND_TRUTH_FILE_NAME, SETTINGS_FILE_NAME};

use super::error::DatasetError;
use super::features::Features;
use super::ground_truth::GroundTruth;

/// Everything read from one dataset directory.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub features: Features,
    pub ground_truth: GroundTruth,
    pub settings: Settings,
}

impl Dataset {
    /// Reads the features, ground truth and settings files of `dir`.
    pub fn open(dir: &Path) -> Result<Self, DatasetError> {
        log::info!("Reading dataset from {}", dir.display());
        let dataset = Self {
            features: Features::read(&dir.join(FEATURES_FILE_NAME))?,
            ground_truth: GroundTruth::read(&dir.join(GROUND_TRUTH_FILE_NAME))?,
            settings: Settings::read(&dir.join(SETTINGS_FILE_NAME))?,
        };
        log::info!(
            "Dataset has {} observations and {} annotated frames",
            dataset.features.observations.len(),
            dataset.ground_truth.len()
        );
        Ok(dataset)
    }
}
