use crate::config::error::ConfigError;
use crate::config::options::Options;
use crate::detection::domain::group_detector::{DetectionError, GroupDetector};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::observation::Observation;

use super::em_optimizer::{Acceptance, EmOptimizer, EmParameters, Proposal};

/// Like [`super::shrink_detector::ShrinkDetector`] but judges each step by the
/// full cost of the resulting classification, centers recomputed from the
/// final groups.
pub struct Shrink2Detector {
    options: Options,
    optimizer: EmOptimizer,
}

impl Shrink2Detector {
    /// Requires non-negative `stride` and `mdl` options.
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        let parameters = EmParameters::from_options(&options)?;
        Ok(Self {
            options,
            optimizer: EmOptimizer::new("shrink2", parameters, Proposal::Shrink, Acceptance::ClassificationCost),
        })
    }

    pub fn parameters(&self) -> EmParameters {
        self.optimizer.parameters()
    }
}

impl GroupDetector for Shrink2Detector {
    fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError> {
        self.optimizer.detect(observation)
    }

    fn options(&self) -> &Options {
        &self.options
    }
}
