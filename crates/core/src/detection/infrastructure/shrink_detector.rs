use crate::config::error::ConfigError;
use crate::config::options::Options;
use crate::detection::domain::group_detector::{DetectionError, GroupDetector};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::observation::Observation;

use super::em_optimizer::{Acceptance, EmOptimizer, EmParameters, Proposal};

/// Removes groups one at a time, starting from one group per person, while
/// the total cost keeps falling.
pub struct ShrinkDetector {
    options: Options,
    optimizer: EmOptimizer,
}

impl ShrinkDetector {
    /// Requires non-negative `stride` and `mdl` options.
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        let parameters = EmParameters::from_options(&options)?;
        Ok(Self {
            options,
            optimizer: EmOptimizer::new("shrink", parameters, Proposal::Shrink, Acceptance::AssignmentCost),
        })
    }

    pub fn parameters(&self) -> EmParameters {
        self.optimizer.parameters()
    }
}

impl GroupDetector for ShrinkDetector {
    fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError> {
        self.optimizer.detect(observation)
    }

    fn options(&self) -> &Options {
        &self.options
    }
}
