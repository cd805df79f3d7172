use crate::config::options::Options;
use crate::detection::domain::group_detector::{DetectionError, GroupDetector};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::id_group::IdGroup;
use crate::grouping::domain::observation::Observation;

/// Baseline that puts everyone into a single group.
#[derive(Debug, Default)]
pub struct OneGroupDetector {
    options: Options,
}

impl OneGroupDetector {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl GroupDetector for OneGroupDetector {
    fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError> {
        if observation.is_empty() {
            return Ok(Classification::empty(observation.timestamp));
        }
        let group: IdGroup = observation.group.persons().keys().cloned().collect();
        Ok(Classification::new(observation.timestamp, vec![group])?)
    }

    fn options(&self) -> &Options {
        &self.options
    }
}
