use crate::config::options::Options;
use crate::detection::domain::group_detector::{DetectionError, GroupDetector};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::id_group::IdGroup;
use crate::grouping::domain::observation::Observation;

/// Baseline that leaves every person alone.
#[derive(Debug, Default)]
pub struct NonGroupDetector {
    options: Options,
}

impl NonGroupDetector {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl GroupDetector for NonGroupDetector {
    fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError> {
        let groups = observation
            .group
            .persons()
            .keys()
            .cloned()
            .map(IdGroup::singleton)
            .collect();
        Ok(Classification::new(observation.timestamp, groups)?)
    }

    fn options(&self) -> &Options {
        &self.options
    }
}
