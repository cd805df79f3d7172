use crate::config::error::ConfigError;
use crate::config::options::Options;
use crate::detection::domain::group_detector::{DetectionError, GroupDetector};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::observation::Observation;

use super::em_optimizer::{Acceptance, EmOptimizer, EmParameters, Proposal};

/// Adds groups one at a time, starting from a single group, while the
/// total cost keeps falling.
pub struct GrowDetector {
    options: Options,
    optimizer: EmOptimizer,
}

impl GrowDetector {
    /// Requires non-negative `stride` and `mdl` options.
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        let parameters = EmParameters::from_options(&options)?;
        Ok(Self {
            options,
            optimizer: EmOptimizer::new("grow", parameters, Proposal::Grow, Acceptance::AssignmentCost),
        })
    }

    pub fn parameters(&self) -> EmParameters {
        self.optimizer.parameters()
    }
}

impl GroupDetector for GrowDetector {
    fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError> {
        self.optimizer.detect(observation)
    }

    fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::person::Person;
    use crate::shared::pose::Pose;

    fn detector(text: &str) -> GrowDetector {
        GrowDetector::new(text.parse().unwrap()).unwrap()
    }

    fn groups(classification: &Classification) -> Vec<String> {
        let mut groups: Vec<String> = classification
            .id_groups()
            .iter()
            .map(ToString::to_string)
            .collect();
        groups.sort();
        groups
    }

    fn observation() -> Observation {
        Observation::from_persons(
            0.0,
            vec![
                Person::new("A", Pose::at(0.0, 0.0)),
                Person::new("B", Pose::at(1.0, 0.0)),
                Person::new("C", Pose::at(5.0, 5.0)),
            ],
        )
    }

    #[test]
    fn test_separates_distant_person() {
        let result = detector("stride=0.5@mdl=1").detect(&observation()).unwrap();
        assert_eq!(groups(&result), vec!["[A, B]", "[C]"]);
    }

    #[test]
    fn test_high_mdl_keeps_one_group() {
        let result = detector("stride=0.5@mdl=100").detect(&observation()).unwrap();
        assert_eq!(groups(&result), vec!["[A, B, C]"]);
    }

    #[test]
    fn test_zero_mdl_splits_everyone() {
        let result = detector("stride=0.5@mdl=0").detect(&observation()).unwrap();
        assert_eq!(groups(&result), vec!["[A]", "[B]", "[C]"]);
    }

    #[test]
    fn test_construction_requires_parameters() {
        assert!(matches!(
            GrowDetector::new("stride=0.5".parse().unwrap()),
            Err(ConfigError::MissingOption { .. })
        ));
        assert!(matches!(
            GrowDetector::new("stride=0.5@mdl=-2".parse().unwrap()),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_keeps_options() {
        let options: Options = "stride=0.7@mdl=10000@extra=1".parse().unwrap();
        let detector = GrowDetector::new(options.clone()).unwrap();
        assert_eq!(detector.options(), &options);
        assert_eq!(detector.parameters().stride, 0.7);
        assert_eq!(detector.parameters().mdl, 10000.0);
    }
}
