use crate::config::error::ConfigError;
use crate::config::options::{Min, Options};
use crate::detection::domain::group_detector::{DetectionError, GroupDetector};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::group::Group;
use crate::grouping::domain::observation::Observation;
use crate::shared::constants::MAX_OUTER_ITERATIONS;
use crate::shared::person::{Person, Stride};
use crate::shared::position::Position2D;

use super::assignment::{optimize_centers, AssignmentTable};
use super::one_group_detector::OneGroupDetector;

/// Cost knobs of the EM detectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmParameters {
    /// Distance from a person to its transactional segment.
    pub stride: Stride,
    /// Cost per group.
    pub mdl: f64,
}

impl EmParameters {
    /// Reads `stride` and `mdl`; both are required and must not be negative.
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        Ok(Self {
            stride: options.get_validated("stride", &Min(0.0))?,
            mdl: options.get_validated("mdl", &Min(0.0))?,
        })
    }
}

/// How the next set of centers is proposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proposal {
    /// Start from one common center, then add a center at the transactional
    /// segment of the worst placed person.
    Grow,
    /// Start from one center per person, then drop the center whose removal
    /// raises the cost the least.
    Shrink,
}

/// Which cost decides whether a proposal is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acceptance {
    /// Sum of the best assignment costs plus `mdl` per used center.
    AssignmentCost,
    /// Full cost of the resulting classification, centers recomputed.
    ClassificationCost,
}

/// Outer propose / refine / accept loop shared by the EM detectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmOptimizer {
    name: &'static str,
    parameters: EmParameters,
    proposal: Proposal,
    acceptance: Acceptance,
}

impl EmOptimizer {
    pub fn new(
        name: &'static str,
        parameters: EmParameters,
        proposal: Proposal,
        acceptance: Acceptance,
    ) -> Self {
        Self {
            name,
            parameters,
            proposal,
            acceptance,
        }
    }

    pub fn parameters(&self) -> EmParameters {
        self.parameters
    }

    pub fn detect(&self, observation: &Observation) -> Result<Classification, DetectionError> {
        if observation.len() < 2 {
            return OneGroupDetector::default().detect(observation);
        }

        let persons = observation.person_list();
        let mut centers: Vec<Position2D> = Vec::new();
        let mut costs = AssignmentTable::default();
        let mut sum_costs = f64::INFINITY;

        for iteration in 0..MAX_OUTER_ITERATIONS {
            let mut new_centers = self.propose(&centers, &costs, &persons)?;
            let new_costs = optimize_centers(&mut new_centers, &persons, self.parameters.stride)?;
            let new_sum_costs = self.acceptance_cost(observation, &persons, &new_costs)?;
            log::trace!(
                "{} at {}: iteration {iteration}, {} centers, cost {new_sum_costs} (best {sum_costs})",
                self.name,
                observation.timestamp,
                new_centers.len()
            );
            if new_sum_costs < sum_costs {
                centers = new_centers;
                costs = new_costs;
                sum_costs = new_sum_costs;
            } else {
                self.check_result(observation, &costs);
                return Ok(costs.best().classification(observation.timestamp, &persons)?);
            }
        }

        log::warn!(
            "{} at {}: stopped after {MAX_OUTER_ITERATIONS} iterations",
            self.name,
            observation.timestamp
        );
        Ok(costs.best().classification(observation.timestamp, &persons)?)
    }

    fn propose(
        &self,
        centers: &[Position2D],
        costs: &AssignmentTable,
        persons: &[Person],
    ) -> Result<Vec<Position2D>, DetectionError> {
        let stride = self.parameters.stride;
        match self.proposal {
            Proposal::Grow if centers.is_empty() => Ok(vec![Group::center_of(persons, stride)?]),
            Proposal::Grow => {
                let mut proposal = centers.to_vec();
                if let Some(worst) = costs.best().worst() {
                    proposal.push(persons[worst.person].transactional_segment(stride));
                }
                Ok(proposal)
            }
            Proposal::Shrink if centers.is_empty() => Ok(persons
                .iter()
                .map(|p| p.transactional_segment(stride))
                .collect()),
            Proposal::Shrink => {
                let removed = costs.least_cost_increase(centers.len());
                Ok(centers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != removed)
                    .map(|(_, c)| *c)
                    .collect())
            }
        }
    }

    fn acceptance_cost(
        &self,
        observation: &Observation,
        persons: &[Person],
        costs: &AssignmentTable,
    ) -> Result<f64, DetectionError> {
        let best = costs.best();
        match self.acceptance {
            Acceptance::AssignmentCost => Ok(best.sum_costs(self.parameters.mdl)),
            // an empty classification has no cost at all and must never win
            Acceptance::ClassificationCost if best.is_empty() => Ok(f64::INFINITY),
            Acceptance::ClassificationCost => {
                let classification = best.classification(observation.timestamp, persons)?;
                Ok(classification.calculate_costs(
                    observation,
                    self.parameters.stride,
                    self.parameters.mdl,
                )?)
            }
        }
    }

    fn check_result(&self, observation: &Observation, costs: &AssignmentTable) {
        if self.acceptance != Acceptance::ClassificationCost {
            return;
        }
        let best = costs.best();
        if let Some(worst) = best.worst().filter(|w| w.cost > self.parameters.mdl) {
            log::debug!(
                "{} at {}: personal cost {} exceeds mdl {}; removing a group moved a center \
                 to a position with better overall visibility",
                self.name,
                observation.timestamp,
                worst.cost,
                self.parameters.mdl
            );
        }
    }
}
