use std::collections::BTreeSet;
use std::fmt;

use crate::shared::error::DataError;
use crate::shared::person::{PersonId, Stride};
use crate::shared::timestamp::Timestamp;

use super::confusion_matrix::ConfusionMatrix;
use super::group::Group;
use super::id_group::IdGroup;
use super::observation::Observation;

/// A partition of the persons of one frame into groups.
///
/// Produced by a detector or read from ground truth. Groups are expected
/// to be disjoint but this is not enforced, see [`Classification::is_disjoint`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    timestamp: Timestamp,
    groups: Vec<IdGroup>,
}

impl Classification {
    /// Fails with [`DataError::EmptyIdGroup`] if any group is empty.
    pub fn new(timestamp: Timestamp, groups: Vec<IdGroup>) -> Result<Self, DataError> {
        if groups.iter().any(IdGroup::is_empty) {
            return Err(DataError::EmptyIdGroup);
        }
        Ok(Self { timestamp, groups })
    }

    pub fn empty(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            groups: Vec::new(),
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn id_groups(&self) -> &[IdGroup] {
        &self.groups
    }

    /// Every person mentioned by any group.
    pub fn persons(&self) -> BTreeSet<PersonId> {
        self.groups
            .iter()
            .flat_map(|g| g.persons().iter().cloned())
            .collect()
    }

    /// The first group containing `id`.
    pub fn group_of(&self, id: &PersonId) -> Option<&IdGroup> {
        self.groups.iter().find(|g| g.contains(id))
    }

    pub fn is_disjoint(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.persons().iter())
            .all(|id| seen.insert(id))
    }

    /// Copy with a singleton group appended for each of `persons` that no
    /// group mentions yet.
    pub fn filled_with_singletons<'a, I>(&self, persons: I) -> Classification
    where
        I: IntoIterator<Item = &'a PersonId>,
    {
        let mut known = self.persons();
        let mut groups = self.groups.clone();
        for id in persons {
            if known.insert(id.clone()) {
                groups.push(IdGroup::singleton(id.clone()));
            }
        }
        Classification {
            timestamp: self.timestamp,
            groups,
        }
    }

    /// Groups of `observation` as annotated here, filled up with singletons.
    /// Ids the observation lacks are ignored and groups left empty dropped.
    pub fn find_groups(&self, observation: &Observation) -> Vec<Group> {
        self.filled_with_singletons(observation.group.persons().keys())
            .groups
            .iter()
            .map(|id_group| Group::from_map(observation.group.find_persons(id_group.persons())))
            .filter(|group| !group.is_empty())
            .collect()
    }

    /// Materializes the id groups with the persons of `observation`.
    ///
    /// Every referenced person must be present in the observation. With
    /// `fill_singletons` each observed person not mentioned by any group is
    /// added as a singleton group.
    pub fn create_groups(
        &self,
        observation: &Observation,
        fill_singletons: bool,
    ) -> Result<Vec<Group>, DataError> {
        let source = if fill_singletons {
            self.filled_with_singletons(observation.group.persons().keys())
        } else {
            self.clone()
        };
        source
            .groups
            .iter()
            .map(|id_group| {
                let persons = id_group
                    .persons()
                    .iter()
                    .map(|id| {
                        observation
                            .group
                            .get(id)
                            .cloned()
                            .ok_or_else(|| DataError::PersonNotFound {
                                id: id.clone(),
                                timestamp: observation.timestamp,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Group::new(persons))
            })
            .collect()
    }

    /// Sum of the groups' distance costs.
    pub fn calculate_distance_costs(
        &self,
        observation: &Observation,
        stride: Stride,
    ) -> Result<f64, DataError> {
        Ok(self
            .create_groups(observation, false)?
            .iter()
            .map(|g| g.distance_costs(stride))
            .sum())
    }

    /// Occlusion costs of every group member against everyone observed.
    pub fn calculate_visibility_costs(
        &self,
        observation: &Observation,
        stride: Stride,
    ) -> Result<f64, DataError> {
        let everyone = observation.group.persons();
        let mut cost = 0.0;
        for group in self.create_groups(observation, false)? {
            let center = group.calculate_center(stride)?;
            for member in group.persons().values() {
                for other in everyone.values() {
                    cost += member.visibility_cost(&center, other);
                }
            }
        }
        Ok(cost)
    }

    pub fn calculate_mdl_costs(&self, mdl: f64) -> f64 {
        mdl * self.groups.len() as f64
    }

    /// Distance + visibility + MDL cost of this partition.
    pub fn calculate_costs(
        &self,
        observation: &Observation,
        stride: Stride,
        mdl: f64,
    ) -> Result<f64, DataError> {
        Ok(self.calculate_distance_costs(observation, stride)?
            + self.calculate_visibility_costs(observation, stride)?
            + self.calculate_mdl_costs(mdl))
    }

    /// Scores this classification against `ground_truth`.
    ///
    /// Both sides are first filled with singletons for persons only the
    /// other side mentions. A predicted singleton is a true negative when
    /// its person is alone in the ground truth too, a false negative
    /// otherwise. A predicted group is a true positive when some ground
    /// truth group reaches an intersection of `threshold`, a false
    /// positive otherwise.
    pub fn create_confusion_matrix(
        &self,
        ground_truth: &Classification,
        threshold: f64,
    ) -> ConfusionMatrix {
        let candidate = self.filled_with_singletons(&ground_truth.persons());
        let truth = ground_truth.filled_with_singletons(&self.persons());
        let threshold = threshold - f64::EPSILON;

        let mut matrix = ConfusionMatrix::default();
        for group in &candidate.groups {
            match group.len() {
                0 => {}
                1 => {
                    let alone = group
                        .persons()
                        .iter()
                        .next()
                        .and_then(|id| truth.group_of(id))
                        .map_or(true, |g| g.len() == 1);
                    if alone {
                        matrix.true_negative += 1;
                    } else {
                        matrix.false_negative += 1;
                    }
                }
                _ => {
                    let matched = truth
                        .groups
                        .iter()
                        .any(|g| group.intersection(g) >= threshold);
                    if matched {
                        matrix.true_positive += 1;
                    } else {
                        matrix.false_positive += 1;
                    }
                }
            }
        }
        matrix
    }
}

/// Groups in order, e.g. `[[a, b], [c]]`.
impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{group}")?;
        }
        f.write_str("]")
    }
}
