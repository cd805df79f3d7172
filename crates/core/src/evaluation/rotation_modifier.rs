//! Degrades observations by dropping orientations, to measure how detectors
//! cope with missing rotation data.

use rand::prelude::*;

use crate::config::error::ConfigError;
use crate::config::options::{MinMax, OneOf, Options, Validator};
use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::group::Group;
use crate::grouping::domain::observation::Observation;
use crate::shared::person::Person;

pub const MODIFICATION_NAMES: [&str; 4] = ["keep", "remove", "group", "random"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationModification {
    Keep,
    /// Drop every rotation.
    Remove,
    /// Drop rotations of randomly chosen persons until at most `proportion`
    /// of the frame keeps one. A proportion of 1 or more is an absolute
    /// count of rotations to drop.
    Random { proportion: f64, seed: u64 },
    /// Like `Random`, applied within each ground truth group.
    Group { proportion: f64, seed: u64 },
}

impl RotationModification {
    /// Reads `modify_rotations` (default `keep`) and, for `random` and
    /// `group`, `modify_proportion` in `[0, 1]` and `seed` (default 0).
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let mode: String = options.get_value_or("modify_rotations", "keep".to_string())?;
        OneOf(MODIFICATION_NAMES.map(String::from).to_vec()).check("modify_rotations", &mode)?;
        match mode.as_str() {
            "keep" => Ok(Self::Keep),
            "remove" => Ok(Self::Remove),
            _ => {
                let proportion =
                    options.get_validated("modify_proportion", &MinMax { min: 0.0, max: 1.0 })?;
                let seed = options.get_value_or("seed", 0u64)?;
                if mode == "group" {
                    Ok(Self::Group { proportion, seed })
                } else {
                    Ok(Self::Random { proportion, seed })
                }
            }
        }
    }

    /// Ground truth ids missing from `observation` are ignored.
    pub fn apply(&self, observation: &Observation, ground_truth: &Classification) -> Observation {
        let persons = match *self {
            Self::Keep => return observation.clone(),
            Self::Remove => observation
                .group
                .persons()
                .values()
                .map(Person::without_rotation)
                .collect(),
            Self::Random { proportion, seed } => {
                remove_random_rotations(observation.group.persons().values(), proportion, seed)
            }
            Self::Group { proportion, seed } => ground_truth
                .find_groups(observation)
                .iter()
                .flat_map(|group| {
                    remove_random_rotations(group.persons().values(), proportion, seed)
                })
                .collect(),
        };
        Observation::new(observation.timestamp, Group::new(persons))
    }
}

/// Number of rotations to drop so that at most `proportion` of all persons
/// keep one. Always rounds up, even whole numbers.
fn how_many_to_remove(with_rotation: usize, without_rotation: usize, proportion: f64) -> usize {
    if proportion >= 1.0 {
        return proportion as usize;
    }
    let remove =
        with_rotation as f64 - proportion * (with_rotation + without_rotation) as f64;
    if remove <= 0.0 {
        0
    } else {
        (remove + 0.5).round() as usize
    }
}

fn remove_random_rotations<'a>(
    persons: impl Iterator<Item = &'a Person>,
    proportion: f64,
    seed: u64,
) -> Vec<Person> {
    let (mut with_rotation, without_rotation): (Vec<Person>, Vec<Person>) =
        persons.cloned().partition(|p| p.rotation().is_some());
    let count = how_many_to_remove(with_rotation.len(), without_rotation.len(), proportion)
        .min(with_rotation.len());

    let mut rng = StdRng::seed_from_u64(seed);
    with_rotation.shuffle(&mut rng);
    for person in &mut with_rotation[..count] {
        *person = person.without_rotation();
    }
    without_rotation.into_iter().chain(with_rotation).collect()
}
