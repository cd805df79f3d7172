use std::collections::{BTreeMap, BTreeSet};

use crate::shared::constants::MAX_CENTER_ITERATIONS;
use crate::shared::error::DataError;
use crate::shared::person::{Person, PersonId, Stride};
use crate::shared::position::Position2D;

/// A set of persons with geometry, keyed (and therefore ordered) by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    persons: BTreeMap<PersonId, Person>,
}

impl Group {
    /// Builds a group from a list of persons. The first person with a given
    /// id wins.
    pub fn new(persons: Vec<Person>) -> Self {
        let mut map = BTreeMap::new();
        for person in persons {
            map.entry(person.id.clone()).or_insert(person);
        }
        Self { persons: map }
    }

    pub fn from_map(persons: BTreeMap<PersonId, Person>) -> Self {
        Self { persons }
    }

    pub fn persons(&self) -> &BTreeMap<PersonId, Person> {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.persons.contains_key(id)
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    pub fn ids(&self) -> BTreeSet<PersonId> {
        self.persons.keys().cloned().collect()
    }

    /// Persons ordered by id.
    pub fn person_list(&self) -> Vec<Person> {
        self.persons.values().cloned().collect()
    }

    /// The subset of persons whose ids are in `ids`; unknown ids are ignored.
    pub fn find_persons(&self, ids: &BTreeSet<PersonId>) -> BTreeMap<PersonId, Person> {
        ids.iter()
            .filter_map(|id| self.persons.get(id).map(|p| (id.clone(), p.clone())))
            .collect()
    }

    pub fn calculate_center(&self, stride: Stride) -> Result<Position2D, DataError> {
        let persons: Vec<&Person> = self.persons.values().collect();
        center_of(&persons, stride)
    }

    /// Sum of the members' distance costs to the group center, 0 for an
    /// empty group.
    pub fn distance_costs(&self, stride: Stride) -> f64 {
        match self.calculate_center(stride) {
            Ok(center) => self
                .persons
                .values()
                .map(|p| p.distance_cost(&center, stride))
                .sum(),
            Err(_) => 0.0,
        }
    }

    /// Most likely common center of `persons`, see [`center_of`].
    pub fn center_of(persons: &[Person], stride: Stride) -> Result<Position2D, DataError> {
        let refs: Vec<&Person> = persons.iter().collect();
        center_of(&refs, stride)
    }
}

/// Estimates the most likely center of a group.
///
/// A single person contributes its transactional segment. For more persons
/// every pair proposes one or two candidate centers; the first estimate is
/// the mean of the per-pair candidate means, after which each pair picks
/// its candidate nearest to the current estimate until the summed distance
/// of the picks to their mean stops decreasing.
fn center_of(persons: &[&Person], stride: Stride) -> Result<Position2D, DataError> {
    match persons {
        [] => Err(DataError::EmptyGroup),
        [single] => Ok(single.transactional_segment(stride)),
        _ => {
            let mut pairs = Vec::with_capacity(persons.len() * (persons.len() - 1) / 2);
            for (i, a) in persons.iter().enumerate() {
                for b in &persons[i + 1..] {
                    pairs.push(PairCandidates::between(a, b, stride));
                }
            }
            Ok(refine_center(&pairs))
        }
    }
}

fn refine_center(pairs: &[PairCandidates]) -> Position2D {
    let picks: Vec<Position2D> = pairs.iter().map(PairCandidates::mean).collect();
    let (mut center, mut cost) = mean_and_disagreement(&picks);

    for _ in 0..MAX_CENTER_ITERATIONS {
        let picks: Vec<Position2D> = pairs.iter().map(|c| c.nearest(&center)).collect();
        let (new_center, new_cost) = mean_and_disagreement(&picks);
        if new_cost < cost {
            center = new_center;
            cost = new_cost;
        } else {
            return center;
        }
    }
    log::warn!("group center refinement did not settle after {MAX_CENTER_ITERATIONS} iterations");
    center
}

fn mean_and_disagreement(picks: &[Position2D]) -> (Position2D, f64) {
    let mean = Position2D::mean(picks).unwrap_or_default();
    let cost = picks.iter().map(|p| p.distance(&mean)).sum();
    (mean, cost)
}

/// Candidate centers proposed by a pair of persons.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PairCandidates {
    One(Position2D),
    Two(Position2D, Position2D),
}

impl PairCandidates {
    fn between(a: &Person, b: &Person, stride: Stride) -> Self {
        match (a.rotation(), b.rotation()) {
            (Some(_), Some(_)) => Self::One(
                a.transactional_segment(stride)
                    .midpoint(&b.transactional_segment(stride)),
            ),
            (Some(_), None) => Self::facing_and_unknown(a, b, stride),
            (None, Some(_)) => Self::facing_and_unknown(b, a, stride),
            (None, None) => Self::circle_intersections(a.position(), b.position(), stride),
        }
    }

    /// Midpoint of the known segment and the closest point to it on the
    /// stride circle of the person without orientation.
    fn facing_and_unknown(facing: &Person, unknown: &Person, stride: Stride) -> Self {
        let segment = facing.transactional_segment(stride);
        match (segment - unknown.position()).normalized() {
            Some(direction) => {
                let closest = unknown.position() + direction * stride;
                Self::One(segment.midpoint(&closest))
            }
            None => Self::One(segment),
        }
    }

    /// Intersections of both stride circles; the midpoint when they touch,
    /// do not meet, or coincide.
    fn circle_intersections(a: Position2D, b: Position2D, stride: Stride) -> Self {
        let midpoint = a.midpoint(&b);
        let distance = a.distance(&b);
        if distance == 0.0 || distance >= 2.0 * stride {
            return Self::One(midpoint);
        }
        let half = distance / 2.0;
        let height = (stride * stride - half * half).sqrt();
        let offset = ((b - a) * (1.0 / distance)).perpendicular() * height;
        Self::Two(midpoint + offset, midpoint - offset)
    }

    fn mean(&self) -> Position2D {
        match self {
            Self::One(p) => *p,
            Self::Two(p, q) => p.midpoint(q),
        }
    }

    /// Candidate closest to `target`; the first one on a tie.
    fn nearest(&self, target: &Position2D) -> Position2D {
        match self {
            Self::One(p) => *p,
            Self::Two(p, q) => {
                if q.distance(target) < p.distance(target) {
                    *q
                } else {
                    *p
                }
            }
        }
    }
}
