//! Person-to-center assignment costs shared by the EM detectors.
//!
//! A table lists `(person, center, cost)` entries sorted by ascending cost.
//! The sort is stable over the insertion order (person-major, center-minor)
//! so equal costs resolve reproducibly: the best assignment of a person is
//! the *last* of its minimal entries, the worst person of a best-assignment
//! table is its last entry.

use std::collections::BTreeMap;

use crate::grouping::domain::classification::Classification;
use crate::grouping::domain::group::Group;
use crate::grouping::domain::id_group::IdGroup;
use crate::shared::constants::MAX_REFINE_ITERATIONS;
use crate::shared::error::DataError;
use crate::shared::person::{Person, Stride};
use crate::shared::position::Position2D;
use crate::shared::timestamp::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    pub person: usize,
    pub center: usize,
    pub cost: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignmentTable {
    entries: Vec<Assignment>,
}

impl AssignmentTable {
    fn sorted(mut entries: Vec<Assignment>) -> Self {
        entries.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        Self { entries }
    }

    /// Cost of every person joining every center: distance cost plus the
    /// visibility costs against everyone in the frame.
    pub fn calculate(persons: &[Person], centers: &[Position2D], stride: Stride) -> Self {
        let mut entries = Vec::with_capacity(persons.len() * centers.len());
        for (p, person) in persons.iter().enumerate() {
            for (c, center) in centers.iter().enumerate() {
                let visibility: f64 = persons
                    .iter()
                    .map(|other| person.visibility_cost(center, other))
                    .sum();
                entries.push(Assignment {
                    person: p,
                    center: c,
                    cost: person.distance_cost(center, stride) + visibility,
                });
            }
        }
        Self::sorted(entries)
    }

    pub fn entries(&self) -> &[Assignment] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One entry per person: its cheapest center.
    pub fn best(&self) -> AssignmentTable {
        let mut best: BTreeMap<usize, Assignment> = BTreeMap::new();
        for entry in &self.entries {
            match best.get(&entry.person) {
                Some(current) if current.cost < entry.cost => {}
                _ => {
                    best.insert(entry.person, *entry);
                }
            }
        }
        Self::sorted(best.into_values().collect())
    }

    /// The most expensive entry; on a best-assignment table, the worst
    /// placed person.
    pub fn worst(&self) -> Option<&Assignment> {
        self.entries.last()
    }

    /// Sum of all entry costs plus `mdl` per distinct center used.
    /// Infinite for an empty table so that any real assignment beats it.
    pub fn sum_costs(&self, mdl: f64) -> f64 {
        if self.entries.is_empty() {
            return f64::INFINITY;
        }
        let mut centers: Vec<usize> = self.entries.iter().map(|e| e.center).collect();
        centers.sort_unstable();
        centers.dedup();
        let sum: f64 = self.entries.iter().map(|e| e.cost).sum();
        sum + mdl * centers.len() as f64
    }

    /// Persons per center, ordered by center index.
    pub fn groups<'a>(&self, persons: &'a [Person]) -> BTreeMap<usize, Vec<&'a Person>> {
        let mut groups: BTreeMap<usize, Vec<&Person>> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.center)
                .or_default()
                .push(&persons[entry.person]);
        }
        groups
    }

    /// Classification of a best-assignment table, one group per used center.
    pub fn classification(
        &self,
        timestamp: Timestamp,
        persons: &[Person],
    ) -> Result<Classification, DataError> {
        let groups = self
            .groups(persons)
            .into_values()
            .map(|members| members.into_iter().map(|p| p.id.clone()).collect::<IdGroup>())
            .collect();
        Classification::new(timestamp, groups)
    }

    /// Index of the center whose removal should raise the cost the least.
    ///
    /// For every person the difference between its second best and best
    /// center is charged to its best center. Centers nobody chose cost
    /// nothing; the first minimum wins.
    pub fn least_cost_increase(&self, center_count: usize) -> usize {
        if center_count <= 1 {
            return 0;
        }
        let mut increase = vec![0.0; center_count];
        for best in self.best().entries() {
            let second = self
                .entries
                .iter()
                .find(|e| e.person == best.person && e.center != best.center);
            if let Some(second) = second {
                increase[best.center] += second.cost - best.cost;
            }
        }
        let mut least = 0;
        for (center, cost) in increase.iter().enumerate() {
            if *cost < increase[least] {
                least = center;
            }
        }
        least
    }
}

/// Geometric centers of the groups in a best-assignment table, one per
/// used center in center order. Unused centers are dropped.
pub fn update_centers(
    persons: &[Person],
    best: &AssignmentTable,
    stride: Stride,
) -> Result<Vec<Position2D>, DataError> {
    best.groups(persons)
        .into_values()
        .map(|members| {
            let members: Vec<Person> = members.into_iter().cloned().collect();
            Group::center_of(&members, stride)
        })
        .collect()
}

/// Alternates assignment and center estimation for a fixed set of centers
/// until the best-assignment cost stops decreasing.
///
/// `centers` is updated to the accepted centers; the returned table holds
/// the assignment costs against them.
pub fn optimize_centers(
    centers: &mut Vec<Position2D>,
    persons: &[Person],
    stride: Stride,
) -> Result<AssignmentTable, DataError> {
    let mut table = AssignmentTable::calculate(persons, centers, stride);
    let mut best = table.best();
    let mut cost = best.sum_costs(0.0);

    for _ in 0..MAX_REFINE_ITERATIONS {
        let new_centers = update_centers(persons, &best, stride)?;
        let new_table = AssignmentTable::calculate(persons, &new_centers, stride);
        let new_best = new_table.best();
        let new_cost = new_best.sum_costs(0.0);
        if new_cost >= cost {
            return Ok(table);
        }
        *centers = new_centers;
        table = new_table;
        best = new_best;
        cost = new_cost;
    }
    log::warn!("center optimization stopped after {MAX_REFINE_ITERATIONS} iterations");
    Ok(table)
}
