use crate::shared::person::Person;
use crate::shared::timestamp::Timestamp;

use super::group::Group;

/// Everyone present in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observation {
    pub timestamp: Timestamp,
    pub group: Group,
}

impl Observation {
    pub fn new(timestamp: Timestamp, group: Group) -> Self {
        Self { timestamp, group }
    }

    pub fn from_persons(timestamp: impl Into<Timestamp>, persons: Vec<Person>) -> Self {
        Self::new(timestamp.into(), Group::new(persons))
    }

    pub fn len(&self) -> usize {
        self.group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    /// Persons ordered by id.
    pub fn person_list(&self) -> Vec<Person> {
        self.group.person_list()
    }
}
