use std::collections::BTreeSet;
use std::fmt;

use crate::shared::person::PersonId;

/// Person ids of one group, without geometry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdGroup {
    persons: BTreeSet<PersonId>,
}

impl IdGroup {
    pub fn new(persons: BTreeSet<PersonId>) -> Self {
        Self { persons }
    }

    pub fn singleton(id: PersonId) -> Self {
        Self {
            persons: BTreeSet::from([id]),
        }
    }

    pub fn persons(&self) -> &BTreeSet<PersonId> {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.persons.contains(id)
    }

    /// Overlap `|A ∩ B| / max(|A|, |B|)`; 0 when both are empty.
    pub fn intersection(&self, other: &IdGroup) -> f64 {
        let larger = self.len().max(other.len());
        if larger == 0 {
            return 0.0;
        }
        let shared = self.persons.intersection(&other.persons).count();
        shared as f64 / larger as f64
    }
}

impl<T: Into<PersonId>> FromIterator<T> for IdGroup {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            persons: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for IdGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, id) in self.persons.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn group(ids: &[&str]) -> IdGroup {
        ids.iter().copied().collect()
    }

    #[rstest]
    #[case::identical(&["1", "2", "3"], &["1", "2", "3"], 1.0)]
    #[case::disjoint(&["1", "2"], &["3", "4"], 0.0)]
    #[case::subset(&["1", "2", "3"], &["1", "2"], 2.0 / 3.0)]
    #[case::superset(&["1", "2"], &["1", "2", "3"], 2.0 / 3.0)]
    #[case::partial(&["1", "2"], &["2", "3"], 0.5)]
    #[case::both_empty(&[], &[], 0.0)]
    fn test_intersection(#[case] a: &[&str], #[case] b: &[&str], #[case] expected: f64) {
        assert_relative_eq!(group(a).intersection(&group(b)), expected);
    }

    #[test]
    fn test_singleton() {
        let g = IdGroup::singleton("7".into());
        assert_eq!(g.len(), 1);
        assert!(g.contains(&"7".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(group(&["b", "a"]).to_string(), "[a, b]");
        assert_eq!(group(&[]).to_string(), "[]");
    }
}
