use thiserror::Error;

use super::person::PersonId;
use super::timestamp::Timestamp;

/// Inconsistent frame data: raised where detected, handled per frame by
/// the evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("an id group must contain at least one person")]
    EmptyIdGroup,
    #[error("cannot calculate the center of an empty group")]
    EmptyGroup,
    #[error("person {id} is not part of the observation at {timestamp}")]
    PersonNotFound { id: PersonId, timestamp: Timestamp },
    #[error("{what}: expected {expected} entries, got {actual}")]
    MismatchedLengths {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
