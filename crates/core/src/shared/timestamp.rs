use std::fmt;

/// Frame time as read from the dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub fn new(time: f64) -> Self {
        Self(time)
    }

    pub fn time(&self) -> f64 {
        self.0
    }

    /// Equality within one `f64::EPSILON`, used to pair observations with
    /// ground truth whose timestamps went through a text round trip.
    pub fn fuzzy_eq(&self, other: &Timestamp) -> bool {
        (self.0 - other.0).abs() <= f64::EPSILON
    }
}

impl From<f64> for Timestamp {
    fn from(time: f64) -> Self {
        Self(time)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
