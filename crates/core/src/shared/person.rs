use std::fmt;

use super::constants::{VISIBILITY_ANGLE_THRESHOLD, VISIBILITY_COST_BASE, VISIBILITY_COST_CEILING};
use super::pose::Pose;
use super::position::Position2D;

/// Distance between a person and the center of their transactional segment.
pub type Stride = f64;

/// Identifies a person within one frame.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub pose: Pose,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, pose: Pose) -> Self {
        Self { id: id.into(), pose }
    }

    pub fn position(&self) -> Position2D {
        self.pose.position
    }

    pub fn rotation(&self) -> Option<f64> {
        self.pose.rotation
    }

    pub fn without_rotation(&self) -> Self {
        Self::new(self.id.clone(), self.pose.without_rotation())
    }

    /// Center of the person's transactional segment: `stride` ahead along the
    /// facing direction.
    ///
    /// Without a rotation every direction is equally likely, so the mean of
    /// all possible segment centers, the position itself, is returned.
    pub fn transactional_segment(&self, stride: Stride) -> Position2D {
        match self.pose.rotation {
            Some(rotation) => self.pose.position + Position2D::from_angle(rotation) * stride,
            None => self.pose.position,
        }
    }

    /// Squared distance between the transactional segment and `center`.
    pub fn distance_cost(&self, center: &Position2D, stride: Stride) -> f64 {
        self.transactional_segment(stride).squared_distance(center)
    }

    /// Occlusion penalty caused by `other` standing between this person and
    /// `center`.
    ///
    /// Zero for the person itself, when `other` is farther from the center,
    /// or when the cosine of the angle between both (seen from the center)
    /// is above [`VISIBILITY_ANGLE_THRESHOLD`]. Otherwise
    /// `K^(cos * d_self / d_other)` capped at [`VISIBILITY_COST_CEILING`].
    pub fn visibility_cost(&self, center: &Position2D, other: &Person) -> f64 {
        if self.id == other.id {
            return 0.0;
        }
        let self_vector = *center - self.pose.position;
        let self_distance = self_vector.norm();
        let other_vector = *center - other.pose.position;
        let other_distance = other_vector.norm();
        if other_distance > self_distance || self_distance == 0.0 {
            return 0.0;
        }
        if other_distance == 0.0 {
            return VISIBILITY_COST_CEILING;
        }
        let cosine = self_vector.dot(&other_vector) / (self_distance * other_distance);
        if cosine > VISIBILITY_ANGLE_THRESHOLD {
            return 0.0;
        }
        VISIBILITY_COST_BASE
            .powf(cosine * (self_distance / other_distance))
            .min(VISIBILITY_COST_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn person(id: &str, x: f64, y: f64) -> Person {
        Person::new(id, Pose::at(x, y))
    }

    #[test]
    fn test_transactional_segment_with_rotation() {
        let p = Person::new("a", Pose::facing(1.0, 1.0, FRAC_PI_2));
        let ts = p.transactional_segment(2.0);
        assert_relative_eq!(ts.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ts.y, 3.0);
    }

    #[test]
    fn test_transactional_segment_without_rotation_is_position() {
        let p = person("a", 1.0, -2.0);
        assert_eq!(p.transactional_segment(5.0), Position2D::new(1.0, -2.0));
    }

    #[test]
    fn test_distance_cost_is_squared_distance_of_segment() {
        let p = Person::new("a", Pose::facing(0.0, 0.0, 0.0));
        // segment at (1, 0), center at (1, 2)
        assert_relative_eq!(p.distance_cost(&Position2D::new(1.0, 2.0), 1.0), 4.0);
    }

    #[test]
    fn test_distance_cost_without_rotation_uses_position() {
        let p = person("a", 0.0, 0.0);
        assert_relative_eq!(p.distance_cost(&Position2D::new(3.0, 4.0), 0.5), 25.0);
    }

    #[rstest]
    #[case::origin(0.0, 0.0)]
    #[case::far(10.0, -3.0)]
    #[case::on_person(2.0, 0.0)]
    fn test_visibility_cost_self_is_zero(#[case] cx: f64, #[case] cy: f64) {
        let p = person("a", 2.0, 0.0);
        assert_eq!(p.visibility_cost(&Position2D::new(cx, cy), &p), 0.0);
    }

    #[test]
    fn test_visibility_cost_other_farther_is_zero() {
        let me = person("a", 1.0, 0.0);
        let other = person("b", 3.0, 0.0);
        assert_eq!(me.visibility_cost(&Position2D::ORIGIN, &other), 0.0);
    }

    #[test]
    fn test_visibility_cost_small_angle_is_zero() {
        let me = person("a", 2.0, 0.0);
        let other = person("b", 1.0, 0.0);
        assert_eq!(me.visibility_cost(&Position2D::ORIGIN, &other), 0.0);
    }

    #[test]
    fn test_visibility_cost_wide_angle() {
        // cos = 2 / (2 * sqrt(2)), d_self / d_other = 2 / sqrt(2) -> 100^1
        let me = person("a", 2.0, 0.0);
        let other = person("b", 1.0, 1.0);
        assert_relative_eq!(
            me.visibility_cost(&Position2D::ORIGIN, &other),
            100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_visibility_cost_perpendicular_is_one() {
        let me = person("a", 2.0, 0.0);
        let other = person("b", 0.0, 1.0);
        assert_relative_eq!(me.visibility_cost(&Position2D::ORIGIN, &other), 1.0);
    }

    #[test]
    fn test_visibility_cost_opposite_side() {
        // cos = -1, ratio 2 -> 100^-2
        let me = person("a", 2.0, 0.0);
        let other = person("b", -1.0, 0.0);
        assert_relative_eq!(me.visibility_cost(&Position2D::ORIGIN, &other), 1e-4);
    }

    #[test]
    fn test_visibility_cost_other_on_center_hits_ceiling() {
        let me = person("a", 2.0, 0.0);
        let other = person("b", 0.0, 0.0);
        assert_eq!(
            me.visibility_cost(&Position2D::ORIGIN, &other),
            VISIBILITY_COST_CEILING
        );
    }

    #[test]
    fn test_visibility_cost_is_capped() {
        // cos ~ 0.707, d_self / d_other ~ 7e5
        let me = person("a", 0.0, 1000.0);
        let other = person("b", 0.001, 0.001);
        assert_eq!(
            me.visibility_cost(&Position2D::ORIGIN, &other),
            VISIBILITY_COST_CEILING
        );
    }

    #[test]
    fn test_rotation_facing_backwards() {
        let p = Person::new("a", Pose::facing(0.0, 0.0, PI));
        let ts = p.transactional_segment(0.5);
        assert_relative_eq!(ts.x, -0.5);
        assert_relative_eq!(ts.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_person_id_ordering() {
        assert!(PersonId::from("1") < PersonId::from("2"));
        assert!(PersonId::from("10") < PersonId::from("2"));
        assert_eq!(PersonId::new("x").to_string(), "x");
    }
}
