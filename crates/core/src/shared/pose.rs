use super::position::Position2D;

/// Rotation around the vertical axis, in radians.
pub type RotationRadian = f64;

/// Position plus an optional facing direction.
///
/// A missing rotation means the orientation of the person is unknown
/// in this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Position2D,
    pub rotation: Option<RotationRadian>,
}

impl Pose {
    pub fn new(position: Position2D, rotation: Option<RotationRadian>) -> Self {
        Self { position, rotation }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Position2D::new(x, y), None)
    }

    pub fn facing(x: f64, y: f64, rotation: RotationRadian) -> Self {
        Self::new(Position2D::new(x, y), Some(rotation))
    }

    pub fn without_rotation(&self) -> Self {
        Self::new(self.position, None)
    }
}
