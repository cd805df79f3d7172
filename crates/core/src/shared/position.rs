use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point (or vector) in the 2D ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub const ORIGIN: Position2D = Position2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `radians`.
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    pub fn dot(&self, other: &Position2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn squared_norm(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Returns `None` for the zero vector.
    pub fn normalized(&self) -> Option<Position2D> {
        let n = self.norm();
        if n == 0.0 {
            None
        } else {
            Some(*self * (1.0 / n))
        }
    }

    /// Counter-clockwise perpendicular.
    pub fn perpendicular(&self) -> Position2D {
        Position2D::new(-self.y, self.x)
    }

    pub fn distance(&self, other: &Position2D) -> f64 {
        (*self - *other).norm()
    }

    pub fn squared_distance(&self, other: &Position2D) -> f64 {
        (*self - *other).squared_norm()
    }

    pub fn midpoint(&self, other: &Position2D) -> Position2D {
        (*self + *other) * 0.5
    }

    /// Arithmetic mean of the given points, `None` if there are none.
    pub fn mean<'a, I>(points: I) -> Option<Position2D>
    where
        I: IntoIterator<Item = &'a Position2D>,
    {
        let mut sum = Position2D::ORIGIN;
        let mut count = 0usize;
        for p in points {
            sum += *p;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum * (1.0 / count as f64))
        }
    }
}

impl Add for Position2D {
    type Output = Position2D;

    fn add(self, rhs: Position2D) -> Position2D {
        Position2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position2D {
    fn add_assign(&mut self, rhs: Position2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position2D {
    type Output = Position2D;

    fn sub(self, rhs: Position2D) -> Position2D {
        Position2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Position2D {
    type Output = Position2D;

    fn mul(self, rhs: f64) -> Position2D {
        Position2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Position2D {
    type Output = Position2D;

    fn neg(self) -> Position2D {
        Position2D::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Position2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic() {
        let a = Position2D::new(1.0, 2.0);
        let b = Position2D::new(3.0, -1.0);
        assert_eq!(a + b, Position2D::new(4.0, 1.0));
        assert_eq!(a - b, Position2D::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Position2D::new(2.0, 4.0));
        assert_eq!(-a, Position2D::new(-1.0, -2.0));
    }

    #[test]
    fn test_dot_and_norm() {
        let a = Position2D::new(3.0, 4.0);
        assert_relative_eq!(a.dot(&Position2D::new(1.0, 0.0)), 3.0);
        assert_relative_eq!(a.squared_norm(), 25.0);
        assert_relative_eq!(a.norm(), 5.0);
    }

    #[test]
    fn test_normalized() {
        let n = Position2D::new(0.0, 2.0).normalized().unwrap();
        assert_relative_eq!(n.x, 0.0);
        assert_relative_eq!(n.y, 1.0);
        assert!(Position2D::ORIGIN.normalized().is_none());
    }

    #[test]
    fn test_perpendicular_is_orthogonal() {
        let a = Position2D::new(2.0, 5.0);
        assert_relative_eq!(a.dot(&a.perpendicular()), 0.0);
        assert_eq!(Position2D::new(1.0, 0.0).perpendicular(), Position2D::new(0.0, 1.0));
    }

    #[test]
    fn test_from_angle() {
        let p = Position2D::from_angle(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn test_mean() {
        let points = [Position2D::new(0.0, 0.0), Position2D::new(2.0, 4.0)];
        assert_eq!(Position2D::mean(&points), Some(Position2D::new(1.0, 2.0)));
        assert_eq!(Position2D::mean(&[]), None);
    }
}
