//! Core value types for the collision simulation.
//!
//! Coordinate system follows screen conventions:
//! - X: horizontal (positive to the right)
//! - Y: vertical (positive downward)
//!
//! All quantities are in world units per tick; a velocity is the full
//! displacement applied over one simulation step.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D point/vector used for positions, velocities, and directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Project this vector onto another, possibly non-unit, vector.
    ///
    /// The result is a translation relative to the start of `other`; add it
    /// to an absolute point to obtain the projected point.
    pub fn project_onto(&self, other: &Self) -> Self {
        let other_mag_sq = other.magnitude_squared();
        if other_mag_sq < constants::EPSILON {
            Self::ZERO
        } else {
            *other * (self.dot(other) / other_mag_sq)
        }
    }

    /// Project this vector onto a vector already known to be unit length.
    pub fn project_onto_unit(&self, other: &Self) -> Self {
        *other * self.dot(other)
    }

    /// Perpendicular vector on the left-hand side: `(y, -x)`.
    ///
    /// `(x, y) · (y, -x) = x*y - x*y = 0`
    pub fn ortho_left(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Perpendicular vector on the right-hand side: `(-y, x)`.
    pub fn ortho_right(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Absolute total displacement of the vector: `|x| + |y|`.
    ///
    /// This is an L1 metric, not Euclidean distance. The detector uses it
    /// for all nearest/deepest comparisons, so swapping in `magnitude`
    /// would change tie-break outcomes.
    pub fn displacement(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }
}

// Operator overloads for Vec2
impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Collision Info
// =============================================================================

/// Record of one resolved collision between a moving box and an obstacle line.
///
/// Instances are produced by the detector and consumed immediately by the
/// caller; they are never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// The corner of the box from which the winning sweep started.
    pub origin: Vec2,

    /// Where `origin` would have ended up with the velocity applied.
    pub target: Vec2,

    /// The point on the obstacle line where the sweep crosses it.
    ///
    /// Intersections are computed against the infinite line through the
    /// obstacle's endpoints, so this point may fall outside the segment.
    pub intersection: Vec2,

    /// Translation from `origin` to the corrected position.
    pub correction: Vec2,

    /// End of the penetration vector projected onto the obstacle line.
    pub projected: Vec2,

    /// Absolute top-left coordinates where the box ends up once this
    /// collision is resolved. With multiple records these can be applied
    /// directly, without retracing the path.
    pub corrected_origin: Vec2,
}

impl CollisionInfo {
    /// Velocity left over after the impact: the slide along the obstacle
    /// from the intersection point to the projected point.
    pub fn slide(&self) -> Vec2 {
        self.projected - self.intersection
    }
}

// =============================================================================
// Constants
// =============================================================================

/// Numeric constants used across the crate.
pub mod constants {
    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
