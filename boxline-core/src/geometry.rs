//! World geometry: obstacle lines, broadphase rectangles, and the moving box.
//!
//! Obstacle lines are built once with `Line::new_static` so their normal and
//! broadphase box are precomputed; transient lines created mid-algorithm
//! (movement paths) skip that work. `MovingBox` keeps its corner points and
//! broadphase box consistent with its scalars by being rebuilt through pure
//! update methods instead of field setters.

use crate::types::Vec2;
use std::fmt;

// =============================================================================
// Errors
// =============================================================================

/// Error type for malformed geometry input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Both endpoints of a line coincide; the slope would be `0/0`.
    DegenerateLine { at: Vec2 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateLine { at } => {
                write!(f, "degenerate line: both endpoints at ({}, {})", at.x, at.y)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

// =============================================================================
// Broadphase Box
// =============================================================================

/// A cheap axis-aligned rectangle used only to discard non-colliding pairs
/// before the precise checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BroadphaseBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BroadphaseBox {
    /// Rectangle enclosing a box at `(x, y)` of size `(w, h)` together with
    /// its velocity-displaced target rectangle.
    pub fn from_motion(x: f64, y: f64, w: f64, h: f64, vx: f64, vy: f64) -> Self {
        let (bx, bw) = if vx >= 0.0 { (x, w + vx) } else { (x + vx, w - vx) };
        let (by, bh) = if vy >= 0.0 { (y, h + vy) } else { (y + vy, h - vy) };
        Self {
            x: bx,
            y: by,
            w: bw,
            h: bh,
        }
    }

    /// Rectangle bounding a segment's two endpoints.
    pub fn from_segment(p0: Vec2, p1: Vec2) -> Self {
        let (x, w) = if p1.x < p0.x {
            (p1.x, p0.x - p1.x)
        } else {
            (p0.x, p1.x - p0.x)
        };
        let (y, h) = if p1.y < p0.y {
            (p1.y, p0.y - p1.y)
        } else {
            (p0.y, p1.y - p0.y)
        };
        Self { x, y, w, h }
    }

    /// Overlap test, inclusive on touching edges.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.x > other.x + other.w
            || self.x + self.w < other.x
            || self.y > other.y + other.h
            || self.y + self.h < other.y)
    }
}

// =============================================================================
// Line
// =============================================================================

/// A line segment, or one face of a polygon, immutable after construction.
///
/// Mathematically the line is treated as infinite: intersections are
/// computed against the line through `p0` and `p1`, never clamped to the
/// segment's extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    p0: Vec2,
    p1: Vec2,
    /// Direction vector flowing from `p0` to `p1`.
    direction: Vec2,
    slope: f64,
    /// Y-intercept of the infinite line at the stored slope.
    axis_shift: f64,
    parallel_to_x: bool,
    parallel_to_y: bool,
    /// Perpendicular to `direction`, un-normalized; points toward the
    /// line's left-hand (in-front) side. Precomputed for static lines.
    normal: Option<Vec2>,
    /// Precomputed for static lines.
    broadphase: Option<BroadphaseBox>,
}

impl Line {
    /// A transient line; normal and broadphase box are not precomputed.
    pub fn new(p0: Vec2, p1: Vec2) -> Result<Self, GeometryError> {
        if p0 == p1 {
            return Err(GeometryError::DegenerateLine { at: p0 });
        }
        Ok(Self::build(p0, p1, Self::slope_between(p0, p1), false))
    }

    /// A long-lived obstacle line with normal and broadphase box computed
    /// once, up front. Obstacles never change for the process lifetime, so
    /// this work is never repeated.
    pub fn new_static(p0: Vec2, p1: Vec2) -> Result<Self, GeometryError> {
        if p0 == p1 {
            return Err(GeometryError::DegenerateLine { at: p0 });
        }
        Ok(Self::build(p0, p1, Self::slope_between(p0, p1), true))
    }

    /// A transient line with an externally supplied slope.
    ///
    /// Used when many lines share one direction (the per-corner sweep paths
    /// of a moving box) and the slope has already been computed once.
    pub fn with_slope(p0: Vec2, p1: Vec2, slope: f64) -> Self {
        Self::build(p0, p1, slope, false)
    }

    fn build(p0: Vec2, p1: Vec2, slope: f64, is_static: bool) -> Self {
        let direction = p1 - p0;
        let parallel_to_x = slope == 0.0;
        let parallel_to_y = slope.is_infinite();
        Self {
            p0,
            p1,
            direction,
            slope,
            axis_shift: Self::axis_shift_at(p0, slope),
            parallel_to_x,
            parallel_to_y,
            normal: is_static.then(|| direction.ortho_left()),
            broadphase: is_static.then(|| BroadphaseBox::from_segment(p0, p1)),
        }
    }

    /// Slope between two points: `(p1.y - p0.y) / (p1.x - p0.x)`.
    pub fn slope_between(p0: Vec2, p1: Vec2) -> f64 {
        (p1.y - p0.y) / (p1.x - p0.x)
    }

    /// Y-intercept of the line through `p` with the given slope.
    pub fn axis_shift_at(p: Vec2, slope: f64) -> f64 {
        p.y - slope * p.x
    }

    pub fn p0(&self) -> Vec2 {
        self.p0
    }

    pub fn p1(&self) -> Vec2 {
        self.p1
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn axis_shift(&self) -> f64 {
        self.axis_shift
    }

    pub fn parallel_to_x(&self) -> bool {
        self.parallel_to_x
    }

    pub fn parallel_to_y(&self) -> bool {
        self.parallel_to_y
    }

    /// The line's normal: precomputed for static lines, derived on the fly
    /// for transient ones.
    pub fn normal(&self) -> Vec2 {
        self.normal.unwrap_or_else(|| self.direction.ortho_left())
    }

    /// The line's broadphase box: precomputed for static lines, derived on
    /// the fly for transient ones.
    pub fn broadphase(&self) -> BroadphaseBox {
        self.broadphase
            .unwrap_or_else(|| BroadphaseBox::from_segment(self.p0, self.p1))
    }

    /// Y coordinate on this line for the given x coordinate.
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.axis_shift
    }

    /// Point of intersection of two infinite lines.
    ///
    /// Returns `None` when the slopes are exactly equal (parallel lines,
    /// including two lines parallel to the same axis). Slope equality is an
    /// exact floating-point comparison; near-parallel lines pass the check
    /// and can yield numerically unstable intersection points. This is a
    /// known precision limitation.
    pub fn intersection(a: &Line, b: &Line) -> Option<Vec2> {
        // Non-axis-aligned lines:       x = (b2 - b1) / (m1 - m2)
        // X-parallel `b` against `a`:   x = (b2 - b1) / m1
        if b.slope == a.slope {
            return None;
        }

        let mut x;
        let mut y;

        // X-axis parallelism.
        if b.parallel_to_x {
            x = (b.axis_shift - a.axis_shift) / a.slope;
        } else if a.parallel_to_x {
            x = (a.axis_shift - b.axis_shift) / b.slope;
        } else {
            x = (b.axis_shift - a.axis_shift) / (a.slope - b.slope);
        }

        // Y-axis parallelism: the vertical line fixes x, the other line
        // supplies y.
        if b.parallel_to_y {
            x = b.p0.x;
            y = a.y_at(x);
        } else if a.parallel_to_y {
            x = a.p0.x;
            y = b.y_at(x);
        } else {
            y = b.y_at(x);
        }

        // Perpendicular axis-parallel pair: the intersection is simply the
        // combination of the fixed coordinates.
        if a.parallel_to_x && b.parallel_to_y {
            x = b.p0.x;
            y = a.p0.y;
        } else if a.parallel_to_y && b.parallel_to_x {
            x = a.p0.x;
            y = b.p0.y;
        }

        Some(Vec2::new(x, y))
    }
}

// =============================================================================
// Moving Box
// =============================================================================

/// An axis-aligned box with position, size, and per-tick velocity.
///
/// The four corner points (`[TL, TR, BL, BR]`) and the broadphase box are
/// derived state, recomputed on construction. Updates go through the pure
/// `moved_to` / `with_velocity` / `with_size` methods, which return a fresh
/// box; partial staleness is never observable.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    vx: f64,
    vy: f64,
    corners: [Vec2; 4],
    broadphase: BroadphaseBox,
}

impl MovingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64, vx: f64, vy: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            vx,
            vy,
            corners: [
                Vec2::new(x, y),
                Vec2::new(x + w, y),
                Vec2::new(x, y + h),
                Vec2::new(x + w, y + h),
            ],
            broadphase: BroadphaseBox::from_motion(x, y, w, h, vx, vy),
        }
    }

    /// A box with zero velocity.
    pub fn stationary(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, w, h, 0.0, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn vx(&self) -> f64 {
        self.vx
    }

    pub fn vy(&self) -> f64 {
        self.vy
    }

    /// Top-left corner, the box's reference point.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    /// Corner points in `[TL, TR, BL, BR]` order.
    pub fn corners(&self) -> &[Vec2; 4] {
        &self.corners
    }

    /// Corner points displaced by the velocity: where each corner ends up
    /// at the end of the tick.
    pub fn target_corners(&self) -> [Vec2; 4] {
        let v = self.velocity();
        [
            self.corners[0] + v,
            self.corners[1] + v,
            self.corners[2] + v,
            self.corners[3] + v,
        ]
    }

    pub fn broadphase(&self) -> &BroadphaseBox {
        &self.broadphase
    }

    /// The box repositioned at `(x, y)`, derived state rebuilt.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self::new(x, y, self.w, self.h, self.vx, self.vy)
    }

    /// The box with a new velocity, derived state rebuilt.
    pub fn with_velocity(&self, vx: f64, vy: f64) -> Self {
        Self::new(self.x, self.y, self.w, self.h, vx, vy)
    }

    /// The box resized, derived state rebuilt.
    pub fn with_size(&self, w: f64, h: f64) -> Self {
        Self::new(self.x, self.y, w, h, self.vx, self.vy)
    }
}

// =============================================================================
// Tests
// =============================================================================
