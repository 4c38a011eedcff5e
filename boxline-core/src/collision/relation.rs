//! Point-vs-line classification.
//!
//! For each point, the sign of `dot(line.normal, point - line.p0)` tells
//! which side of the line the point sits on. The detector runs this twice
//! per obstacle candidate: once on the box's swept target corners (would any
//! corner end up behind the line?) and once on its current corners (is the
//! box already past this boundary?).

use crate::geometry::Line;
use crate::types::Vec2;

/// How a point set relates to a line, as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalState {
    /// Every point is in front of the line.
    AllInFront,
    /// Every point is behind the line.
    AllBehind,
    /// Points on both sides.
    Mixed,
}

/// Partition of a point set into in-front-of / behind a line.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsLineRelation {
    pub state: RelationalState,
    pub in_front: Vec<Vec2>,
    pub behind: Vec<Vec2>,
}

impl PointsLineRelation {
    /// Classify `points` against `line`.
    ///
    /// A dot product of exactly zero (point on the line) counts as in front.
    pub fn classify(line: &Line, points: &[Vec2]) -> Self {
        let normal = line.normal();
        let p0 = line.p0();

        let mut in_front = Vec::new();
        let mut behind = Vec::new();

        for &point in points {
            let dp = normal.dot(&(point - p0));
            if dp >= 0.0 {
                in_front.push(point);
            } else {
                behind.push(point);
            }
        }

        let state = if !in_front.is_empty() && !behind.is_empty() {
            RelationalState::Mixed
        } else if !in_front.is_empty() {
            RelationalState::AllInFront
        } else {
            RelationalState::AllBehind
        };

        Self {
            state,
            in_front,
            behind,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
