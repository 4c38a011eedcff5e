//! Applying collision records back to the moving box.
//!
//! The detector reports where the box should end up; this module turns those
//! records into a new box state. Corrected positions in the records are
//! absolute, so resolving a chain of collisions only needs the last record.

use crate::collision::detection::Outcome;
use crate::geometry::MovingBox;
use crate::types::CollisionInfo;

/// Turns detector output into updated box states.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Apply a single collision record: the box moves to the corrected
    /// position and its velocity becomes the remaining slide along the
    /// obstacle.
    pub fn apply(moving: &MovingBox, info: &CollisionInfo) -> MovingBox {
        let slide = info.slide();
        MovingBox::new(
            info.corrected_origin.x,
            info.corrected_origin.y,
            moving.w(),
            moving.h(),
            slide.x,
            slide.y,
        )
    }

    /// Resolve an ordered collision chain for one tick.
    ///
    /// Each record's `corrected_origin` already accounts for the records
    /// before it, so the last record decides the resting position.
    pub fn resolve(moving: &MovingBox, collisions: &[CollisionInfo]) -> MovingBox {
        match collisions.last() {
            Some(last) => Self::apply(moving, last),
            None => moving.clone(),
        }
    }

    /// Advance the box by one tick given a detection outcome: collisions
    /// resolve to the corrected position, otherwise the velocity is applied
    /// unchanged. `NotChecked` leaves the box where it is.
    pub fn step(moving: &MovingBox, outcome: &Outcome) -> MovingBox {
        match outcome {
            Outcome::Collisions(list) => Self::resolve(moving, list),
            Outcome::Clear => moving.moved_to(moving.x() + moving.vx(), moving.y() + moving.vy()),
            Outcome::NotChecked => moving.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detection::CollisionDetector;
    use crate::geometry::Line;
    use crate::types::Vec2;

    fn floor() -> Line {
        Line::new_static(Vec2::new(0.0, 500.0), Vec2::new(500.0, 500.0)).unwrap()
    }

    #[test]
    fn test_apply_moves_to_corrected_position() {
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 100.0);
        let info = CollisionInfo {
            origin: Vec2::new(100.0, 430.0),
            target: Vec2::new(100.0, 530.0),
            intersection: Vec2::new(100.0, 500.0),
            correction: Vec2::new(0.0, 70.0),
            projected: Vec2::new(100.0, 500.0),
            corrected_origin: Vec2::new(100.0, 470.0),
        };

        let resolved = CollisionResolver::apply(&moving, &info);
        assert_eq!(resolved.position(), Vec2::new(100.0, 470.0));
        assert_eq!(resolved.w(), 20.0);
        assert_eq!(resolved.h(), 30.0);
        // Head-on impact leaves no slide.
        assert_eq!(resolved.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_resolve_empty_chain_is_identity() {
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 5.0, 5.0);
        let resolved = CollisionResolver::resolve(&moving, &[]);
        assert_eq!(resolved.position(), moving.position());
        assert_eq!(resolved.velocity(), moving.velocity());
    }

    #[test]
    fn test_step_clear_applies_velocity() {
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 10.0, -5.0);
        let stepped = CollisionResolver::step(&moving, &Outcome::Clear);
        assert_eq!(stepped.position(), Vec2::new(110.0, 395.0));
        assert_eq!(stepped.velocity(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_step_not_checked_is_identity() {
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 10.0, -5.0);
        let stepped = CollisionResolver::step(&moving, &Outcome::NotChecked);
        assert_eq!(stepped.position(), moving.position());
    }

    #[test]
    fn test_step_settles_on_floor() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 100.0);
        let obstacles = [floor()];

        let outcome = detector.detect(&moving, &obstacles);
        let settled = CollisionResolver::step(&moving, &outcome);

        assert_eq!(settled.y() + settled.h(), 500.0);
        assert_eq!(settled.velocity(), Vec2::ZERO);

        // A further tick from the resting state changes nothing.
        let next = detector.detect(&settled, &obstacles);
        let again = CollisionResolver::step(&settled, &next);
        assert_eq!(again.position(), settled.position());
    }
}
