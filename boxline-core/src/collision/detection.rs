//! Swept collision detection for a moving box against obstacle lines.
//!
//! Detects where a box travelling by its per-tick velocity first crosses an
//! obstacle line, computes the corrected resting position (sliding along the
//! obstacle), and recursively re-checks the remaining slide against the
//! other obstacles so the box cannot tunnel into a second surface within
//! the same tick.

use crate::collision::relation::{PointsLineRelation, RelationalState};
use crate::geometry::{Line, MovingBox};
use crate::types::{CollisionInfo, Vec2};

/// Configuration for collision detection.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Number of recursive collision checks to perform. Each level may
    /// contribute at most one collision record; 2 is the minimum that keeps
    /// the resolved slide from tunneling through a second obstacle.
    pub max_depth: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { max_depth: 2 }
    }
}

/// Result of one detection call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The depth budget was zero or negative; nothing was checked. Distinct
    /// from `Clear`, which means the check ran and found no collision.
    NotChecked,
    /// The swept box crosses no obstacle; apply the tentative position.
    Clear,
    /// Ordered collision records, nearest in time first. Never empty, and
    /// never longer than the depth budget.
    Collisions(Vec<CollisionInfo>),
}

impl Outcome {
    pub fn is_clear(&self) -> bool {
        matches!(self, Outcome::Clear)
    }

    /// The collision records, if any were found.
    pub fn collisions(&self) -> Option<&[CollisionInfo]> {
        match self {
            Outcome::Collisions(list) => Some(list),
            _ => None,
        }
    }
}

/// Collision detector for a moving box versus static obstacle lines.
pub struct CollisionDetector {
    pub config: DetectorConfig,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Detect collisions for one tick using the configured depth budget.
    ///
    /// # Arguments
    /// * `moving` - The box to check, carrying its per-tick velocity
    /// * `obstacles` - The obstacle lines (built with `Line::new_static`)
    ///
    /// # Returns
    /// `Clear`, or the ordered collision records for this tick.
    pub fn detect(&self, moving: &MovingBox, obstacles: &[Line]) -> Outcome {
        self.detect_depth(moving, obstacles, self.config.max_depth)
    }

    /// Detect collisions with an explicit depth budget for this call.
    pub fn detect_depth(&self, moving: &MovingBox, obstacles: &[Line], max_depth: i32) -> Outcome {
        if max_depth <= 0 {
            return Outcome::NotChecked;
        }

        // Obstacles resolved at an outer recursion level are excluded from
        // the deeper re-checks, by index into `obstacles`.
        let mut excluded: Vec<usize> = Vec::new();

        match Self::detect_from(moving, obstacles, max_depth, &mut excluded) {
            Some(collisions) => Outcome::Collisions(collisions),
            None => Outcome::Clear,
        }
    }

    fn detect_from(
        moving: &MovingBox,
        obstacles: &[Line],
        depth: i32,
        excluded: &mut Vec<usize>,
    ) -> Option<Vec<CollisionInfo>> {
        if depth <= 0 {
            return None;
        }

        // A box that does not move cannot cross anything; without this the
        // sweep line below would be degenerate.
        if moving.vx() == 0.0 && moving.vy() == 0.0 {
            return None;
        }

        let velocity = moving.velocity();
        let reference = moving.corners()[0];
        let target_corners = moving.target_corners();

        // Movement path of the box's reference corner over this tick.
        let path = Line::new(reference, reference + velocity).ok()?;

        // === Broadphase cull ===
        // Keep only obstacles whose broadphase box overlaps the box's,
        // preserving input order and stable indices.
        let candidates: Vec<usize> = obstacles
            .iter()
            .enumerate()
            .filter(|(_, line)| moving.broadphase().overlaps(&line.broadphase()))
            .map(|(index, _)| index)
            .collect();

        // === First-impact obstacle selection ===
        // Intersect the reference corner's path with every surviving
        // obstacle; the obstacle whose intersection sits closest to the
        // corner's origin (smallest L1 displacement) is hit first.
        let mut first_hit: Option<(usize, f64)> = None;
        let mut behind_targets: Vec<Vec2> = Vec::new();

        for &index in &candidates {
            if excluded.contains(&index) {
                continue;
            }
            let obstacle = &obstacles[index];

            let target_relation = PointsLineRelation::classify(obstacle, &target_corners);
            let origin_relation = PointsLineRelation::classify(obstacle, moving.corners());

            // Target corners all in front: no penetration possible.
            // Current corners all behind: the box is already past this
            // boundary; skipping it means a box can break out of the world
            // but never break back in from behind.
            if target_relation.state == RelationalState::AllInFront
                || origin_relation.state == RelationalState::AllBehind
            {
                continue;
            }

            // Obstacles parallel to the movement path cannot be crossed
            // (typically the obstacle a previous resolution left the box
            // sliding along). Absolute slopes: mirror-slope candidates are
            // dropped as well.
            if path.slope().abs() == obstacle.slope().abs() {
                continue;
            }

            let Some(hit) = Line::intersection(&path, obstacle) else {
                continue;
            };
            let to_origin = reference - hit;
            let disp = to_origin.displacement();

            // Strict less-than: the first candidate found keeps exact ties.
            match first_hit {
                Some((_, best)) if disp >= best => {}
                _ => {
                    first_hit = Some((index, disp));
                    behind_targets = target_relation.behind;
                }
            }
        }

        let (first_index, _) = first_hit?;
        let first = &obstacles[first_index];

        // === Deepest-penetrating corner ===
        // Among the target corners behind the first-impact obstacle, sweep
        // each back-projected origin forward again and keep the pair whose
        // intersection-to-target vector is longest (L1): that corner
        // penetrates the furthest and anchors the correction.
        //
        // Every corner moves with the same velocity, so the sweep slope is
        // computed once and shared.
        let mut sweep_slope: Option<f64> = None;
        let mut deepest: Option<(Vec2, Vec2, Vec2, f64)> = None;

        for &target in &behind_targets {
            let origin = target - velocity;
            let sweep = match sweep_slope {
                None => {
                    let line = Line::new(origin, target).ok()?;
                    sweep_slope = Some(line.slope());
                    line
                }
                Some(slope) => Line::with_slope(origin, target, slope),
            };

            let Some(hit) = Line::intersection(&sweep, first) else {
                continue;
            };
            let to_target = target - hit;
            let disp = to_target.displacement();

            // Strict greater-than keeps the first of equally deep corners.
            match deepest {
                Some((_, _, _, best)) if disp <= best => {}
                _ => deepest = Some((origin, hit, to_target, disp)),
            }
        }

        let (origin, intersection, to_target, _) = deepest?;

        // === Projection onto the obstacle ===
        // The penetration vector projected onto the obstacle's direction is
        // the slide allowed after contact; its endpoint on the line is the
        // corrected position of the winning corner.
        let slide_offset = to_target.project_onto(&first.direction());
        let projected = intersection + slide_offset;
        let correction = projected - origin;
        let corrected_origin = moving.position() + correction;

        let info = CollisionInfo {
            origin,
            target: origin + velocity,
            intersection,
            correction,
            projected,
            corrected_origin,
        };

        let mut collected = vec![info];

        // === Recursive re-check of the remaining slide ===
        // Skipped on the last level: a deeper call would only decrement the
        // budget and bail, wasting the probe-box setup.
        if depth - 1 > 0 {
            excluded.push(first_index);

            let advance = intersection - origin;
            let slide = projected - intersection;

            // The box advanced to the impact point, sweeping the remaining
            // slide distance along the resolved surface.
            let probe = MovingBox::new(
                moving.x() + advance.x,
                moving.y() + advance.y,
                moving.w(),
                moving.h(),
                slide.x,
                slide.y,
            );

            if let Some(more) = Self::detect_from(&probe, obstacles, depth - 1, excluded) {
                collected.extend(more);
            }
        }

        Some(collected)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::resolution::CollisionResolver;
    use crate::scenes::Scene;

    /// Horizontal floor at y = 500; boxes above it are on the in-front side.
    fn floor() -> Line {
        Line::new_static(Vec2::new(0.0, 500.0), Vec2::new(500.0, 500.0)).unwrap()
    }

    /// Vertical wall at x = 480, oriented so boxes to its left are in front.
    fn wall() -> Line {
        Line::new_static(Vec2::new(480.0, 600.0), Vec2::new(480.0, 0.0)).unwrap()
    }

    #[test]
    fn test_head_on_stop() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 100.0);

        let outcome = detector.detect(&moving, &[floor()]);
        let collisions = outcome.collisions().expect("should collide with floor");
        assert_eq!(collisions.len(), 1);

        let info = &collisions[0];
        assert_eq!(info.origin, Vec2::new(100.0, 430.0));
        assert_eq!(info.target, Vec2::new(100.0, 530.0));
        assert_eq!(info.intersection, Vec2::new(100.0, 500.0));
        // Perpendicular impact: nothing to slide, projection collapses.
        assert_eq!(info.projected, info.intersection);
        assert_eq!(info.correction, Vec2::new(0.0, 70.0));

        // Corrected box bottom lands exactly on the boundary.
        assert_eq!(info.corrected_origin, Vec2::new(100.0, 470.0));
        assert_eq!(info.corrected_origin.y + moving.h(), 500.0);
    }

    #[test]
    fn test_parallel_obstacle_is_never_first_impact() {
        let detector = CollisionDetector::new();
        // Obstacle along the movement direction; broadphases overlap and
        // the corner classification is mixed, so only the slope check can
        // be rejecting it.
        let diagonal = Line::new_static(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)).unwrap();
        let moving = MovingBox::new(10.0, 10.0, 30.0, 30.0, 30.0, 30.0);
        assert!(moving.broadphase().overlaps(&diagonal.broadphase()));

        assert!(detector.detect(&moving, &[diagonal]).is_clear());
    }

    #[test]
    fn test_mirror_slope_obstacle_is_skipped() {
        let detector = CollisionDetector::new();
        // Slope -1 against a velocity of slope +1: absolute slopes match,
        // so the candidate is dropped even though the lines do cross.
        let mirrored = Line::new_static(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)).unwrap();
        let moving = MovingBox::new(10.0, 10.0, 30.0, 30.0, 30.0, 30.0);

        assert!(detector.detect(&moving, &[mirrored]).is_clear());
    }

    #[test]
    fn test_free_space_is_clear() {
        let detector = CollisionDetector::new();
        // Stops 20 units short of the floor.
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 50.0);
        assert!(detector.detect(&moving, &[floor()]).is_clear());
    }

    #[test]
    fn test_zero_velocity_short_circuits() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::stationary(100.0, 490.0, 20.0, 30.0);
        assert!(detector.detect(&moving, &[floor()]).is_clear());
    }

    #[test]
    fn test_depth_budget_of_zero_is_not_checked() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 100.0);

        assert_eq!(
            detector.detect_depth(&moving, &[floor()], 0),
            Outcome::NotChecked
        );
        assert_eq!(
            detector.detect_depth(&moving, &[floor()], -1),
            Outcome::NotChecked
        );
    }

    #[test]
    fn test_broadphase_filter_is_lossless() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 100.0);

        // An obstacle far outside the swept extent.
        let far = Line::new_static(Vec2::new(1000.0, 1000.0), Vec2::new(1100.0, 1000.0)).unwrap();
        assert!(!moving.broadphase().overlaps(&far.broadphase()));

        let with_far = detector.detect(&moving, &[far, floor()]);
        let without_far = detector.detect(&moving, &[floor()]);
        assert_eq!(with_far.collisions(), without_far.collisions());
    }

    #[test]
    fn test_corner_impact_yields_two_ordered_collisions() {
        let detector = CollisionDetector::new();
        // Driven down-right into the floor/wall corner; the wall is hit
        // first, then the remaining slide down the wall hits the floor.
        let moving = MovingBox::new(400.0, 440.0, 20.0, 30.0, 100.0, 40.0);

        let outcome = detector.detect(&moving, &[floor(), wall()]);
        let collisions = outcome.collisions().expect("should hit the corner");
        assert_eq!(collisions.len(), 2);

        let wall_hit = &collisions[0];
        assert_eq!(wall_hit.origin, Vec2::new(420.0, 440.0));
        assert_eq!(wall_hit.intersection, Vec2::new(480.0, 464.0));
        assert_eq!(wall_hit.projected, Vec2::new(480.0, 480.0));
        assert_eq!(wall_hit.corrected_origin, Vec2::new(460.0, 480.0));

        let floor_hit = &collisions[1];
        assert_eq!(floor_hit.origin, Vec2::new(460.0, 494.0));
        assert_eq!(floor_hit.intersection, Vec2::new(460.0, 500.0));
        assert_eq!(floor_hit.corrected_origin, Vec2::new(460.0, 470.0));

        // Final position touches both surfaces without crossing either.
        let resting = CollisionResolver::resolve(&moving, collisions);
        assert_eq!(resting.x() + resting.w(), 480.0);
        assert_eq!(resting.y() + resting.h(), 500.0);
    }

    #[test]
    fn test_result_length_bounded_by_depth() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::new(400.0, 440.0, 20.0, 30.0, 100.0, 40.0);
        let obstacles = [floor(), wall()];

        for depth in 1..=4 {
            if let Some(list) = detector.detect_depth(&moving, &obstacles, depth).collisions() {
                assert!(list.len() <= depth as usize);
            }
        }

        // With a budget of 1 only the wall impact is reported.
        let single = detector.detect_depth(&moving, &obstacles, 1);
        assert_eq!(single.collisions().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_resting_position_is_idempotent() {
        let detector = CollisionDetector::new();
        let moving = MovingBox::new(100.0, 400.0, 20.0, 30.0, 0.0, 100.0);
        let obstacles = [floor()];

        let outcome = detector.detect(&moving, &obstacles);
        let corrected = outcome.collisions().expect("should collide")[0].corrected_origin;

        // Re-check from the corrected position with the velocity spent.
        let settled = moving
            .moved_to(corrected.x, corrected.y)
            .with_velocity(0.0, 0.0);
        assert!(detector.detect(&settled, &obstacles).is_clear());
    }

    #[test]
    fn test_octagon_arena_scenario() {
        let scene = Scene::octagon_arena();
        let moving = scene.actor_box();
        let boundary = scene.boundary_lines().unwrap();

        let detector = CollisionDetector::new();
        let outcome = detector.detect_depth(&moving, &boundary, 3);
        let collisions = outcome.collisions().expect("demo box must collide");
        assert!(!collisions.is_empty() && collisions.len() <= 3);

        // The deepest corner (bottom-left) anchors the correction against
        // the bottom segment (400,400)-(500,400).
        let info = &collisions[0];
        assert_eq!(info.origin, Vec2::new(400.0, 430.0));

        // The intersection lies on the infinite line through the segment's
        // endpoints (y = 400) but outside its endpoint range: intersections
        // are intentionally not clamped to segment extents.
        assert_eq!(info.intersection, Vec2::new(370.0, 400.0));
        assert_eq!(info.projected, Vec2::new(450.0, 400.0));

        // Corrected box slides right along the boundary and rests on it.
        assert_eq!(info.corrected_origin, Vec2::new(450.0, 370.0));
        assert_eq!(info.corrected_origin.y + moving.h(), 400.0);
    }

    #[test]
    fn test_box_behind_boundary_is_ignored() {
        let detector = CollisionDetector::new();
        // Entirely below the floor line and moving further down: the box is
        // already past the boundary and may leave, but is never pushed back.
        let moving = MovingBox::new(100.0, 520.0, 20.0, 30.0, 0.0, 50.0);
        assert!(detector.detect(&moving, &[floor()]).is_clear());
    }
}
