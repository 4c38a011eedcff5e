//! Swept collision detection between a moving axis-aligned box and static
//! line obstacles.
//!
//! Architecture:
//! - `types`: `Vec2`, `CollisionInfo`, shared constants
//! - `geometry`: obstacle lines, broadphase rectangles, the moving box
//! - `collision`: corner classification, swept detection, resolution
//! - `scenes`: YAML scene files bundling an actor box with its boundary
//!
//! One tick of the simulation sweeps the box along its velocity, finds the
//! obstacle line it crosses first, and corrects the position so the box
//! rests on the obstacle with the leftover motion sliding along it. The
//! slide is then re-checked against the remaining obstacles up to a
//! configured depth, so a box pushed into a corner settles against both
//! surfaces within a single tick.

pub mod collision;
pub mod geometry;
pub mod scenes;
pub mod types;
