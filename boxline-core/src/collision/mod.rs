//! Collision detection and resolution.
//!
//! The pipeline for one simulation tick:
//!
//! 1. `relation` classifies box corners against each obstacle line to rule
//!    out obstacles the box cannot cross this tick.
//! 2. `detection` sweeps the box along its velocity, picks the obstacle hit
//!    first and the corner that penetrates deepest, and emits an ordered
//!    chain of collision records (recursing on the remaining slide).
//! 3. `resolution` applies the records, leaving the box resting against the
//!    obstacle with the slide as its remaining velocity.

pub mod detection;
pub mod relation;
pub mod resolution;

pub use detection::*;
pub use relation::*;
pub use resolution::*;
