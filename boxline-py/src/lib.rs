//! Python bindings for the boxline collision core.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from boxline import Simulation
//!
//! sim = Simulation()  # octagon demo scene
//! sim.set_velocity(50.0, 50.0)
//!
//! for _ in range(100):
//!     sim.step()
//!     x, y = sim.box_position().to_tuple()
//!     print(f"Box at ({x}, {y})")
//! ```

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use boxline_core::collision::{CollisionDetector, CollisionResolver, Outcome};
use boxline_core::geometry::{Line, MovingBox};
use boxline_core::scenes::Scene;
use boxline_core::types::Vec2 as CoreVec2;

/// 2D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for CoreVec2 {
    fn from(v: Vec2) -> Self {
        CoreVec2::new(v.x, v.y)
    }
}

fn point_pair(v: CoreVec2) -> (f64, f64) {
    (v.x, v.y)
}

/// Main simulation class.
///
/// Holds one moving box and a set of boundary lines, and steps the box one
/// tick at a time with collision resolution.
#[pyclass]
pub struct Simulation {
    boxed: MovingBox,
    boundary: Vec<Line>,
    detector: CollisionDetector,
}

#[pymethods]
impl Simulation {
    /// Create a simulation preloaded with the octagon demo scene.
    #[new]
    fn new() -> PyResult<Self> {
        let scene = Scene::octagon_arena();
        let boundary = scene
            .boundary_lines()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            boxed: scene.actor_box(),
            boundary,
            detector: CollisionDetector::new(),
        })
    }

    /// Top-left corner of the box.
    fn box_position(&self) -> Vec2 {
        self.boxed.position().into()
    }

    /// Per-tick velocity of the box.
    fn box_velocity(&self) -> Vec2 {
        self.boxed.velocity().into()
    }

    /// Box size as (w, h).
    fn box_size(&self) -> (f64, f64) {
        (self.boxed.w(), self.boxed.h())
    }

    /// Replace the box, keeping its current velocity.
    fn set_box(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.boxed = MovingBox::new(x, y, w, h, self.boxed.vx(), self.boxed.vy());
    }

    /// Move the box without touching size or velocity.
    fn set_box_position(&mut self, x: f64, y: f64) {
        self.boxed = self.boxed.moved_to(x, y);
    }

    /// Set the box's per-tick velocity.
    fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.boxed = self.boxed.with_velocity(vx, vy);
    }

    /// Remove all boundary lines.
    fn clear_boundary(&mut self) {
        self.boundary.clear();
    }

    /// Append a boundary line from (x0, y0) to (x1, y1).
    ///
    /// The in-front side is to the left of the direction of travel.
    fn add_boundary_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> PyResult<()> {
        let line = Line::new_static(CoreVec2::new(x0, y0), CoreVec2::new(x1, y1))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.boundary.push(line);
        Ok(())
    }

    /// Number of boundary lines.
    fn boundary_len(&self) -> usize {
        self.boundary.len()
    }

    /// Recursion depth budget of the detector.
    #[getter]
    fn max_depth(&self) -> i32 {
        self.detector.config.max_depth
    }

    #[setter]
    fn set_max_depth(&mut self, depth: i32) {
        self.detector.config.max_depth = depth;
    }

    /// Run detection without moving the box.
    ///
    /// Returns one dict per collision record, nearest impact first; an
    /// empty list means the path is clear.
    fn detect(&self) -> Vec<HashMap<&'static str, (f64, f64)>> {
        match self.detector.detect(&self.boxed, &self.boundary) {
            Outcome::Collisions(list) => list
                .iter()
                .map(|info| {
                    HashMap::from([
                        ("origin", point_pair(info.origin)),
                        ("target", point_pair(info.target)),
                        ("intersection", point_pair(info.intersection)),
                        ("correction", point_pair(info.correction)),
                        ("projected", point_pair(info.projected)),
                        ("corrected_origin", point_pair(info.corrected_origin)),
                    ])
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Advance the box by one tick, resolving collisions.
    ///
    /// Returns the number of collisions resolved this tick (0 if the path
    /// was clear).
    fn step(&mut self) -> usize {
        let outcome = self.detector.detect(&self.boxed, &self.boundary);
        let count = outcome.collisions().map_or(0, <[_]>::len);
        self.boxed = CollisionResolver::step(&self.boxed, &outcome);
        count
    }

    /// Run multiple ticks, returning the total collision count.
    fn step_n(&mut self, ticks: usize) -> usize {
        (0..ticks).map(|_| self.step()).sum()
    }

    /// Reset to the octagon demo scene.
    fn reset(&mut self) -> PyResult<()> {
        let scene = Scene::octagon_arena();
        self.boundary = scene
            .boundary_lines()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.boxed = scene.actor_box();
        Ok(())
    }

    /// Current state as a dict for easy inspection.
    fn state_dict(&self) -> HashMap<&'static str, f64> {
        HashMap::from([
            ("x", self.boxed.x()),
            ("y", self.boxed.y()),
            ("w", self.boxed.w()),
            ("h", self.boxed.h()),
            ("vx", self.boxed.vx()),
            ("vy", self.boxed.vy()),
        ])
    }
}

/// Python module definition.
#[pymodule]
fn boxline(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
