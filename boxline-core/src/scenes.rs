//! Scene definitions loaded from YAML files.
//!
//! A scene bundles a moving actor box with the boundary segments it collides
//! against. Scenes are plain data; `actor_box` and `boundary_lines` convert
//! them into simulation types.

use crate::geometry::{GeometryError, Line, MovingBox};
use crate::types::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum SceneError {
    /// File system error while reading a scene file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
    /// Scene file not found
    NotFound(String),
    /// A boundary segment could not be turned into a line
    Geometry(GeometryError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "scene io error: {}", e),
            SceneError::Parse(e) => write!(f, "scene parse error: {}", e),
            SceneError::NotFound(name) => write!(f, "scene not found: {}", name),
            SceneError::Geometry(e) => write!(f, "scene geometry error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<serde_yaml::Error> for SceneError {
    fn from(e: serde_yaml::Error) -> Self {
        SceneError::Parse(e)
    }
}

impl From<GeometryError> for SceneError {
    fn from(e: GeometryError) -> Self {
        SceneError::Geometry(e)
    }
}

// =============================================================================
// Scene data
// =============================================================================

/// The moving box of a scene: top-left position, size, per-tick velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
}

/// One boundary segment, endpoint to endpoint.
///
/// Segment order matters: the in-front side is to the left of the direction
/// of travel from `from` to `to`, so a closed boundary listed clockwise (in
/// screen coordinates) keeps its inside in front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub from: [f64; 2],
    pub to: [f64; 2],
}

/// A named scene: one actor box and the boundary it lives inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub actor: ActorSpec,
    pub boundary: Vec<SegmentSpec>,
}

impl Scene {
    /// The actor as a simulation box.
    pub fn actor_box(&self) -> MovingBox {
        MovingBox::new(
            self.actor.x,
            self.actor.y,
            self.actor.w,
            self.actor.h,
            self.actor.vx,
            self.actor.vy,
        )
    }

    /// The boundary as obstacle lines, normals precomputed.
    pub fn boundary_lines(&self) -> Result<Vec<Line>, GeometryError> {
        self.boundary
            .iter()
            .map(|seg| {
                Line::new_static(
                    Vec2::new(seg.from[0], seg.from[1]),
                    Vec2::new(seg.to[0], seg.to[1]),
                )
            })
            .collect()
    }

    /// Built-in demo scene: an octagonal arena walked clockwise so its
    /// inside is the in-front side, with the actor starting on the bottom
    /// edge moving down-right.
    pub fn octagon_arena() -> Self {
        let boundary = [
            ([400.0, 400.0], [500.0, 400.0]),
            ([500.0, 400.0], [600.0, 300.0]),
            ([600.0, 300.0], [600.0, 200.0]),
            ([600.0, 200.0], [500.0, 100.0]),
            ([500.0, 100.0], [400.0, 100.0]),
            ([400.0, 100.0], [300.0, 200.0]),
            ([300.0, 200.0], [300.0, 300.0]),
            ([300.0, 300.0], [400.0, 400.0]),
        ];

        Scene {
            name: "octagon".to_string(),
            actor: ActorSpec {
                x: 400.0,
                y: 400.0,
                w: 20.0,
                h: 30.0,
                vx: 50.0,
                vy: 50.0,
            },
            boundary: boundary
                .iter()
                .map(|(from, to)| SegmentSpec {
                    from: *from,
                    to: *to,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Scene loader
// =============================================================================

/// Loads scenes from a directory of YAML files, one scene per file.
pub struct SceneLoader {
    base_path: PathBuf,
}

impl SceneLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load `{base}/{name}.yaml`.
    pub fn load_scene(&self, name: &str) -> Result<Scene, SceneError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SceneError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let scene: Scene = serde_yaml::from_str(&contents)?;
        Ok(scene)
    }

    /// Names of all scene files in the base directory, sorted.
    pub fn list_scenes(&self) -> Result<Vec<String>, SceneError> {
        if !self.base_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(".yaml")) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("scenes")
    }

    #[test]
    fn test_octagon_arena_is_closed() {
        let scene = Scene::octagon_arena();
        assert_eq!(scene.boundary.len(), 8);

        // Each segment starts where the previous one ended.
        for pair in scene.boundary.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(
            scene.boundary.last().unwrap().to,
            scene.boundary.first().unwrap().from
        );
    }

    #[test]
    fn test_octagon_arena_builds_lines() {
        let scene = Scene::octagon_arena();
        let lines = scene.boundary_lines().unwrap();
        assert_eq!(lines.len(), 8);

        let actor = scene.actor_box();
        assert_eq!(actor.position(), Vec2::new(400.0, 400.0));
        assert_eq!(actor.velocity(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_load_octagon_from_file() {
        let loader = SceneLoader::new(scene_dir());
        let loaded = loader.load_scene("octagon").unwrap();
        assert_eq!(loaded, Scene::octagon_arena());
    }

    #[test]
    fn test_missing_scene_is_not_found() {
        let loader = SceneLoader::new(scene_dir());
        match loader.load_scene("no_such_scene") {
            Err(SceneError::NotFound(name)) => assert_eq!(name, "no_such_scene"),
            other => panic!("expected NotFound, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_list_scenes_contains_octagon() {
        let loader = SceneLoader::new(scene_dir());
        let names = loader.list_scenes().unwrap();
        assert!(names.contains(&"octagon".to_string()));
    }

    #[test]
    fn test_list_scenes_missing_dir_is_empty() {
        let loader = SceneLoader::new("/nonexistent/scene/dir");
        assert!(loader.list_scenes().unwrap().is_empty());
    }

    #[test]
    fn test_degenerate_segment_is_rejected() {
        let scene = Scene {
            name: "bad".to_string(),
            actor: ActorSpec {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 10.0,
                vx: 0.0,
                vy: 0.0,
            },
            boundary: vec![SegmentSpec {
                from: [5.0, 5.0],
                to: [5.0, 5.0],
            }],
        };
        assert!(scene.boundary_lines().is_err());
    }
}
