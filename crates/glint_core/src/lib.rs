//! Glint Core - scene description types and loaders.
//!
//! This crate provides:
//!
//! - **Shading data**: [`Material`] (Phong coefficients) and [`Light`]
//! - **Scene records**: [`SceneDescription`], the renderer-agnostic list of
//!   primitives, lights and the camera
//! - **Loaders**: the line-oriented scene text format and OBJ meshes
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let description = load_scene(&["scene.txt"])?;
//! println!("Loaded {} objects, {} lights",
//!     description.object_count(),
//!     description.light_count());
//! ```

pub mod light;
pub mod material;
pub mod mesh;
pub mod parser;
pub mod scene;

// Re-export commonly used types
pub use light::{Falloff, Light, LightKind};
pub use material::{Color, Material};
pub use mesh::{Mesh, MeshError, MeshResult};
pub use parser::{load_scene, ParseError, ParseResult, SceneParser};
pub use scene::{Object, Primitive, SceneDescription};
