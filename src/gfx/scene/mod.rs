//! # Scene Management Module
//!
//! Shapes and the registry that owns them.
//!
//! ## Key Components
//!
//! - [`Scene`] - arena of shapes with a name index
//! - [`Shape`] - one drawable instance: kind, fixed dimensions, transform, material
//! - [`ShapeType`] / [`DrawMode`] - what a shape is and how its vertices are decoded
//!
//! ## Usage
//!
//! ```no_run
//! use lathekit::gfx::scene::{Scene, Shape, ShapeType};
//!
//! let mut scene = Scene::new();
//! scene.add_shape(
//!     Shape::new("torus1", ShapeType::Torus, 5.0, 2.0, 30.0, 20)
//!         .with_position(0.0, 0.0, -30.0)
//!         .with_color(0xff00_80ff),
//! );
//!
//! // per frame
//! scene.shape_mut("torus1").rotate(0.0, 1.0, 0.0);
//! ```

pub mod scene;
pub mod shape;

// Re-export main types
pub use scene::{Scene, ShapeId};
pub use shape::{pack_color, unpack_color, DrawMode, Shape, ShapeType, DEFAULT_EDGES, WHITE};
