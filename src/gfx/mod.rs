//! # Graphics Module
//!
//! Geometry generation, shapes and scenes, and the renderers that draw them.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - pure profile, normal and lathe generators
//! - **Scene Management** ([`scene`]) - shapes with cached vertices and a named registry
//! - **Rendering** ([`rendering`]) - the [`Renderer`](rendering::Renderer) seam, quad
//!   decoding, a capture renderer and the wgpu [`RenderEngine`]
//! - **Resource Management** ([`resources`]) - textures and global uniforms
//!
//! ## Usage
//!
//! ```no_run
//! use lathekit::gfx::rendering::CaptureRenderer;
//! use lathekit::gfx::scene::{Scene, Shape, ShapeType};
//!
//! let mut scene = Scene::new();
//! scene.add_shape(Shape::new("cyl", ShapeType::Cylinder, 3.0, 20.0, 0.0, 8));
//!
//! let mut renderer = CaptureRenderer::new();
//! scene.draw(&mut renderer)?;
//! assert_eq!(renderer.quad_count(), 8);
//! # Ok::<(), lathekit::error::RenderError>(())
//! ```

pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use rendering::render_engine::RenderEngine;
