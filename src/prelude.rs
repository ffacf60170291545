//! # lathekit Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use lathekit::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = ShapesApp::new(AppConfig::default());
//!     app.add_shape(Shape::new("ring", ShapeType::Torus, 5.0, 2.0, 30.0, 20).with_position(0.0, 0.0, -30.0));
//!     app.on_frame(|scene, _input| scene.shape_mut("ring").rotate(1.0, 0.5, 0.0));
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::ShapesApp;
pub use crate::config::{AppConfig, LightConfig};
pub use crate::input::{InputEvent, Key, MouseButtons, UserInput};

// Re-export geometry and scene types
pub use crate::gfx::geometry::{lathe, revolve, vec2, vec3, LatheParams, UvMode, Vec2, Vec3};
pub use crate::gfx::rendering::{CaptureRenderer, DrawState, Renderer, TextureId, TextureLoader};
pub use crate::gfx::scene::{Scene, Shape, ShapeId, ShapeType};

// Re-export errors
pub use crate::error::{GeometryError, RenderError, TextureError};

// Re-export common external dependencies
pub use cgmath::Vector3;
