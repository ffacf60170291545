// src/lib.rs
//! lathekit
//!
//! Lathe-based procedural shape generation with a small winit/wgpu scene and
//! render loop. Profiles are revolved (or extruded) into flat vertex arrays,
//! cached on shapes, and drawn as quads through a [`Renderer`](gfx::rendering::Renderer).

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ShapesApp;
pub use config::AppConfig;
