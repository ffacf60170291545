// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Collaborator traits, primitive decoding, a headless capture renderer and the
//! wgpu render engine.

pub mod capture;
pub mod quads;
pub mod render_engine;
pub mod renderer;

// Re-export main types
pub use capture::{CaptureRenderer, DrawCall};
pub use render_engine::{GpuVertex, RenderEngine};
pub use renderer::{DrawState, Quad, Renderer, TextureId, TextureLoader, Triangle};
