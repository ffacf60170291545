// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Typed buffers and binding shorthands used by the render engine.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use uniform_buffer::{UniformBuffer, VertexArrayBuffer};
