//! Renderer collaborator traits.
//!
//! Shapes never talk to the GPU directly. They decode their packed vertices
//! into quads or triangles and hand them to a [`Renderer`] together with a
//! [`DrawState`] (model matrix, flat colour, optional texture).

use std::path::Path;

use cgmath::{Matrix4, SquareMatrix};

use crate::error::{RenderError, TextureError};
use crate::gfx::geometry::PackedVertex;

/// Opaque handle to a texture owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Four corners of one quad, in winding order
pub type Quad = [PackedVertex; 4];

/// Three corners of one triangle
pub type Triangle = [PackedVertex; 3];

/// Per-draw material and transform state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub model: Matrix4<f32>,
    /// Linear RGBA in `0..=1`
    pub color: [f32; 4],
    /// `None` draws untextured
    pub texture: Option<TextureId>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            model: Matrix4::identity(),
            color: [1.0, 1.0, 1.0, 1.0],
            texture: None,
        }
    }
}

pub trait Renderer {
    /// Starts a frame and clears the target
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    fn draw_quads(&mut self, state: &DrawState, quads: &[Quad]);

    fn draw_triangles(&mut self, state: &DrawState, triangles: &[Triangle]);

    /// Flushes queued draws and presents
    fn end_frame(&mut self) -> Result<(), RenderError>;
}

pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, TextureError>;
}
