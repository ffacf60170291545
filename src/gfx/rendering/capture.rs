//! Headless renderer that records what it is asked to draw.
//!
//! Used wherever a GPU is unavailable: tests, geometry export, and checking a
//! scene's output without opening a window.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, TextureError};

use super::renderer::{DrawState, Quad, Renderer, TextureId, TextureLoader, Triangle};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Quads { state: DrawState, quads: Vec<Quad> },
    Triangles { state: DrawState, triangles: Vec<Triangle> },
}

impl DrawCall {
    pub fn state(&self) -> &DrawState {
        match self {
            DrawCall::Quads { state, .. } | DrawCall::Triangles { state, .. } => state,
        }
    }
}

#[derive(Debug, Default)]
pub struct CaptureRenderer {
    /// Draw calls of the current (or last finished) frame
    pub calls: Vec<DrawCall>,
    /// Number of completed `begin_frame`/`end_frame` pairs
    pub frames: usize,
    textures: HashMap<PathBuf, TextureId>,
    in_frame: bool,
}

impl CaptureRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quad_count(&self) -> usize {
        self.calls
            .iter()
            .map(|c| match c {
                DrawCall::Quads { quads, .. } => quads.len(),
                DrawCall::Triangles { .. } => 0,
            })
            .sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.calls
            .iter()
            .map(|c| match c {
                DrawCall::Triangles { triangles, .. } => triangles.len(),
                DrawCall::Quads { .. } => 0,
            })
            .sum()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn is_in_frame(&self) -> bool {
        self.in_frame
    }
}

impl Renderer for CaptureRenderer {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.calls.clear();
        self.in_frame = true;
        Ok(())
    }

    fn draw_quads(&mut self, state: &DrawState, quads: &[Quad]) {
        self.calls.push(DrawCall::Quads {
            state: *state,
            quads: quads.to_vec(),
        });
    }

    fn draw_triangles(&mut self, state: &DrawState, triangles: &[Triangle]) {
        self.calls.push(DrawCall::Triangles {
            state: *state,
            triangles: triangles.to_vec(),
        });
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.in_frame = false;
        self.frames += 1;
        Ok(())
    }
}

/// Hands out ids for existing files without decoding them
impl TextureLoader for CaptureRenderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, TextureError> {
        if !path.is_file() {
            return Err(TextureError::NotFound(path.to_path_buf()));
        }
        let next = TextureId(self.textures.len() as u32 + 1);
        Ok(*self.textures.entry(path.to_path_buf()).or_insert(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_resets_calls() {
        let mut r = CaptureRenderer::new();
        r.begin_frame().unwrap();
        r.draw_quads(&DrawState::default(), &[Quad::default()]);
        r.end_frame().unwrap();
        assert_eq!(r.quad_count(), 1);
        assert_eq!(r.frames, 1);

        r.begin_frame().unwrap();
        assert!(r.calls.is_empty());
        assert!(r.is_in_frame());
    }

    #[test]
    fn test_missing_texture_is_not_found() {
        let mut r = CaptureRenderer::new();
        assert!(matches!(
            r.load_texture(Path::new("no/such/texture.png")),
            Err(TextureError::NotFound(_))
        ));
    }

    #[test]
    fn test_same_path_reuses_texture_id() {
        let mut r = CaptureRenderer::new();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let a = r.load_texture(&path).unwrap();
        let b = r.load_texture(&path).unwrap();
        assert_eq!(a, b);
        assert_eq!(r.texture_count(), 1);
    }
}
