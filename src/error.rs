//! Error types
//!
//! Geometry generation, texture loading and rendering each have their own error
//! enum. Geometry errors are precondition violations: the generator never clamps
//! bad input into something drawable.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised while building vertex data
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("degenerate profile: {points} point(s), at least 2 are required")]
    DegenerateProfile { points: usize },

    #[error("angular subdivision count must be at least 1")]
    ZeroEdges,

    #[error("profile has {profile} point(s) but {normals} normal(s) were supplied")]
    NormalCountMismatch { profile: usize, normals: usize },

    #[error("flat vertex array of length {len} is not a whole number of packed vertices")]
    MisalignedVertices { len: usize },

    #[error("shape needs a profile but none was supplied")]
    MissingProfile,

    #[error("OBJ load failed: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// Errors raised by the texture collaborator
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("texture file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode texture {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors raised by the GPU renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}
