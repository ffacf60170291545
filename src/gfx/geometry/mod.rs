//! # Procedural Geometry Generation
//!
//! Everything here is pure: inputs in, a fresh flat vertex array out.
//!
//! ## Pipeline
//!
//! ```text
//! profile builder -> Vec<Vec2> -> compute_path_normals -> revolve -> Vec<f32>
//! ```
//!
//! Planes and cuboids skip the lathe and emit quads directly; OBJ meshes are
//! flattened to triangles.
//!
//! ## Usage
//!
//! ```no_run
//! use lathekit::gfx::geometry::{create_torus, lathe, vec2, LatheParams, VERTEX_STRIDE};
//!
//! let torus = create_torus(5.0, 2.0, 30, 20)?;
//! assert_eq!(torus.len(), 31 * 21 * VERTEX_STRIDE);
//!
//! // a goblet-ish profile, half swept
//! let profile = [vec2(0.5, 2.0), vec2(1.0, 1.0), vec2(0.2, 0.0), vec2(1.0, -1.0)];
//! let params = LatheParams::full(24).with_sweep(0.0, std::f32::consts::PI);
//! let verts = lathe(&profile, &params.with_closed(false))?;
//! # Ok::<(), lathekit::error::GeometryError>(())
//! ```

pub mod extrude;
pub mod lathe;
pub mod math;
pub mod normals;
pub mod obj;
pub mod primitives;
pub mod vertex;

pub use extrude::{extrude, EXTRUDE_EDGES};
pub use lathe::{lathe, revolve, LatheParams, UvMode, SEAM_U};
pub use math::{vec2, vec3, Vec2, Vec3};
pub use normals::{compute_path_normals, PathNormals, DEFAULT_CREASE_ANGLE};
pub use obj::{load_obj, ObjMesh};
pub use primitives::*;
pub use vertex::{PackedVertex, VERTEX_STRIDE};
