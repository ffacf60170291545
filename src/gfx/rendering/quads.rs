//! Decoding of flat packed vertex arrays into drawable primitives.
//!
//! * **Direct quads**: every four consecutive vertices form one quad (planes,
//!   cuboids).
//! * **Shared quads**: the array is ring-major with `edges + 1` vertices per
//!   ring; neighbouring rings are stitched together (lathe and extrude output).
//! * **Triangles**: every three consecutive vertices form one triangle (OBJ).

use crate::error::{GeometryError, Result};
use crate::gfx::geometry::PackedVertex;

use super::renderer::{Quad, Triangle};

pub fn direct_quads(verts: &[f32]) -> Result<Vec<Quad>> {
    let packed = PackedVertex::cast_slice(verts)?;
    Ok(packed
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect())
}

/// Stitches consecutive rings of `edges + 1` vertices into quads.
///
/// Corner order per quad is `(p, r+1)`, `(p, r)`, `(p+1, r)`, `(p+1, r+1)`
/// where `p` is the ring and `r` the angle index. A trailing partial ring is
/// ignored.
pub fn shared_quads(verts: &[f32], edges: u32) -> Result<Vec<Quad>> {
    if edges == 0 {
        return Err(GeometryError::ZeroEdges);
    }
    let packed = PackedVertex::cast_slice(verts)?;
    let ring = edges as usize + 1;
    let rings = packed.len() / ring;
    if rings < 2 {
        return Ok(Vec::new());
    }

    let mut quads = Vec::with_capacity((rings - 1) * edges as usize);
    for p in 0..rings - 1 {
        let this = p * ring;
        let next = this + ring;
        for r in 0..edges as usize {
            quads.push([
                packed[this + r + 1],
                packed[this + r],
                packed[next + r],
                packed[next + r + 1],
            ]);
        }
    }
    Ok(quads)
}

pub fn triangles(verts: &[f32]) -> Result<Vec<Triangle>> {
    let packed = PackedVertex::cast_slice(verts)?;
    Ok(packed
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}
