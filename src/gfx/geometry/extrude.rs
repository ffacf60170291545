//! Linear extrusion of a profile along Z.
//!
//! Emits the same ring-major layout as the lathe with a single subdivision:
//! every profile point yields a front vertex at `z = +depth / 2` and a back
//! vertex at `z = -depth / 2`, so the shared-quad decoder draws the side wall
//! with `edges = 1`. Caps are not generated.

use super::lathe::SEAM_U;
use super::math::{vec2, vec3, Vec2, Vec3};
use super::normals::compute_path_normals;
use super::vertex::{PackedVertex, VERTEX_STRIDE};
use crate::error::Result;

/// Angular subdivisions an extrusion reports to the shared-quad decoder
pub const EXTRUDE_EDGES: u32 = 1;

pub fn extrude(
    profile: &[Vec2],
    depth: f32,
    crease_angle: f32,
    closed: bool,
    origin: Vec3,
) -> Result<Vec<f32>> {
    let path = compute_path_normals(profile, crease_angle, closed, 1.0)?;

    let (min_y, max_y) = path
        .points
        .iter()
        .fold((path.points[0].y, path.points[0].y), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let height = max_y - min_y;
    let half = depth / 2.0;

    let mut verts = Vec::with_capacity(path.len() * 2 * VERTEX_STRIDE);
    for (p, n) in path.points.iter().zip(&path.normals) {
        let v = if height != 0.0 {
            1.0 - (p.y - min_y) / height
        } else {
            0.0
        };
        let normal = vec3(n.x, n.y, 0.0);
        for (z, u) in [(half, 0.0), (-half, SEAM_U)] {
            let position = vec3(origin.x + p.x, origin.y + p.y, origin.z + z);
            PackedVertex::new(0.0, position, normal, vec2(u, v)).push_to(&mut verts);
        }
    }
    Ok(verts)
}
