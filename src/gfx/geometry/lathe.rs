//! # Lathe Revolver
//!
//! Sweeps a 2D profile around the Y axis to build a surface of revolution.
//!
//! ## Output layout
//!
//! Vertices are ring-major: every profile point produces one ring of
//! `edges + 1` vertices, angle index `0..edges` followed by a closing seam
//! vertex evaluated at `start_angle` again. Quads are recovered by pairing
//! ring `p` with ring `p + 1` (see `gfx::rendering::quads`).
//!
//! ## Rise
//!
//! A non-zero `rise` lifts every vertex by `r * rise / edges` at angle index
//! `r`. The lift restarts from the profile height on every ring, so with an
//! `end_angle` spanning several turns each ring becomes a helix (springs).

use std::f32::consts::{PI, TAU};

use log::debug;

use super::math::{vec2, vec3, Vec2, Vec3};
use super::normals::{compute_path_normals, PathNormals, DEFAULT_CREASE_ANGLE};
use super::vertex::{PackedVertex, VERTEX_STRIDE};
use crate::error::{GeometryError, Result};

/// `u` coordinate of the closing seam vertex, kept just below 1.0 so the seam
/// does not wrap to the opposite texture edge
pub const SEAM_U: f32 = 0.9999;

/// How the `v` texture coordinate is derived from a profile point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvMode {
    /// `v = 1 - (y - min_y) / (max_y - min_y)`
    #[default]
    Cylindrical,
    /// `v = atan2(x, y - centre_y) / pi`, wrapped into `[0, 1)`
    Spherical,
}

/// Parameters of a revolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatheParams {
    /// `1.0` for outward normals, `-1.0` to flip them
    pub inverted: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    /// Total height gained across `start_angle..end_angle`
    pub rise: f32,
    /// Number of angular subdivisions, at least 1
    pub edges: u32,
    pub uv_mode: UvMode,
    /// Offset added to every generated position
    pub origin: Vec3,
    /// Turn angle above which a profile vertex gets a hard edge
    pub crease_angle: f32,
    /// The profile is a loop whose last point repeats the first
    pub closed: bool,
}

impl Default for LatheParams {
    fn default() -> Self {
        Self {
            inverted: 1.0,
            start_angle: 0.0,
            end_angle: TAU,
            rise: 0.0,
            edges: 16,
            uv_mode: UvMode::Cylindrical,
            origin: vec3(0.0, 0.0, 0.0),
            crease_angle: DEFAULT_CREASE_ANGLE,
            closed: true,
        }
    }
}

impl LatheParams {
    /// Full revolution with `edges` subdivisions
    pub fn full(edges: u32) -> Self {
        Self {
            edges,
            ..Default::default()
        }
    }

    pub fn with_sweep(mut self, start_angle: f32, end_angle: f32) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    pub fn with_rise(mut self, rise: f32) -> Self {
        self.rise = rise;
        self
    }

    pub fn with_uv_mode(mut self, uv_mode: UvMode) -> Self {
        self.uv_mode = uv_mode;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = -self.inverted;
        self
    }
}

/// Computes normals for `profile` and revolves it.
///
/// This is the usual entry point: crease expansion may add points, so the
/// output has `expanded_points * (edges + 1)` vertices.
pub fn lathe(profile: &[Vec2], params: &LatheParams) -> Result<Vec<f32>> {
    if params.edges == 0 {
        return Err(GeometryError::ZeroEdges);
    }
    let path = compute_path_normals(profile, params.crease_angle, params.closed, params.inverted)?;
    revolve(&path, params)
}

/// Revolves an already crease-expanded profile with matching normals.
pub fn revolve(path: &PathNormals, params: &LatheParams) -> Result<Vec<f32>> {
    let PathNormals { points, normals } = path;
    if points.len() < 2 {
        return Err(GeometryError::DegenerateProfile {
            points: points.len(),
        });
    }
    if points.len() != normals.len() {
        return Err(GeometryError::NormalCountMismatch {
            profile: points.len(),
            normals: normals.len(),
        });
    }
    if params.edges == 0 {
        return Err(GeometryError::ZeroEdges);
    }

    let edges = params.edges as usize;
    let angle_step = (params.end_angle - params.start_angle) / params.edges as f32;
    let rise_step = params.rise / params.edges as f32;
    let u_step = 1.0 / params.edges as f32;

    let (min_y, max_y) = points
        .iter()
        .fold((points[0].y, points[0].y), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let centre_y = (max_y + min_y) / 2.0;
    let height = max_y - min_y;

    let mut verts = Vec::with_capacity(points.len() * (edges + 1) * VERTEX_STRIDE);

    for (point, normal) in points.iter().zip(normals) {
        let v = match params.uv_mode {
            UvMode::Cylindrical if height != 0.0 => 1.0 - (point.y - min_y) / height,
            UvMode::Cylindrical => 0.0,
            UvMode::Spherical => {
                let v = point.x.atan2(point.y - centre_y) / PI;
                if v < 0.0 {
                    v + 1.0
                } else {
                    v
                }
            }
        };

        for r in 0..edges {
            let angle = params.start_angle + r as f32 * angle_step;
            let rising_y = point.y + r as f32 * rise_step;
            ring_vertex(*point, *normal, angle, rising_y, vec2(u_step * r as f32, v), params.origin)
                .push_to(&mut verts);
        }

        let rising_y = point.y + edges as f32 * rise_step;
        ring_vertex(*point, *normal, params.start_angle, rising_y, vec2(SEAM_U, v), params.origin)
            .push_to(&mut verts);
    }

    debug!(
        "revolved {} profile points x {} edges into {} vertices",
        points.len(),
        edges,
        verts.len() / VERTEX_STRIDE
    );

    Ok(verts)
}

fn ring_vertex(
    point: Vec2,
    normal: Vec2,
    angle: f32,
    rising_y: f32,
    uv: Vec2,
    origin: Vec3,
) -> PackedVertex {
    let (sin, cos) = angle.sin_cos();
    let position = vec3(
        origin.x + point.x * sin,
        origin.y + rising_y,
        origin.z + point.x * cos,
    );
    let normal = vec3(normal.x * sin, normal.y, normal.x * cos);
    PackedVertex::new(0.0, position, normal, uv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn packed(verts: &[f32]) -> &[PackedVertex] {
        PackedVertex::cast_slice(verts).unwrap()
    }

    fn wall(radius: f32, height: f32) -> Vec<Vec2> {
        vec![vec2(radius, height / 2.0), vec2(radius, -height / 2.0)]
    }

    #[test]
    fn test_zero_edges_is_rejected() {
        let params = LatheParams::full(0);
        assert!(matches!(lathe(&wall(1.0, 1.0), &params), Err(GeometryError::ZeroEdges)));
    }

    #[test]
    fn test_degenerate_profile_is_rejected() {
        let params = LatheParams::full(8);
        assert!(matches!(
            lathe(&[vec2(1.0, 0.0)], &params),
            Err(GeometryError::DegenerateProfile { points: 1 })
        ));
    }

    #[test]
    fn test_mismatched_normals_are_rejected() {
        let path = PathNormals {
            points: wall(1.0, 2.0),
            normals: vec![vec2(1.0, 0.0)],
        };
        assert!(matches!(
            revolve(&path, &LatheParams::full(4)),
            Err(GeometryError::NormalCountMismatch { profile: 2, normals: 1 })
        ));
    }

    #[test]
    fn test_vertex_count_matches_rings() {
        for edges in [1u32, 3, 8, 20] {
            let profile = [vec2(1.0, 2.0), vec2(1.0, 1.0), vec2(2.0, 1.0), vec2(2.0, 0.0)];
            let params = LatheParams::full(edges).with_closed(false);
            let expanded =
                compute_path_normals(&profile, params.crease_angle, false, 1.0).unwrap();
            let verts = lathe(&profile, &params).unwrap();
            assert_eq!(
                verts.len(),
                expanded.len() * (edges as usize + 1) * VERTEX_STRIDE
            );
        }
    }

    #[test]
    fn test_seam_closes_full_revolution() {
        let edges = 12;
        let verts = lathe(&wall(3.0, 20.0), &LatheParams::full(edges)).unwrap();
        let ring = edges as usize + 1;
        for ring_start in (0..packed(&verts).len()).step_by(ring) {
            let first = packed(&verts)[ring_start];
            let seam = packed(&verts)[ring_start + edges as usize];
            for axis in 0..3 {
                assert_relative_eq!(first.position[axis], seam.position[axis], epsilon = 1e-5);
            }
            assert_eq!(seam.uv[0], SEAM_U);
        }
    }

    #[test]
    fn test_partial_sweep_still_emits_seam_at_start_angle() {
        let params = LatheParams::full(4).with_sweep(0.0, PI);
        let verts = lathe(&wall(2.0, 2.0), &params).unwrap();
        let ring = &packed(&verts)[..5];
        // last swept column sits at 3/4 of pi, the seam vertex back at 0
        assert_relative_eq!(ring[3].position[0], 2.0 * (0.75 * PI).sin(), epsilon = 1e-5);
        assert_eq!(ring[4].position, ring[0].position);
    }

    #[test]
    fn test_positions_and_normals_follow_angle() {
        let params = LatheParams::full(4).with_origin(vec3(1.0, 2.0, 3.0));
        let verts = lathe(&wall(2.0, 4.0), &params).unwrap();
        let quarter = packed(&verts)[1];
        // angle pi/2: sin = 1, cos = 0
        assert_relative_eq!(quarter.position[0], 3.0, epsilon = 1e-5);
        assert_relative_eq!(quarter.position[1], 4.0, epsilon = 1e-5);
        assert_relative_eq!(quarter.position[2], 3.0, epsilon = 1e-5);
        assert_relative_eq!(quarter.normal[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(quarter.normal[1], 0.0, epsilon = 1e-5);
        assert_relative_eq!(quarter.normal[2], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cylindrical_uv_range() {
        let edges = 8;
        let verts = lathe(&wall(1.0, 6.0), &LatheParams::full(edges)).unwrap();
        let verts = packed(&verts);
        let ring = edges as usize + 1;

        // first ring is the top of the wall, second ring the bottom
        assert!(verts[..ring].iter().all(|v| v.uv[1] == 0.0));
        assert!(verts[ring..].iter().all(|v| v.uv[1] == 1.0));

        let us: Vec<f32> = verts[..ring].iter().map(|v| v.uv[0]).collect();
        assert_eq!(us[0], 0.0);
        assert_eq!(us[edges as usize], SEAM_U);
        assert!(us.iter().all(|u| (0.0..=SEAM_U).contains(u)));
        assert!(us.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_flat_profile_cylindrical_v_is_zero() {
        let disc = [vec2(0.5, 1.0), vec2(2.0, 1.0)];
        let verts = lathe(&disc, &LatheParams::full(4)).unwrap();
        assert!(packed(&verts).iter().all(|v| v.uv[1] == 0.0));
    }

    #[test]
    fn test_spherical_uv_wraps_into_unit_range() {
        let arc: Vec<Vec2> = (0..=8)
            .map(|i| {
                let a = i as f32 * PI / 8.0;
                vec2(2.0 * a.sin(), 2.0 * a.cos())
            })
            .collect();
        let params = LatheParams::full(6)
            .with_closed(false)
            .with_uv_mode(UvMode::Spherical);
        let verts = lathe(&arc, &params).unwrap();
        assert!(packed(&verts).iter().all(|v| (0.0..=1.0).contains(&v.uv[1])));
        // equator point: atan2(2, 0) / pi = 0.5
        let equator = packed(&verts)[4 * 7];
        assert_relative_eq!(equator.uv[1], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_rise_lifts_each_ring_from_profile_height() {
        let edges = 10;
        let params = LatheParams::full(edges).with_rise(5.0);
        let verts = lathe(&wall(1.0, 2.0), &params).unwrap();
        let verts = packed(&verts);
        let ring = edges as usize + 1;
        for (i, v) in verts[..ring].iter().enumerate() {
            assert_relative_eq!(v.position[1], 1.0 + i as f32 * 0.5, epsilon = 1e-5);
        }
        // second ring restarts from its own height
        assert_relative_eq!(verts[ring].position[1], -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_inverted_params_flip_normals() {
        let outward = lathe(&wall(1.0, 2.0), &LatheParams::full(4)).unwrap();
        let inward = lathe(&wall(1.0, 2.0), &LatheParams::full(4).inverted()).unwrap();
        for (a, b) in packed(&outward).iter().zip(packed(&inward)) {
            assert_eq!(a.position, b.position);
            for axis in 0..3 {
                assert_eq!(a.normal[axis], -b.normal[axis]);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let profile: Vec<Vec2> = (0..rng.random_range(2..10))
                .map(|_| vec2(rng.random_range(0.1..4.0), rng.random_range(-4.0..4.0)))
                .collect();
            let params = LatheParams::full(rng.random_range(1..24))
                .with_rise(rng.random_range(0.0..3.0))
                .with_closed(false);
            let a = lathe(&profile, &params).unwrap();
            let b = lathe(&profile, &params).unwrap();
            let a_bits: Vec<u32> = a.iter().map(|f| f.to_bits()).collect();
            let b_bits: Vec<u32> = b.iter().map(|f| f.to_bits()).collect();
            assert_eq!(a_bits, b_bits);
        }
    }
}
