//! # Primitive Shape Generation
//!
//! Profile builders for every built-in shape. Surfaces of revolution build a 2D
//! profile and hand it to the lathe; planes and cuboids are not revolutions and
//! emit explicit quads directly.
//!
//! All generators return the flat 9-float vertex layout described in
//! [`super::vertex`].

use std::f32::consts::{PI, TAU};

use super::lathe::{lathe, LatheParams};
use super::math::{sign, vec2, vec3, Vec2, Vec3};
use super::vertex::PackedVertex;
use crate::error::{GeometryError, Result};

/// Radius used instead of zero where a profile meets the revolve axis
pub const AXIS_RADIUS: f32 = 0.01;

/// Cross-section subdivisions of a spring's wire
pub const SPRING_RING_DIVISIONS: usize = 12;

/// Number of full turns a spring makes
pub const SPRING_TURNS: f32 = 10.0;

fn push_face(verts: &mut Vec<f32>, tags: [f32; 4], corners: [Vec3; 4], normal: Vec3, uvs: [Vec2; 4]) {
    for i in 0..4 {
        PackedVertex::new(tags[i], corners[i], normal, uvs[i]).push_to(verts);
    }
}

/// A single quad spanning `-w..w` by `-h..h` in the XY plane, facing +Z
pub fn create_plane(w: f32, h: f32) -> Vec<f32> {
    let mut verts = Vec::with_capacity(4 * 9);
    push_face(
        &mut verts,
        [0.0, 1.0, 2.0, 3.0],
        [vec3(-w, -h, 0.0), vec3(w, -h, 0.0), vec3(w, h, 0.0), vec3(-w, h, 0.0)],
        vec3(0.0, 0.0, 1.0),
        [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)],
    );
    verts
}

/// Six quads of a box with half extents `w`, `h`, `d`, one flat normal per face
pub fn create_cuboid(w: f32, h: f32, d: f32) -> Vec<f32> {
    let mut verts = Vec::with_capacity(24 * 9);
    let side = [8.0, 9.0, 10.0, 11.0];

    // front
    push_face(
        &mut verts,
        [0.0, 1.0, 2.0, 3.0],
        [vec3(-w, -h, d), vec3(w, -h, d), vec3(w, h, d), vec3(-w, h, d)],
        vec3(0.0, 0.0, 1.0),
        [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)],
    );
    // back
    push_face(
        &mut verts,
        [4.0, 5.0, 6.0, 7.0],
        [vec3(-w, -h, -d), vec3(-w, h, -d), vec3(w, h, -d), vec3(w, -h, -d)],
        vec3(0.0, 0.0, -1.0),
        [vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0), vec2(0.0, 0.0)],
    );
    // top
    push_face(
        &mut verts,
        side,
        [vec3(-w, h, -d), vec3(-w, h, d), vec3(w, h, d), vec3(w, h, -d)],
        vec3(0.0, 1.0, 0.0),
        [vec2(0.0, 1.0), vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0)],
    );
    // bottom
    push_face(
        &mut verts,
        side,
        [vec3(-w, -h, -d), vec3(w, -h, -d), vec3(w, -h, d), vec3(-w, -h, d)],
        vec3(0.0, -1.0, 0.0),
        [vec2(1.0, 1.0), vec2(0.0, 1.0), vec2(0.0, 0.0), vec2(1.0, 0.0)],
    );
    // right
    push_face(
        &mut verts,
        side,
        [vec3(w, -h, -d), vec3(w, h, -d), vec3(w, h, d), vec3(w, -h, d)],
        vec3(1.0, 0.0, 0.0),
        [vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0), vec2(0.0, 0.0)],
    );
    // left
    push_face(
        &mut verts,
        side,
        [vec3(-w, -h, -d), vec3(-w, -h, d), vec3(-w, h, d), vec3(-w, h, -d)],
        vec3(-1.0, 0.0, 0.0),
        [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)],
    );

    verts
}

/// Open side wall of a cylinder, top to bottom
pub fn cylinder_profile(radius: f32, height: f32) -> Vec<Vec2> {
    vec![vec2(radius, height / 2.0), vec2(radius, -height / 2.0)]
}

/// Capped frustum from `top_radius` at `+height/2` to `bottom_radius` at `-height/2`.
///
/// Repeated consecutive points (a cone's apex sitting on the axis) are dropped.
pub fn frustum_profile(top_radius: f32, bottom_radius: f32, height: f32) -> Vec<Vec2> {
    let half = height / 2.0;
    let corners = [
        vec2(AXIS_RADIUS, half),
        vec2(top_radius, half),
        vec2(bottom_radius, -half),
        vec2(AXIS_RADIUS, -half),
    ];
    let mut path: Vec<Vec2> = Vec::with_capacity(corners.len());
    for p in corners {
        if path.last() != Some(&p) {
            path.push(p);
        }
    }
    path
}

/// Rectangular cross-section of a tube wall, closed back onto its first point
pub fn tube_profile(inner_radius: f32, outer_radius: f32, length: f32) -> Vec<Vec2> {
    let half = length / 2.0;
    vec![
        vec2(inner_radius, half),
        vec2(outer_radius, half),
        vec2(outer_radius, -half),
        vec2(inner_radius, -half),
        vec2(inner_radius, half),
    ]
}

/// Circle of `ring_radius` centred `radius` away from the axis, starting at the top.
///
/// Has `divisions + 1` points; the last repeats the first.
pub fn ring_profile(radius: f32, ring_radius: f32, divisions: usize) -> Vec<Vec2> {
    let step = TAU / divisions as f32;
    (0..=divisions)
        .map(|r| {
            let a = r as f32 * step;
            vec2(radius + ring_radius * a.sin(), ring_radius * a.cos())
        })
        .collect()
}

/// Meridian arc of a sphere from the top (or from part way down) to the bottom pole.
///
/// `hemisphere` is the fraction of the arc skipped from the top (0 for a full
/// sphere, 0.5 for the lower half). A negative `side` mirrors the arc across
/// the axis.
pub fn sphere_profile(radius: f32, hemisphere: f32, side: f32, divisions: u32) -> Result<Vec<Vec2>> {
    if divisions == 0 {
        return Err(GeometryError::ZeroEdges);
    }
    let step = PI * (1.0 - hemisphere) / divisions as f32;
    let offset = PI * hemisphere;
    let side = sign(side);
    Ok((0..=divisions)
        .map(|r| {
            let a = r as f32 * step + offset;
            vec2(radius * a.sin() * side, radius * a.cos())
        })
        .collect())
}

pub fn create_sphere(radius: f32, hemisphere: f32, side: f32, edges: u32) -> Result<Vec<f32>> {
    let profile = sphere_profile(radius, hemisphere, side, edges)?;
    lathe(&profile, &LatheParams::full(edges).with_closed(false))
}

pub fn create_cylinder(radius: f32, height: f32, edges: u32) -> Result<Vec<f32>> {
    lathe(
        &cylinder_profile(radius, height),
        &LatheParams::full(edges).with_closed(false),
    )
}

pub fn create_cone(radius: f32, height: f32, edges: u32) -> Result<Vec<f32>> {
    create_truncated_cone(AXIS_RADIUS, radius, height, edges)
}

pub fn create_truncated_cone(
    top_radius: f32,
    bottom_radius: f32,
    height: f32,
    edges: u32,
) -> Result<Vec<f32>> {
    lathe(
        &frustum_profile(top_radius, bottom_radius, height),
        &LatheParams::full(edges).with_closed(false),
    )
}

pub fn create_tube(inner_radius: f32, outer_radius: f32, length: f32, edges: u32) -> Result<Vec<f32>> {
    lathe(
        &tube_profile(inner_radius, outer_radius, length),
        &LatheParams::full(edges),
    )
}

pub fn create_torus(radius: f32, ring_radius: f32, ring_divisions: usize, edges: u32) -> Result<Vec<f32>> {
    if ring_divisions == 0 {
        return Err(GeometryError::DegenerateProfile { points: 1 });
    }
    lathe(
        &ring_profile(radius, ring_radius, ring_divisions),
        &LatheParams::full(edges),
    )
}

/// Wire of radius `wire_radius` wound [`SPRING_TURNS`] times around the axis,
/// climbing `rise` over the whole winding
pub fn create_spring(radius: f32, wire_radius: f32, rise: f32, edges: u32) -> Result<Vec<f32>> {
    lathe(
        &ring_profile(radius, wire_radius, SPRING_RING_DIVISIONS),
        &LatheParams::full(edges)
            .with_sweep(0.0, TAU * SPRING_TURNS)
            .with_rise(rise),
    )
}
