//! Vector primitives for profile and mesh generation
//!
//! Profiles live in a 2D half-plane where `x` is the distance from the revolve
//! axis and `y` is the height along it. Both vector types are cgmath vectors, so
//! subtraction, length, cross product, lerp and matrix multiplication come from
//! cgmath directly.

use cgmath::InnerSpace;

pub use cgmath::{vec2, vec3};

/// A point or direction in the profile half-plane (radius, height)
pub type Vec2 = cgmath::Vector2<f32>;

/// A 3D point, direction or normal
pub type Vec3 = cgmath::Vector3<f32>;

/// Unit normal of the segment running from `a` to `b`.
///
/// The segment direction `(dx, dy)` is rotated by 90 degrees to `(-dy, dx)`.
/// A zero-length segment has no direction and yields the zero vector.
pub fn segment_normal(a: Vec2, b: Vec2) -> Vec2 {
    let d = b - a;
    let len = d.magnitude();
    if len > 0.0 {
        vec2(-d.y / len, d.x / len)
    } else {
        vec2(0.0, 0.0)
    }
}

/// Unsigned turn angle in radians between an incoming and an outgoing segment.
///
/// Zero-length segments never turn.
pub fn turn_angle(incoming: Vec2, outgoing: Vec2) -> f32 {
    let lengths = incoming.magnitude() * outgoing.magnitude();
    if lengths <= 0.0 {
        return 0.0;
    }
    let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
    let cos = (incoming.dot(outgoing) / lengths).clamp(-1.0, 1.0);
    (sign(cross) * cos.acos()).abs()
}

/// -1 for negative values, 1 otherwise (zero counts as positive)
pub fn sign(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}
