//! # Path Normals
//!
//! Computes one 2D normal per profile vertex. Where the profile turns by more
//! than the crease angle the vertex is split in two: the same position is
//! emitted twice, once with the incoming segment's normal and once with the
//! outgoing segment's normal, giving a hard edge once revolved. Smooth vertices
//! get a single normal perpendicular to the chord between their neighbours.

use super::math::{segment_normal, turn_angle, Vec2};
use crate::error::{GeometryError, Result};

/// Default crease threshold in radians
pub const DEFAULT_CREASE_ANGLE: f32 = 0.5;

/// A profile after crease expansion together with its normals.
///
/// `points` and `normals` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNormals {
    pub points: Vec<Vec2>,
    pub normals: Vec<Vec2>,
}

impl PathNormals {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Computes per-vertex normals for `path`.
///
/// * `crease_angle` - turn angle (radians) above which a vertex is split
/// * `closed` - the path is a loop whose last point repeats the first; boundary
///   vertices then use `path[n-2]` and `path[1]` as their outer neighbours
/// * `inverted` - `1.0` or `-1.0`, multiplied into every normal
///
/// Returns [`GeometryError::DegenerateProfile`] for fewer than two points.
pub fn compute_path_normals(
    path: &[Vec2],
    crease_angle: f32,
    closed: bool,
    inverted: f32,
) -> Result<PathNormals> {
    let n = path.len();
    if n < 2 {
        return Err(GeometryError::DegenerateProfile { points: n });
    }

    let flip = |v: Vec2| v * inverted;
    // perpendicular to the chord prev -> next
    let smooth = |prev: Vec2, next: Vec2| flip(segment_normal(prev, next));

    let mut points = Vec::with_capacity(n + n / 2);
    let mut normals = Vec::with_capacity(n + n / 2);

    if n == 2 {
        let normal = flip(segment_normal(path[0], path[1]));
        points.extend_from_slice(path);
        normals.extend_from_slice(&[normal, normal]);
        return Ok(PathNormals { points, normals });
    }

    let first = path[0];
    points.push(first);
    if closed {
        let prev = path[n - 2];
        if turn_angle(first - prev, path[1] - first) > crease_angle {
            normals.push(flip(segment_normal(first, path[1])));
        } else {
            normals.push(smooth(prev, path[1]));
        }
    } else {
        normals.push(flip(segment_normal(first, path[1])));
    }

    let mut prev = first;
    for i in 1..n - 1 {
        let (p, next) = (path[i], path[i + 1]);
        points.push(p);
        if turn_angle(p - prev, next - p) > crease_angle {
            normals.push(flip(segment_normal(prev, p)));
            points.push(p);
            normals.push(flip(segment_normal(p, next)));
        } else {
            normals.push(smooth(prev, next));
        }
        prev = p;
    }

    let last = path[n - 1];
    points.push(last);
    if closed {
        let next = path[1];
        if turn_angle(last - prev, next - last) > crease_angle {
            normals.push(flip(segment_normal(prev, last)));
        } else {
            normals.push(smooth(prev, next));
        }
    } else {
        let repeated = normals[normals.len() - 1];
        normals.push(repeated);
    }

    Ok(PathNormals { points, normals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{vec2, InnerSpace};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_degenerate_profile_is_rejected() {
        assert!(matches!(
            compute_path_normals(&[], 0.5, false, 1.0),
            Err(GeometryError::DegenerateProfile { points: 0 })
        ));
        assert!(matches!(
            compute_path_normals(&[vec2(1.0, 0.0)], 0.5, true, 1.0),
            Err(GeometryError::DegenerateProfile { points: 1 })
        ));
    }

    #[test]
    fn test_two_point_profile_repeats_segment_normal() {
        let path = [vec2(3.0, 10.0), vec2(3.0, -10.0)];
        let result = compute_path_normals(&path, 0.5, true, 1.0).unwrap();
        assert_eq!(result.points, path.to_vec());
        assert_eq!(result.normals.len(), 2);
        assert_relative_eq!(result.normals[0].x, 1.0);
        assert_relative_eq!(result.normals[0].y, 0.0);
        assert_eq!(result.normals[0], result.normals[1]);
    }

    #[test]
    fn test_sharp_corner_splits_vertex() {
        // right angle at (1, 1)
        let path = [vec2(1.0, 2.0), vec2(1.0, 1.0), vec2(2.0, 1.0)];
        let result = compute_path_normals(&path, 0.5, false, 1.0).unwrap();

        assert_eq!(result.len(), path.len() + 1);
        assert_eq!(result.normals.len(), result.points.len());
        assert_eq!(result.points[1], result.points[2]);
        assert_ne!(result.normals[1], result.normals[2]);

        // incoming segment runs straight down, outgoing runs right
        assert_relative_eq!(result.normals[1].x, 1.0);
        assert_relative_eq!(result.normals[2].y, 1.0);
    }

    #[test]
    fn test_gentle_turn_is_smoothed() {
        let path = [vec2(1.0, 2.0), vec2(1.1, 1.0), vec2(1.0, 0.0)];
        let result = compute_path_normals(&path, 0.5, false, 1.0).unwrap();
        assert_eq!(result.len(), 3);
        let chord = path[2] - path[0];
        assert_relative_eq!(result.normals[1].dot(chord), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_open_path_repeats_last_normal() {
        let path = [vec2(1.0, 2.0), vec2(1.1, 1.0), vec2(1.0, 0.0), vec2(0.8, -1.0)];
        let result = compute_path_normals(&path, 0.5, false, 1.0).unwrap();
        let n = result.normals.len();
        assert_eq!(result.normals[n - 1], result.normals[n - 2]);
    }

    #[test]
    fn test_closed_smooth_loop_keeps_point_count() {
        let divs = 30;
        let step = std::f32::consts::TAU / divs as f32;
        let path: Vec<Vec2> = (0..=divs)
            .map(|r| {
                let a = r as f32 * step;
                vec2(5.0 + 2.0 * a.sin(), 2.0 * a.cos())
            })
            .collect();
        let result = compute_path_normals(&path, 0.5, true, 1.0).unwrap();
        assert_eq!(result.len(), divs + 1);

        // wrapped boundary normals agree across the seam
        assert_relative_eq!(result.normals[0].x, result.normals[divs].x, epsilon = 1e-5);
        assert_relative_eq!(result.normals[0].y, result.normals[divs].y, epsilon = 1e-5);
        // the top of the ring faces up
        assert_relative_eq!(result.normals[0].y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_closed_boundary_crease_emits_single_normal() {
        // square loop: every corner is a right angle
        let path = [
            vec2(2.0, 1.0),
            vec2(4.0, 1.0),
            vec2(4.0, -1.0),
            vec2(2.0, -1.0),
            vec2(2.0, 1.0),
        ];
        let result = compute_path_normals(&path, 0.5, true, 1.0).unwrap();
        // three interior corners split, boundaries do not
        assert_eq!(result.len(), 8);
        assert_relative_eq!(result.normals[0].y, 1.0);
        assert_relative_eq!(result.normals[7].x, -1.0);
    }

    #[test]
    fn test_inverted_flips_every_normal() {
        let path = [vec2(1.0, 2.0), vec2(1.0, 1.0), vec2(2.0, 1.0), vec2(2.5, 0.0)];
        let outward = compute_path_normals(&path, 0.5, false, 1.0).unwrap();
        let inward = compute_path_normals(&path, 0.5, false, -1.0).unwrap();
        assert_eq!(outward.points, inward.points);
        for (a, b) in outward.normals.iter().zip(&inward.normals) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn test_smoothed_normals_are_perpendicular_to_chord() {
        let mut rng = StdRng::seed_from_u64(0x1a7e);
        for _ in 0..50 {
            let len = rng.random_range(3..12);
            let path: Vec<Vec2> = (0..len)
                .map(|i| vec2(rng.random_range(0.5..5.0), 10.0 - i as f32))
                .collect();
            // a crease angle above pi never splits
            let result = compute_path_normals(&path, 4.0, false, 1.0).unwrap();
            assert_eq!(result.len(), path.len());
            for i in 1..path.len() - 1 {
                let chord = path[i + 1] - path[i - 1];
                assert_relative_eq!(result.normals[i].dot(chord), 0.0, epsilon = 1e-4);
            }
        }
    }
}
