//! # Packed Vertex Layout
//!
//! Every generator emits a flat `Vec<f32>` with nine floats per vertex:
//!
//! ```text
//! [tag, px, py, pz, nx, ny, nz, u, v]
//! ```
//!
//! The leading `tag` slot is carried for buffer compatibility and is not read by
//! the renderers. [`PackedVertex`] is the typed view of one such record; a flat
//! array can be reinterpreted as `&[PackedVertex]` without copying.

use super::math::{Vec2, Vec3};
use crate::error::{GeometryError, Result};

/// Number of floats per packed vertex
pub const VERTEX_STRIDE: usize = 9;

/// One vertex of a flat vertex array.
///
/// # Memory Layout
///
/// `#[repr(C)]` with nine `f32` fields and no padding, so it is `Pod` and
/// byte-identical to nine consecutive floats of the flat array.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVertex {
    /// Unused numeric slot (corner index for hand-built faces, 0 for lathe output)
    pub tag: f32,
    /// Position [x, y, z]
    pub position: [f32; 3],
    /// Normal [nx, ny, nz], not necessarily unit length
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub uv: [f32; 2],
}

impl PackedVertex {
    pub fn new(tag: f32, position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            tag,
            position: position.into(),
            normal: normal.into(),
            uv: uv.into(),
        }
    }

    /// Appends this vertex's nine floats to a flat array
    #[inline]
    pub fn push_to(&self, verts: &mut Vec<f32>) {
        verts.extend_from_slice(bytemuck::cast_slice(std::slice::from_ref(self)));
    }

    /// Views a flat vertex array as packed vertices.
    ///
    /// Fails when the array length is not a multiple of [`VERTEX_STRIDE`].
    pub fn cast_slice(verts: &[f32]) -> Result<&[PackedVertex]> {
        bytemuck::try_cast_slice(verts)
            .map_err(|_| GeometryError::MisalignedVertices { len: verts.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec2, vec3};

    #[test]
    fn test_packed_vertex_float_order() {
        let v = PackedVertex::new(
            3.0,
            vec3(1.0, 2.0, 3.0),
            vec3(0.0, 1.0, 0.0),
            vec2(0.25, 0.75),
        );
        let mut flat = Vec::new();
        v.push_to(&mut flat);
        assert_eq!(flat, vec![3.0, 1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.75]);
        assert_eq!(std::mem::size_of::<PackedVertex>(), VERTEX_STRIDE * 4);
    }

    #[test]
    fn test_cast_slice_views_flat_array() {
        let flat: Vec<f32> = (0..18).map(|i| i as f32).collect();
        let packed = PackedVertex::cast_slice(&flat).unwrap();
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[1].tag, 9.0);
        assert_eq!(packed[1].position, [10.0, 11.0, 12.0]);
        assert_eq!(packed[1].uv, [16.0, 17.0]);
    }

    #[test]
    fn test_cast_slice_rejects_partial_vertex() {
        let flat = vec![0.0f32; 10];
        assert!(matches!(
            PackedVertex::cast_slice(&flat),
            Err(GeometryError::MisalignedVertices { len: 10 })
        ));
    }
}
