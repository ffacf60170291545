//! Wavefront OBJ import into the packed vertex layout.
//!
//! Meshes are loaded triangulated with a single index stream, then flattened
//! to three packed vertices per triangle. Files without normals get the face
//! normal on every corner.

use std::io::BufRead;
use std::path::Path;

use cgmath::InnerSpace;
use log::{debug, warn};

use super::math::{vec2, vec3, Vec2, Vec3};
use super::vertex::{PackedVertex, VERTEX_STRIDE};
use crate::error::Result;

/// Triangle-list geometry read from an OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    /// Flat packed vertices, three per triangle
    pub verts: Vec<f32>,
    /// Diffuse colour of the first material, with dissolve as alpha
    pub diffuse: Option<[f32; 4]>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Loads every model in `path` into one triangle list
pub fn load_obj(path: &Path) -> Result<ObjMesh> {
    let (models, materials) = tobj::load_obj(path, &load_options())?;
    let materials = materials.unwrap_or_else(|e| {
        warn!("No materials for {}: {}", path.display(), e);
        Vec::new()
    });
    let mesh = build_mesh(&models, &materials);
    debug!(
        "loaded {} ({} models, {} triangles)",
        path.display(),
        models.len(),
        mesh.verts.len() / (VERTEX_STRIDE * 3)
    );
    Ok(mesh)
}

/// Parses OBJ text from a reader; material libraries are not resolved
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> Result<ObjMesh> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    Ok(build_mesh(&models, &[]))
}

fn build_mesh(models: &[tobj::Model], materials: &[tobj::Material]) -> ObjMesh {
    let mut verts = Vec::new();
    for model in models {
        flatten_mesh(&model.mesh, &mut verts);
    }

    let diffuse = materials
        .first()
        .and_then(|m| m.diffuse.map(|d| [d[0], d[1], d[2], m.dissolve.unwrap_or(1.0)]));

    ObjMesh { verts, diffuse }
}

fn read3(data: &[f32], index: usize) -> Option<Vec3> {
    let s = data.get(index * 3..index * 3 + 3)?;
    Some(vec3(s[0], s[1], s[2]))
}

fn read2(data: &[f32], index: usize) -> Option<Vec2> {
    let s = data.get(index * 2..index * 2 + 2)?;
    Some(vec2(s[0], s[1]))
}

/// Appends one packed vertex per index of a triangulated mesh
pub fn flatten_mesh(mesh: &tobj::Mesh, verts: &mut Vec<f32>) {
    verts.reserve(mesh.indices.len() * VERTEX_STRIDE);

    for tri in mesh.indices.chunks_exact(3) {
        let idx = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(a), Some(b), Some(c)) = (
            read3(&mesh.positions, idx[0]),
            read3(&mesh.positions, idx[1]),
            read3(&mesh.positions, idx[2]),
        ) else {
            continue;
        };

        let cross = (b - a).cross(c - a);
        let face_normal = if cross.magnitude2() > 0.0 {
            cross.normalize()
        } else {
            vec3(0.0, 0.0, 0.0)
        };

        for (corner, (&i, position)) in idx.iter().zip([a, b, c]).enumerate() {
            let normal = read3(&mesh.normals, i).unwrap_or(face_normal);
            let uv = read2(&mesh.texcoords, i).unwrap_or(vec2(0.0, 0.0));
            PackedVertex::new(corner as f32, position, normal, uv).push_to(verts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_quad_face_is_triangulated() {
        let mesh = load_obj_from_reader(&mut Cursor::new(QUAD)).unwrap();
        let packed = PackedVertex::cast_slice(&mesh.verts).unwrap();
        assert_eq!(packed.len(), 6);
        assert!(mesh.diffuse.is_none());
    }

    #[test]
    fn test_missing_normals_use_face_normal() {
        let mesh = load_obj_from_reader(&mut Cursor::new(QUAD)).unwrap();
        for v in PackedVertex::cast_slice(&mesh.verts).unwrap() {
            assert_relative_eq!(v.normal[2], 1.0);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
    }

    #[test]
    fn test_file_normals_and_uvs_are_kept() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 1 0
f 1/1/1 2/2/1 3/3/1
";
        let mesh = load_obj_from_reader(&mut Cursor::new(src)).unwrap();
        let packed = PackedVertex::cast_slice(&mesh.verts).unwrap();
        assert_eq!(packed.len(), 3);
        assert_eq!(packed[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(packed[1].uv, [1.0, 0.0]);
        assert_eq!(packed[2].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            load_obj(Path::new("does/not/exist.obj")),
            Err(GeometryError::Obj(_))
        ));
    }
}
