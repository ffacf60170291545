//! Shape entities and draw dispatch.
//!
//! A [`Shape`] fixes its kind and dimensions at construction. Its vertex array
//! is generated on first use and cached for the rest of its life; only the
//! transform and material fields change from frame to frame.

use std::path::{Path, PathBuf};

use cgmath::{Deg, Matrix4, Vector3};
use log::debug;

use crate::error::{GeometryError, RenderError, Result};
use crate::gfx::geometry::{
    create_cone, create_cuboid, create_cylinder, create_plane, create_sphere, create_spring,
    create_torus, create_truncated_cone, create_tube, extrude, lathe, load_obj, LatheParams, Vec2,
    EXTRUDE_EDGES, VERTEX_STRIDE,
};
use crate::gfx::rendering::quads::{direct_quads, shared_quads, triangles};
use crate::gfx::rendering::renderer::{DrawState, Renderer, TextureId};

/// Opaque white, packed as `0xAABBGGRR`
pub const WHITE: u32 = 0xffff_ffff;

/// Default angular subdivisions for lathe shapes
pub const DEFAULT_EDGES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeType {
    /// Draws nothing; handed out for unknown names
    #[default]
    Empty,
    Cuboid,
    Plane,
    Sphere,
    Cylinder,
    Cone,
    TruncatedCone,
    Tube,
    Torus,
    Spring,
    /// User profile revolved with user [`LatheParams`]
    Lathe,
    /// User profile extruded along Z
    Extrude,
    /// Triangles loaded from an OBJ file
    Mesh,
}

/// How a shape's flat vertex array is turned into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Quads,
    SharedQuads { edges: u32 },
    Triangles,
}

/// Unpacks `0xAABBGGRR` into RGBA floats
pub fn unpack_color(color: u32) -> [f32; 4] {
    [
        (color & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 24) & 0xff) as f32 / 255.0,
    ]
}

/// Packs RGBA floats (clamped to `0..=1`) into `0xAABBGGRR`
pub fn pack_color(rgba: [f32; 4]) -> u32 {
    rgba.iter()
        .enumerate()
        .map(|(i, c)| ((c.clamp(0.0, 1.0) * 255.0).round() as u32) << (8 * i))
        .fold(0, |acc, c| acc | c)
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub name: String,
    kind: ShapeType,
    dimensions: [f32; 3],
    edges: u32,
    profile: Vec<Vec2>,
    params: LatheParams,
    path: PathBuf,

    /// Translation in world units
    pub position: Vector3<f32>,
    /// Euler rotation in degrees, applied X then Y then Z
    pub rotation: Vector3<f32>,
    /// Flat colour packed as `0xAABBGGRR`
    pub color: u32,
    pub texture: Option<TextureId>,
    /// Image to load into `texture` when the scene's textures are loaded
    pub texture_path: Option<PathBuf>,

    verts: Option<Vec<f32>>,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ShapeType::Empty,
            dimensions: [0.0; 3],
            edges: 0,
            profile: Vec::new(),
            params: LatheParams::default(),
            path: PathBuf::new(),
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            color: WHITE,
            texture: None,
            texture_path: None,
            verts: None,
        }
    }
}

impl Shape {
    /// A built-in shape. See [`ShapeType`] for what `w`, `h` and `d` mean per kind:
    ///
    /// | kind | w | h | d |
    /// |---|---|---|---|
    /// | Plane | half width | half height | |
    /// | Cuboid | half width | half height | half depth |
    /// | Sphere | radius | hemisphere fraction | sign (mirror when negative) |
    /// | Cylinder, Cone | radius | height | |
    /// | TruncatedCone | top radius | height | bottom radius |
    /// | Tube | inner radius | outer radius | length |
    /// | Torus | radius | ring radius | ring divisions |
    /// | Spring | radius | wire radius | total rise |
    pub fn new(name: impl Into<String>, kind: ShapeType, w: f32, h: f32, d: f32, edges: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            dimensions: [w, h, d],
            edges,
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lathe(name: impl Into<String>, profile: Vec<Vec2>, params: LatheParams) -> Self {
        Self {
            name: name.into(),
            kind: ShapeType::Lathe,
            edges: params.edges,
            profile,
            params,
            ..Default::default()
        }
    }

    /// Extrudes `profile` to `depth`; crease angle, closure and origin come from `params`
    pub fn extrude(
        name: impl Into<String>,
        profile: Vec<Vec2>,
        depth: f32,
        params: LatheParams,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ShapeType::Extrude,
            dimensions: [0.0, 0.0, depth],
            edges: EXTRUDE_EDGES,
            profile,
            params,
            ..Default::default()
        }
    }

    pub fn mesh(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            kind: ShapeType::Mesh,
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, path: impl AsRef<Path>) -> Self {
        self.texture_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn kind(&self) -> ShapeType {
        self.kind
    }

    pub fn dimensions(&self) -> [f32; 3] {
        self.dimensions
    }

    pub fn edges(&self) -> u32 {
        self.edges
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vector3::new(dx, dy, dz);
    }

    /// Adds to the Euler rotation, in degrees
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vector3::new(dx, dy, dz);
    }

    pub fn is_generated(&self) -> bool {
        self.verts.is_some()
    }

    pub fn draw_mode(&self) -> DrawMode {
        match self.kind {
            ShapeType::Empty | ShapeType::Cuboid | ShapeType::Plane => DrawMode::Quads,
            ShapeType::Mesh => DrawMode::Triangles,
            _ => DrawMode::SharedQuads { edges: self.edges },
        }
    }

    /// Translation followed by rotation about X, Y and Z (degrees).
    ///
    /// Axes with an exactly zero angle are skipped.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let mut model = Matrix4::from_translation(self.position);
        if self.rotation.x != 0.0 {
            model = model * Matrix4::from_angle_x(Deg(self.rotation.x));
        }
        if self.rotation.y != 0.0 {
            model = model * Matrix4::from_angle_y(Deg(self.rotation.y));
        }
        if self.rotation.z != 0.0 {
            model = model * Matrix4::from_angle_z(Deg(self.rotation.z));
        }
        model
    }

    pub fn draw_state(&self) -> DrawState {
        DrawState {
            model: self.model_matrix(),
            color: unpack_color(self.color),
            texture: self.texture,
        }
    }

    /// The shape's packed vertices, generated on the first call
    pub fn vertices(&mut self) -> Result<&[f32]> {
        if self.verts.is_none() {
            let verts = self.generate()?;
            debug!(
                "generated {:?} '{}': {} vertices",
                self.kind,
                self.name,
                verts.len() / VERTEX_STRIDE
            );
            self.verts = Some(verts);
        }
        Ok(self.verts.as_deref().unwrap_or_default())
    }

    fn generate(&mut self) -> Result<Vec<f32>> {
        let [w, h, d] = self.dimensions;
        let edges = self.edges;
        match self.kind {
            ShapeType::Empty => Ok(Vec::new()),
            ShapeType::Plane => Ok(create_plane(w, h)),
            ShapeType::Cuboid => Ok(create_cuboid(w, h, d)),
            ShapeType::Sphere => create_sphere(w, h, d, edges),
            ShapeType::Cylinder => create_cylinder(w, h, edges),
            ShapeType::Cone => create_cone(w, h, edges),
            ShapeType::TruncatedCone => create_truncated_cone(w, d, h, edges),
            ShapeType::Tube => create_tube(w, h, d, edges),
            ShapeType::Torus => create_torus(w, h, d.max(0.0) as usize, edges),
            ShapeType::Spring => create_spring(w, h, d, edges),
            ShapeType::Lathe => {
                if self.profile.is_empty() {
                    return Err(GeometryError::MissingProfile);
                }
                lathe(&self.profile, &self.params)
            }
            ShapeType::Extrude => {
                if self.profile.is_empty() {
                    return Err(GeometryError::MissingProfile);
                }
                extrude(
                    &self.profile,
                    d,
                    self.params.crease_angle,
                    self.params.closed,
                    self.params.origin,
                )
            }
            ShapeType::Mesh => {
                let mesh = load_obj(&self.path)?;
                if let Some(diffuse) = mesh.diffuse {
                    self.color = pack_color(diffuse);
                }
                Ok(mesh.verts)
            }
        }
    }

    /// Generates (first time only), decodes and submits the shape
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> std::result::Result<(), RenderError> {
        let mode = self.draw_mode();
        let verts = self.vertices()?;
        if verts.is_empty() {
            return Ok(());
        }
        let state = self.draw_state();

        match mode {
            DrawMode::Quads => renderer.draw_quads(&state, &direct_quads(self.cached())?),
            DrawMode::SharedQuads { edges } => {
                renderer.draw_quads(&state, &shared_quads(self.cached(), edges)?)
            }
            DrawMode::Triangles => renderer.draw_triangles(&state, &triangles(self.cached())?),
        }
        Ok(())
    }

    fn cached(&self) -> &[f32] {
        self.verts.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{vec2, vec3, PackedVertex};
    use crate::gfx::rendering::capture::{CaptureRenderer, DrawCall};
    use approx::assert_relative_eq;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn test_unpack_color_channel_order() {
        assert_eq!(unpack_color(0xff00_00ff), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(unpack_color(0x8000_ff00)[1], 1.0);
        assert_relative_eq!(unpack_color(0x8000_ff00)[3], 128.0 / 255.0);
    }

    #[test]
    fn test_pack_color_inverts_unpack() {
        for c in [0u32, WHITE, 0xff20_40c0, 0x0102_0304] {
            assert_eq!(pack_color(unpack_color(c)), c);
        }
    }

    #[test]
    fn test_model_matrix_translates_after_rotating() {
        let shape = Shape::new("c", ShapeType::Cuboid, 1.0, 1.0, 1.0, 0)
            .with_position(10.0, 0.0, 0.0)
            .with_rotation(0.0, 90.0, 0.0);
        let p = shape.model_matrix() * Vector4::new(0.0, 0.0, 1.0, 1.0);
        // +Z turns to +X under a 90 degree Y rotation, then moves by 10
        assert_relative_eq!(p.x, 11.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let shape = Shape::new("c", ShapeType::Cuboid, 1.0, 1.0, 1.0, 0).with_rotation(30.0, 45.0, 60.0);
        let expected = Matrix4::from_angle_x(Deg(30.0))
            * Matrix4::from_angle_y(Deg(45.0))
            * Matrix4::from_angle_z(Deg(60.0));
        assert_eq!(shape.model_matrix(), expected);
        assert_eq!(Shape::empty().model_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_vertices_are_generated_once() {
        let mut shape = Shape::new("t", ShapeType::Torus, 5.0, 2.0, 30.0, 20);
        assert!(!shape.is_generated());
        let first = shape.vertices().unwrap().as_ptr();
        assert!(shape.is_generated());
        shape.rotate(1.0, 2.0, 3.0);
        let second = shape.vertices().unwrap().as_ptr();
        assert_eq!(first, second);
        assert_eq!(shape.vertices().unwrap().len(), 5859);
    }

    #[test]
    fn test_draw_dispatch_per_kind() {
        let mut renderer = CaptureRenderer::new();
        Shape::new("cyl", ShapeType::Cylinder, 3.0, 20.0, 0.0, 8)
            .draw(&mut renderer)
            .unwrap();
        Shape::new("box", ShapeType::Cuboid, 1.0, 1.0, 1.0, 0)
            .draw(&mut renderer)
            .unwrap();
        assert_eq!(renderer.calls.len(), 2);
        assert_eq!(renderer.quad_count(), 8 + 6);
    }

    #[test]
    fn test_draw_state_carries_material() {
        let mut renderer = CaptureRenderer::new();
        let mut shape = Shape::new("p", ShapeType::Plane, 1.0, 1.0, 0.0, 0).with_color(0xff00_ff00);
        shape.texture = Some(TextureId(3));
        shape.draw(&mut renderer).unwrap();
        let state = renderer.calls[0].state();
        assert_eq!(state.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(state.texture, Some(TextureId(3)));
    }

    #[test]
    fn test_empty_shape_draws_nothing() {
        let mut renderer = CaptureRenderer::new();
        Shape::empty().draw(&mut renderer).unwrap();
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_zero_edges_fails_generation() {
        let mut shape = Shape::new("bad", ShapeType::Cylinder, 1.0, 1.0, 0.0, 0);
        assert!(matches!(shape.vertices(), Err(GeometryError::ZeroEdges)));
        assert!(!shape.is_generated());
    }

    #[test]
    fn test_lathe_shape_without_profile_is_rejected() {
        let mut shape = Shape::lathe("l", Vec::new(), LatheParams::full(8));
        assert!(matches!(shape.vertices(), Err(GeometryError::MissingProfile)));
    }

    #[test]
    fn test_custom_lathe_shape_uses_its_params() {
        let profile = vec![vec2(1.0, 1.0), vec2(1.2, 0.0), vec2(1.0, -1.0)];
        let params = LatheParams::full(6).with_closed(false).with_origin(vec3(0.0, 5.0, 0.0));
        let mut shape = Shape::lathe("vase", profile, params);
        assert_eq!(shape.draw_mode(), DrawMode::SharedQuads { edges: 6 });
        let verts = shape.vertices().unwrap();
        let packed = PackedVertex::cast_slice(verts).unwrap();
        assert_eq!(packed.len(), 3 * 7);
        assert_relative_eq!(packed[0].position[1], 6.0);
    }

    #[test]
    fn test_extrude_shape_draws_one_quad_per_segment() {
        let profile = vec![vec2(0.0, 0.0), vec2(1.0, 0.2), vec2(2.0, 0.0)];
        let mut shape = Shape::extrude("ridge", profile, 2.0, LatheParams::default().with_closed(false));
        let mut renderer = CaptureRenderer::new();
        shape.draw(&mut renderer).unwrap();
        assert_eq!(renderer.quad_count(), 2);
    }

    #[test]
    fn test_mesh_shape_draws_triangles_with_material_color() {
        let dir = std::env::temp_dir().join(format!("lathekit-mesh-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("tri.mtl"), "newmtl red\nKd 1 0 0\n").unwrap();
        std::fs::write(
            dir.join("tri.obj"),
            "mtllib tri.mtl\nusemtl red\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();

        let mut shape = Shape::mesh("tri", dir.join("tri.obj"));
        let mut renderer = CaptureRenderer::new();
        shape.draw(&mut renderer).unwrap();
        assert_eq!(renderer.triangle_count(), 1);
        assert!(matches!(renderer.calls[0], DrawCall::Triangles { .. }));
        assert_eq!(shape.color, 0xff00_00ff);

        std::fs::remove_dir_all(&dir).ok();
    }
}
