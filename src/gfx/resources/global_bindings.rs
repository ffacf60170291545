//! Global uniform bindings for camera and light data
//!
//! One uniform buffer shared by every draw in a frame, bound to slot 0.

use cgmath::{frustum, Matrix4, Vector3};

use crate::{
    config::LightConfig,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Maps OpenGL clip space (z in -1..1) to wgpu clip space (z in 0..1)
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Global uniform buffer content.
///
/// MUST match the `Globals` struct in `shapes.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    view_proj: [[f32; 4]; 4],
    /// xyz: unit direction towards the light
    light_dir: [f32; 4],
    /// x: ambient, y: diffuse
    light_terms: [f32; 4],
}
// 64 + 16 + 16 = 96 bytes

impl GlobalUniform {
    pub fn new(view_proj: Matrix4<f32>, light: &LightConfig) -> Self {
        let [x, y, z] = light.direction;
        let len = (x * x + y * y + z * z).sqrt();
        let dir = if len > 0.0 {
            [x / len, y / len, z / len, 0.0]
        } else {
            [0.0, 0.0, 1.0, 0.0]
        };
        Self {
            view_proj: view_proj.into(),
            light_dir: dir,
            light_terms: [light.ambient, light.diffuse, 0.0, 0.0],
        }
    }
}

/// Perspective frustum widened horizontally by the aspect ratio.
///
/// Spans `-1-f..1+f` by `-1..1` at the near plane with `f = width/height - 1`.
pub fn projection_matrix(width: u32, height: u32, near: f32, far: f32) -> Matrix4<f32> {
    let f = width.max(1) as f32 / height.max(1) as f32 - 1.0;
    OPENGL_TO_WGPU_MATRIX * frustum(-1.0 - f, 1.0 + f, -1.0, 1.0, near, far)
}

/// View matrix panning the world opposite to the player.
///
/// Player `y` grows downwards, `z` grows towards the scene.
pub fn view_matrix(player: Vector3<f32>, pan_scale: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(-player.x, player.y, player.z) * pan_scale)
}

pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Bind group layout and bind group for the global uniforms
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        Self { layout, bind_group }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector4;

    #[test]
    fn test_square_window_projection_maps_near_corners() {
        let proj = projection_matrix(600, 600, 1.0, 100.0);
        let corner = proj * Vector4::new(1.0, 1.0, -1.0, 1.0);
        assert_relative_eq!(corner.x / corner.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.y / corner.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.z / corner.w, 0.0, epsilon = 1e-5);

        let far = proj * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_wide_window_widens_frustum() {
        // 800x600: f = 1/3, the near plane spans x in -4/3..4/3
        let proj = projection_matrix(800, 600, 1.0, 100.0);
        let edge = proj * Vector4::new(4.0 / 3.0, 0.0, -1.0, 1.0);
        assert_relative_eq!(edge.x / edge.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_view_pans_against_player() {
        let view = view_matrix(Vector3::new(20.0, 40.0, 0.0), 0.05);
        let origin = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin.x, -1.0);
        assert_relative_eq!(origin.y, 2.0);
    }

    #[test]
    fn test_light_direction_is_normalised() {
        let uniform = GlobalUniform::new(Matrix4::from_scale(1.0), &LightConfig::default());
        let [x, y, z, _] = uniform.light_dir;
        assert_relative_eq!((x * x + y * y + z * z).sqrt(), 1.0, epsilon = 1e-6);
        assert_eq!(uniform.light_terms[0], 0.5);
    }
}
