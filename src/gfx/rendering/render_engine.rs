//! WGPU-based rendering engine
//!
//! Implements [`Renderer`] and [`TextureLoader`] on top of wgpu. Draw calls made
//! between `begin_frame` and `end_frame` are transformed to world space on the
//! CPU, grouped by texture, uploaded into one vertex buffer and drawn in a
//! single render pass.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cgmath::{Matrix4, Vector3, Vector4};
use log::{info, warn};

use crate::config::AppConfig;
use crate::error::{RenderError, TextureError};
use crate::gfx::geometry::PackedVertex;
use crate::gfx::resources::{
    global_bindings::{projection_matrix, view_matrix, GlobalBindings, GlobalUBO, GlobalUniform},
    texture_resource::TextureResource,
};
use crate::wgpu_utils::{binding_types, VertexArrayBuffer};

use super::renderer::{DrawState, Quad, Renderer, TextureId, TextureLoader, Triangle};

/// World-space vertex as uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl GpuVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Moves a packed vertex into world space with the draw's model matrix
    pub fn transformed(v: &PackedVertex, model: &Matrix4<f32>, color: [f32; 4]) -> Self {
        let [px, py, pz] = v.position;
        let [nx, ny, nz] = v.normal;
        let p = model * Vector4::new(px, py, pz, 1.0);
        let n = model * Vector4::new(nx, ny, nz, 0.0);
        Self {
            position: [p.x, p.y, p.z],
            normal: [n.x, n.y, n.z],
            uv: v.uv,
            color,
        }
    }
}

/// Appends two triangles per quad, `(0, 1, 2)` and `(0, 2, 3)`
pub fn triangulate_quads(state: &DrawState, quads: &[Quad], out: &mut Vec<GpuVertex>) {
    out.reserve(quads.len() * 6);
    for q in quads {
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(GpuVertex::transformed(&q[i], &state.model, state.color));
        }
    }
}

pub fn push_triangles(state: &DrawState, triangles: &[Triangle], out: &mut Vec<GpuVertex>) {
    out.reserve(triangles.len() * 3);
    for t in triangles {
        for v in t {
            out.push(GpuVertex::transformed(v, &state.model, state.color));
        }
    }
}

struct TextureSlot {
    _resource: TextureResource,
    bind_group: wgpu::BindGroup,
}

/// Vertices of one frame sharing a texture
#[derive(Default)]
struct Batch {
    texture: Option<TextureId>,
    vertices: Vec<GpuVertex>,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline: wgpu::RenderPipeline,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    texture_layout: wgpu::BindGroupLayout,
    white_texture: TextureSlot,
    textures: Vec<TextureSlot>,
    texture_paths: HashMap<PathBuf, TextureId>,
    vertex_buffer: VertexArrayBuffer<GpuVertex>,
    batches: Vec<Batch>,
    frame: Option<wgpu::SurfaceTexture>,
    settings: AppConfig,
    player: Vector3<f32>,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        settings: AppConfig,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                binding_types::fragment_entry(0, binding_types::texture_2d()),
                binding_types::fragment_entry(
                    1,
                    binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shapes Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shapes.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shapes Pipeline Layout"),
            bind_group_layouts: &[global_bindings.layout(), &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("SHAPES"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[GpuVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // lathe winding depends on sweep direction and inversion
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let white = TextureResource::create_white(&device, &queue);
        let white_texture = Self::make_slot(&device, &texture_layout, white);
        let vertex_buffer = VertexArrayBuffer::new(&device, 4096);

        Ok(RenderEngine {
            surface,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            depth_texture,
            pipeline,
            global_ubo,
            global_bindings,
            texture_layout,
            white_texture,
            textures: Vec::new(),
            texture_paths: HashMap::new(),
            vertex_buffer,
            batches: Vec::new(),
            frame: None,
            settings,
            player: Vector3::new(0.0, 0.0, 0.0),
        })
    }

    fn make_slot(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        resource: TextureResource,
    ) -> TextureSlot {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&resource.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&resource.sampler),
                },
            ],
        });
        TextureSlot {
            _resource: resource,
            bind_group,
        }
    }

    /// Sets the player position the view pans with
    pub fn set_player(&mut self, player: Vector3<f32>) {
        self.player = player;
    }

    /// Reconfigures the surface and depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn update_globals(&mut self) {
        let proj = projection_matrix(
            self.config.width,
            self.config.height,
            self.settings.near,
            self.settings.far,
        );
        let view = view_matrix(self.player, self.settings.pan_scale);
        let content = GlobalUniform::new(proj * view, &self.settings.light);
        self.global_ubo.update_content(&self.queue, content);
    }

    fn batch_for(&mut self, texture: Option<TextureId>) -> &mut Vec<GpuVertex> {
        let index = match self.batches.iter().position(|b| b.texture == texture) {
            Some(i) => i,
            None => {
                self.batches.push(Batch {
                    texture,
                    vertices: Vec::new(),
                });
                self.batches.len() - 1
            }
        };
        &mut self.batches[index].vertices
    }

    fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(self.surface.get_current_texture()?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Renderer for RenderEngine {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.batches.clear();
        self.frame = Some(self.acquire_frame()?);
        self.update_globals();
        Ok(())
    }

    fn draw_quads(&mut self, state: &DrawState, quads: &[Quad]) {
        triangulate_quads(state, quads, self.batch_for(state.texture));
    }

    fn draw_triangles(&mut self, state: &DrawState, triangles: &[Triangle]) {
        push_triangles(state, triangles, self.batch_for(state.texture));
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };

        let mut vertices = Vec::new();
        let mut ranges = Vec::with_capacity(self.batches.len());
        for batch in &self.batches {
            let start = vertices.len() as u32;
            vertices.extend_from_slice(&batch.vertices);
            ranges.push((batch.texture, start..vertices.len() as u32));
        }
        self.vertex_buffer
            .upload(&self.device, &self.queue, &vertices);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b, a] = self.settings.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !self.vertex_buffer.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));

                for (texture, range) in ranges {
                    if range.is_empty() {
                        continue;
                    }
                    let slot = texture
                        .and_then(|id| self.textures.get((id.0 as usize).wrapping_sub(1)))
                        .unwrap_or(&self.white_texture);
                    render_pass.set_bind_group(1, &slot.bind_group, &[]);
                    render_pass.draw(range, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl TextureLoader for RenderEngine {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, TextureError> {
        if let Some(&id) = self.texture_paths.get(path) {
            return Ok(id);
        }
        let resource = TextureResource::load(&self.device, &self.queue, path)?;
        self.textures.push(Self::make_slot(
            &self.device,
            &self.texture_layout,
            resource,
        ));
        // ids start at 1
        let id = TextureId(self.textures.len() as u32);
        self.texture_paths.insert(path.to_path_buf(), id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Deg, Matrix4};

    fn vertex(x: f32, y: f32) -> PackedVertex {
        PackedVertex {
            tag: 0.0,
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [x, y],
        }
    }

    #[test]
    fn test_quad_splits_into_two_triangles() {
        let quad = [vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(1.0, 1.0), vertex(0.0, 1.0)];
        let mut out = Vec::new();
        triangulate_quads(&DrawState::default(), &[quad], &mut out);
        let corners: Vec<[f32; 2]> = out.iter().map(|v| v.uv).collect();
        assert_eq!(
            corners,
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        );
    }

    #[test]
    fn test_model_matrix_moves_positions_and_turns_normals() {
        let state = DrawState {
            model: Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0))
                * Matrix4::from_angle_y(Deg(90.0)),
            color: [1.0, 0.0, 0.0, 1.0],
            texture: None,
        };
        let mut out = Vec::new();
        push_triangles(&state, &[[vertex(0.0, 0.0); 3]], &mut out);
        let v = out[0];
        assert_relative_eq!(v.position[2], -10.0, epsilon = 1e-5);
        // +Z normal turns to +X; translation does not move normals
        assert_relative_eq!(v.normal[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(v.normal[2], 0.0, epsilon = 1e-5);
        assert_eq!(v.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_gpu_vertex_layout_size() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 12 * 4);
        assert_eq!(GpuVertex::desc().attributes.len(), 4);
    }
}
