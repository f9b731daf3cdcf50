//! wgpu implementation of the rendering collaborators.
//!
//! Each chunk mesh becomes its own vertex/index buffer pair. Matrices travel as
//! push constants: the view-projection at offset 0 once per pass, the model
//! matrix at offset 64 before every draw. The device must be created with
//! [`ChunkPipeline::required_features`] and [`ChunkPipeline::required_limits`].

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use super::backend::{ChunkShader, MeshUploader};
use super::texture::DepthTexture;
use super::Vertex;

/// Byte offset of the view-projection push constant.
const VIEW_PROJECTION_OFFSET: u32 = 0;
/// Byte offset of the model push constant.
const MODEL_OFFSET: u32 = 64;
/// Total push constant range used by the chunk shader.
const PUSH_CONSTANT_SIZE: u32 = 128;

/// Raw bytes of a column-major matrix as the shader expects them.
fn matrix_bytes(matrix: Matrix4<f32>) -> [u8; 64] {
    let columns: [[f32; 4]; 4] = matrix.into();
    bytemuck::cast(columns)
}

/// Vertex and index buffers of one uploaded chunk mesh.
///
/// Dropping this releases both buffers.
#[derive(Debug)]
pub struct GpuMeshBuffers {
    /// Vertex buffer
    pub vertex_buffer: wgpu::Buffer,
    /// `u32` index buffer
    pub index_buffer: wgpu::Buffer,
}

/// Uploads chunk meshes into fresh GPU buffers.
pub struct WgpuMeshUploader<'d> {
    device: &'d wgpu::Device,
}

impl<'d> WgpuMeshUploader<'d> {
    /// Creates an uploader on `device`.
    pub fn new(device: &'d wgpu::Device) -> Self {
        Self { device }
    }
}

impl MeshUploader for WgpuMeshUploader<'_> {
    type Buffers = GpuMeshBuffers;

    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]) -> GpuMeshBuffers {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        GpuMeshBuffers {
            vertex_buffer,
            index_buffer,
        }
    }
}

/// The render pipeline used to draw chunk meshes.
pub struct ChunkPipeline {
    render_pipeline: wgpu::RenderPipeline,
}

impl ChunkPipeline {
    /// Device features the pipeline needs.
    pub fn required_features() -> wgpu::Features {
        wgpu::Features::PUSH_CONSTANTS
    }

    /// Device limits the pipeline needs.
    pub fn required_limits() -> wgpu::Limits {
        wgpu::Limits {
            max_push_constant_size: PUSH_CONSTANT_SIZE,
            ..wgpu::Limits::default()
        }
    }

    /// Creates the pipeline for color target `format`, depth tested against a
    /// [`DepthTexture`].
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Chunk Render Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[wgpu::PushConstantRange {
                stages: wgpu::ShaderStages::VERTEX,
                range: 0..PUSH_CONSTANT_SIZE,
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Chunk Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/chunk.wgsl").into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Chunk Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(DepthTexture::depth_stencil_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        Self { render_pipeline }
    }

    /// Wraps an open render pass so a world can draw into it.
    pub fn begin<'a, 'p>(&'a self, render_pass: &'a mut wgpu::RenderPass<'p>) -> ChunkPass<'a, 'p> {
        ChunkPass {
            pipeline: self,
            render_pass,
        }
    }
}

/// A render pass drawing chunk meshes with a [`ChunkPipeline`].
pub struct ChunkPass<'a, 'p> {
    pipeline: &'a ChunkPipeline,
    render_pass: &'a mut wgpu::RenderPass<'p>,
}

impl ChunkShader<GpuMeshBuffers> for ChunkPass<'_, '_> {
    fn use_program(&mut self) {
        self.render_pass
            .set_pipeline(&self.pipeline.render_pipeline);
    }

    fn set_view_projection(&mut self, view_projection: Matrix4<f32>) {
        self.render_pass.set_push_constants(
            wgpu::ShaderStages::VERTEX,
            VIEW_PROJECTION_OFFSET,
            &matrix_bytes(view_projection),
        );
    }

    fn set_model_matrix(&mut self, model: Matrix4<f32>) {
        self.render_pass.set_push_constants(
            wgpu::ShaderStages::VERTEX,
            MODEL_OFFSET,
            &matrix_bytes(model),
        );
    }

    fn draw_indexed(&mut self, buffers: &GpuMeshBuffers, index_count: u32) {
        if index_count == 0 {
            return;
        }
        self.render_pass
            .set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        self.render_pass
            .set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}
