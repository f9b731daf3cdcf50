//! Depth buffer for the chunk render pass.
//!
//! An embedder creates one [`DepthTexture`] per surface size, recreates it on
//! resize, and passes [`DepthTexture::attachment`] as the depth attachment of
//! the pass it hands to [`ChunkPipeline::begin`](super::wgpu_backend::ChunkPipeline::begin):
//!
//! ```ignore
//! let depth = DepthTexture::new(&device, config.width, config.height, "Depth Texture");
//! let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
//!     label: Some("Chunk Pass"),
//!     color_attachments: &[Some(color_attachment)],
//!     depth_stencil_attachment: Some(depth.attachment()),
//!     ..Default::default()
//! });
//! world.render(&mut pipeline.begin(&mut pass), &camera_state);
//! ```

/// A depth texture sized to the render target, with its view.
pub struct DepthTexture {
    /// The underlying WebGPU texture resource.
    pub texture: wgpu::Texture,
    /// View bound as the pass's depth attachment.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// The texture format used for depth buffers.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a `width`×`height` depth texture. Zero sizes are bumped to one.
    pub fn new(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// Depth test state matching [`Self::DEPTH_FORMAT`]: nearer fragments win.
    pub fn depth_stencil_state() -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Self::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }

    /// Attachment that clears depth to the far plane at the start of a pass.
    pub fn attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }
    }
}
