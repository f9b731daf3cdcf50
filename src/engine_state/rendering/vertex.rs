//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format produced by the greedy mesher and the
//! matching buffer layout for the chunk render pipeline.

/// A vertex in the voxel rendering pipeline.
///
/// Positions are in chunk-local cell units; the per-chunk model matrix moves
/// them into world space. Normals are flat per face.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Block Id: f32 (4 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Corner position in chunk-local coordinates
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Block id of the face's material, as a float for the shader
    pub block_id: f32,
}

impl Vertex {
    /// Creates a vertex with a zero normal; the mesher fills normals in once
    /// every triangle is known.
    pub fn new(position: [f32; 3], block_id: u32) -> Self {
        Vertex {
            position,
            normal: [0.0; 3],
            block_id: block_id as f32,
        }
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: block_id (f32)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 28);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 24);
    }
}
