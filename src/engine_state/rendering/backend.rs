//! Rendering collaborator interfaces.
//!
//! The voxel core never talks to a graphics API directly. Mesh buffers are
//! created through a [`MeshUploader`] and drawn through a [`ChunkShader`];
//! [`wgpu_backend`](super::wgpu_backend) implements both for wgpu, and
//! [`CpuMeshStore`] keeps meshes in memory for headless runs.

use cgmath::Matrix4;

use super::meshing::MeshData;
use super::Vertex;

/// Creates GPU-side buffers from mesher output.
///
/// The returned buffers own their resources: dropping them releases the GPU
/// memory, which is how unloading a chunk destroys its mesh.
pub trait MeshUploader {
    /// Handle to an uploaded vertex/index buffer pair.
    type Buffers;

    /// Uploads `vertices` and the `u32` triangle list `indices`.
    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]) -> Self::Buffers;
}

/// Draw-call side of the renderer, generic over the buffer handle it draws.
pub trait ChunkShader<B: ?Sized> {
    /// Binds the chunk program for the draws that follow.
    fn use_program(&mut self);

    /// Sets the combined view-projection matrix for the draws that follow.
    fn set_view_projection(&mut self, view_projection: Matrix4<f32>);

    /// Sets the model matrix for the next draw.
    fn set_model_matrix(&mut self, model: Matrix4<f32>);

    /// Issues one indexed triangle-list draw of `index_count` indices.
    fn draw_indexed(&mut self, buffers: &B, index_count: u32);
}

/// Uploader that keeps meshes as plain vectors.
///
/// Used by the headless driver and by tests; also counts uploads.
#[derive(Debug, Default)]
pub struct CpuMeshStore {
    uploads: usize,
}

impl CpuMeshStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes uploaded so far.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl MeshUploader for CpuMeshStore {
    type Buffers = MeshData;

    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]) -> MeshData {
        self.uploads += 1;
        MeshData {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        }
    }
}
