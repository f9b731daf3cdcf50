//! Rendering system for the voxel engine.
//!
//! This module contains everything between a chunk's volume and a draw call:
//! the greedy mesher, the vertex format, the collaborator traits the world
//! renders through, and a wgpu implementation of them.
//!
//! ## Key Components
//!
//! * `meshing` - Greedy mesher and mesh containers
//! * `backend` - `MeshUploader` / `ChunkShader` seams and the in-memory `CpuMeshStore`
//! * `wgpu_backend` - GPU buffers, the chunk pipeline and its render pass wrapper
//! * `texture` - Depth buffer for the chunk pass

pub mod backend;
pub mod meshing;
pub mod texture;
mod vertex;
pub mod wgpu_backend;

// Re-export commonly used types
pub use vertex::Vertex;
