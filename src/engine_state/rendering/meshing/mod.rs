//! Mesh generation for voxel chunks.
//!
//! Chunks are meshed one at a time into a single vertex/index buffer pair.
//! The mesher reads through a [`VoxelSource`](crate::engine_state::voxels::chunk::VoxelSource),
//! so cells across chunk boundaries resolve through neighbor links and world
//! edges read as air.

mod mesh;

pub use mesh::*;
