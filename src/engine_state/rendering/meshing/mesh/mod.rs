//! Mesh generation and manipulation for voxel rendering.
//!
//! This module provides the core functionality for converting voxel data into
//! GPU-friendly mesh representations. It implements greedy meshing to reduce the
//! number of vertices and faces by combining coplanar faces with the same block id.
//!
//! # Architecture
//! - [`MeshData`]: Vertex and index arrays straight out of the mesher
//! - [`Mesh`]: An uploaded mesh as held by a chunk
//! - [`Face`]: A single merged quad with its winding
//! - [`greedy::build`]: The sweep that turns a volume into faces

mod face;
pub mod greedy;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::Face;
pub use mesh::*;
