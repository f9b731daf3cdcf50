//! # Voxel Engine Core
//!
//! This module contains the voxel world itself: what a cell holds, how chunks
//! store and generate cells, and how the world decides which chunks to
//! generate, mesh, draw or release each frame.
//!
//! ## Architecture
//!
//! * **Block**: Block ids, named block types and the six faces of a cell
//! * **Chunk**: Fixed-size cubes of block ids with their mesh and neighbor links
//! * **Terrain noise**: Height-field sources driving generation
//! * **Streaming**: Per-step classification of chunks into work buckets
//! * **World**: The fixed chunk grid and the scheduler that drives it
//!
//! ## Data Flow
//!
//! 1. The world scans its chunks against the viewer every update
//! 2. One bounded batch of generation, meshing or unloading runs
//! 3. Chunks that are meshed, clean and in range form the render set
//! 4. Rendering draws the render set through the supplied shader

pub mod block;
pub mod chunk;
pub mod streaming;
pub mod terrain_noise;
pub mod world;
