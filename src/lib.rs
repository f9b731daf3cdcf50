#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A bounded voxel world: a fixed grid of chunks, each a dense cube of block
//! ids, generated from fractal noise, turned into triangle meshes by a greedy
//! mesher and streamed in and out around a viewer one stage per frame.
//!
//! ## Key Modules
//!
//! * `engine_state` - Voxels, meshing, camera and renderer backends
//! * `config` - World construction parameters, loadable from JSON
//! * `error` - Configuration and construction errors
//!
//! ## Architecture
//!
//! The world owns every chunk and runs the streaming scheduler. The renderer
//! is a collaborator: buffers are created through a
//! [`MeshUploader`] and drawn through a [`ChunkShader`]. The wgpu
//! implementations live in [`engine_state::rendering::wgpu_backend`];
//! [`CpuMeshStore`] keeps meshes in memory for headless runs.
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxel_world::{CpuMeshStore, PerlinFractal, World, WorldConfig};
//!
//! let config = WorldConfig::default();
//! let noise = PerlinFractal::new(config.terrain.seed);
//! let mut world = World::new(config, noise).expect("default config is valid");
//! let mut store = CpuMeshStore::new();
//!
//! let viewer = Point3::new(128.0, 40.0, 128.0);
//! for _ in 0..100 {
//!     world.update(&viewer, &mut store);
//! }
//! println!("{:?}", world.stats());
//! ```

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::{FaceCulling, StreamingConfig, TerrainConfig, WorldConfig};
pub use engine_state::camera_state::camera::{Camera, OrbitController, Projection};
pub use engine_state::camera_state::{CameraState, Viewpoint};
pub use engine_state::rendering::backend::{ChunkShader, CpuMeshStore, MeshUploader};
pub use engine_state::rendering::meshing::{Mesh, MeshData};
pub use engine_state::rendering::Vertex;
pub use engine_state::voxels::block::{block_type::BlockType, BlockId, AIR};
pub use engine_state::voxels::chunk::{Chunk, ChunkId, Volume, VoxelSource};
pub use engine_state::voxels::streaming::StreamingStep;
pub use engine_state::voxels::terrain_noise::{FractalNoise, PerlinFractal};
pub use engine_state::voxels::world::{BlockCounts, World, WorldStats};
pub use error::WorldError;
