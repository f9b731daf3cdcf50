//! # Engine State Module
//!
//! The core of the voxel engine.
//!
//! ## Key Components
//!
//! * `camera_state` - Camera, projection and the `Viewpoint` interface
//! * `rendering` - Greedy meshing, vertex format and renderer backends
//! * `voxels` - Voxel data, chunks, terrain generation and the streaming world
//!
//! The voxel side never depends on a concrete renderer: meshes are uploaded
//! and drawn through the traits in `rendering::backend`, and the viewer is any
//! `camera_state::Viewpoint`.

pub mod camera_state;
pub mod rendering;
pub mod voxels;
