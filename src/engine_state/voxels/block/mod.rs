//! # Block Module
//!
//! This module provides the block-level vocabulary of the voxel world: the
//! compact id stored in chunk volumes, the named block types terrain generation
//! produces, and the six faces used for neighbor links and face orientation.

pub mod block_side;
pub mod block_type;

/// The underlying integer type stored per voxel in a chunk volume.
///
/// `0` is always air; every other value is a solid material.
pub type BlockId = u32;

/// Id of an empty cell.
pub const AIR: BlockId = 0;

/// Returns `true` if the id denotes a solid (non-air) cell.
#[inline]
pub fn is_solid(id: BlockId) -> bool {
    id != AIR
}
