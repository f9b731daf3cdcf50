//! # Block Type Module
//!
//! This module defines the block types terrain generation produces and their
//! conversion to and from the compact [`BlockId`] stored in volumes.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockId;

/// Enumerates the block types known to the world generator.
///
/// The discriminants are the ids written into chunk volumes, so the `FromPrimitive`
/// derive doubles as the decoder for volume contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Never produces faces.
    AIR = 0,

    /// Surface material covering the top layers of each terrain column.
    GRASS = 1,

    /// Underground material below the surface layers.
    DIRT = 2,
}

impl BlockType {
    /// Decodes a stored id. Ids without a named type yield `None`.
    pub fn from_id(id: BlockId) -> Option<Self> {
        FromPrimitive::from_u32(id)
    }

    /// The id stored in volumes for this block type.
    pub fn id(self) -> BlockId {
        self as BlockId
    }

    /// Whether this block type occupies its cell.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_id() {
        for block_type in [BlockType::AIR, BlockType::GRASS, BlockType::DIRT] {
            assert_eq!(BlockType::from_id(block_type.id()), Some(block_type));
        }
        assert_eq!(BlockType::from_id(99), None);
    }

    #[test]
    fn only_air_is_not_solid() {
        assert!(!BlockType::AIR.is_solid());
        assert!(BlockType::GRASS.is_solid());
        assert!(BlockType::DIRT.is_solid());
    }
}
