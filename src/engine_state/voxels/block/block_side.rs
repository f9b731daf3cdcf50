//! # Block Side Module
//!
//! This module defines the six faces of a voxel or chunk. Chunks use them to
//! name their neighbor links, the mesher uses them to name face orientations.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block or chunk.
///
/// Each variant is assigned a unique integer value so it can index per-side
/// arrays such as a chunk's neighbor table.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The face perpendicular to `axis` (0 = X, 1 = Y, 2 = Z) pointing in the
    /// positive or negative direction.
    ///
    /// # Panics
    /// Panics if `axis > 2`.
    pub fn from_axis(axis: usize, positive: bool) -> Self {
        match (axis, positive) {
            (0, false) => BlockSide::LEFT,
            (0, true) => BlockSide::RIGHT,
            (1, false) => BlockSide::BOTTOM,
            (1, true) => BlockSide::TOP,
            (2, false) => BlockSide::BACK,
            (2, true) => BlockSide::FRONT,
            _ => panic!("axis {axis} out of range"),
        }
    }

    /// The face on the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
        }
    }

    /// Unit step, in grid cells, from a cell to the neighbor across this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }
}
