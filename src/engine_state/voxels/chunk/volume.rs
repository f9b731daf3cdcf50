//! # Volume Module
//!
//! Dense block-id storage for a single chunk.
//!
//! A volume is a cube of side `size` stored as one flat buffer of `size³` ids.
//! Cells are laid out with X varying fastest, then Y, then Z:
//!
//! ```text
//! index(x, y, z) = x + size * (y + size * z)
//! ```

use super::super::block::{is_solid, BlockId, AIR};

/// A cube of block ids owned by one chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Volume {
    size: usize,
    cells: Vec<BlockId>,
}

impl Volume {
    /// Creates a volume of side `size` filled with air.
    pub fn new(size: usize) -> Self {
        Self::filled(size, AIR)
    }

    /// Creates a volume of side `size` with every cell set to `id`.
    pub fn filled(size: usize, id: BlockId) -> Self {
        Volume {
            size,
            cells: vec![id; size * size * size],
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maps in-range local coordinates to the flat buffer index.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.size && y < self.size && z < self.size);
        x + self.size * (y + self.size * z)
    }

    /// Id of the cell at in-range local coordinates.
    ///
    /// # Panics
    /// Panics if any coordinate is `>= size`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.cells[self.index(x, y, z)]
    }

    /// Id of the cell at signed local coordinates, or `None` outside the cube.
    pub fn try_get(&self, x: i32, y: i32, z: i32) -> Option<BlockId> {
        let size = self.size as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) && (0..size).contains(&z) {
            Some(self.get(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Overwrites the cell at in-range local coordinates.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        let index = self.index(x, y, z);
        self.cells[index] = id;
    }

    /// Raw ids in storage order.
    pub fn as_slice(&self) -> &[BlockId] {
        &self.cells
    }

    /// Number of non-air cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|id| is_solid(**id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_x_fastest() {
        let volume = Volume::new(4);
        assert_eq!(volume.index(0, 0, 0), 0);
        assert_eq!(volume.index(1, 0, 0), 1);
        assert_eq!(volume.index(0, 1, 0), 4);
        assert_eq!(volume.index(0, 0, 1), 16);
        assert_eq!(volume.index(3, 3, 3), 63);
    }

    #[test]
    fn set_then_get() {
        let mut volume = Volume::new(3);
        volume.set(2, 1, 0, 7);
        assert_eq!(volume.get(2, 1, 0), 7);
        assert_eq!(volume.solid_count(), 1);
        assert_eq!(volume.as_slice().len(), 27);
    }

    #[test]
    fn try_get_rejects_out_of_range() {
        let volume = Volume::filled(2, 1);
        assert_eq!(volume.try_get(1, 1, 1), Some(1));
        assert_eq!(volume.try_get(-1, 0, 0), None);
        assert_eq!(volume.try_get(0, 2, 0), None);
        assert_eq!(volume.try_get(0, 0, 2), None);
    }
}
