//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one cube of the world grid holding a
//! dense block-id [`Volume`], an optional GPU [`Mesh`], links to its six face
//! neighbors and the lifecycle flags the streaming scheduler drives.
//!
//! ## Lifecycle
//!
//! ```text
//! unborn --generate()--> generated --load--> meshed --unload()--> generated
//!                                   meshed(dirty) --load--> meshed(clean)
//! any --dispose()--> unborn (volume and mesh released)
//! ```
//!
//! `meshed` always implies `generated`. Meshing needs read access to the
//! neighbor volumes, so the build itself is driven by the owning
//! [`World`](crate::World) and the finished mesh is handed to
//! [`Chunk::attach_mesh`].
//!
//! ## Neighbors
//!
//! Neighbor links are indices into the world's chunk collection rather than
//! references, so a chunk never owns or outlives another. Lookups that leave the
//! local cube follow those links; a missing link or a neighbor without data
//! reads as air, which is what lets the mesher close the world's outer faces.

use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3};
use log::debug;

use crate::config::TerrainConfig;
use crate::engine_state::camera_state::Viewpoint;
use crate::engine_state::rendering::backend::ChunkShader;
use crate::engine_state::rendering::meshing::Mesh;

use super::block::block_side::BlockSide;
use super::block::{BlockId, AIR};
use super::terrain_noise::FractalNoise;

pub mod generation;
pub mod volume;

pub use volume::Volume;

/// Position of a chunk in its world's chunk collection.
pub type ChunkId = usize;

/// Read access to block ids around a chunk, in that chunk's local coordinates.
///
/// Coordinates outside `0..size()` are legal and resolve to whatever lies
/// across the boundary, or air when nothing does.
pub trait VoxelSource {
    /// Side length of the local cube.
    fn size(&self) -> usize;

    /// Block id at local `(x, y, z)`.
    fn voxel_id_at(&self, x: i32, y: i32, z: i32) -> BlockId;
}

/// A bare volume has nothing around it: everything outside reads as air.
impl VoxelSource for Volume {
    fn size(&self) -> usize {
        Volume::size(self)
    }

    fn voxel_id_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.try_get(x, y, z).unwrap_or(AIR)
    }
}

/// A fixed-size cube of the voxel world.
///
/// `B` is the buffer type produced by the mesh uploader in use (GPU buffers in
/// the wgpu backend, plain vectors in headless runs).
pub struct Chunk<B> {
    /// Grid index of this chunk (not voxel coordinates).
    index: Point3<i32>,
    /// Voxels per axis.
    size: usize,
    /// Block ids. `None` until generated and after disposal.
    volume: Option<Volume>,
    /// Uploaded mesh while meshed.
    mesh: Option<Mesh<B>>,
    /// Neighbor chunk ids, indexed by `BlockSide`.
    neighbors: [Option<ChunkId>; 6],
    generated: bool,
    meshed: bool,
    dirty: bool,
}

impl<B> Chunk<B> {
    /// Creates an ungenerated, unmeshed chunk at grid `index` with side `size`.
    pub fn new(index: Point3<i32>, size: usize) -> Self {
        Chunk {
            index,
            size,
            volume: None,
            mesh: None,
            neighbors: [None; 6],
            generated: false,
            meshed: false,
            dirty: false,
        }
    }

    /// Grid index of this chunk.
    pub fn index(&self) -> Point3<i32> {
        self.index
    }

    /// Voxels per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the volume has been filled.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Whether a mesh is currently held.
    pub fn is_meshed(&self) -> bool {
        self.meshed
    }

    /// Whether the mesh must be rebuilt on the next load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a load would do any work.
    pub fn needs_mesh(&self) -> bool {
        !self.meshed || self.dirty
    }

    /// Requests a remesh. Call when a block in this chunk, or on the face of an
    /// adjacent chunk, changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The generated volume, if any.
    pub fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    /// The current mesh, if meshed.
    pub fn mesh(&self) -> Option<&Mesh<B>> {
        self.mesh.as_ref()
    }

    /// Links the neighbor across `side`.
    pub fn connect_neighbor(&mut self, side: BlockSide, chunk: ChunkId) {
        self.neighbors[side as usize] = Some(chunk);
    }

    /// The neighbor across `side`, `None` at the grid edge.
    pub fn neighbor(&self, side: BlockSide) -> Option<ChunkId> {
        self.neighbors[side as usize]
    }

    /// All linked neighbors.
    pub fn neighbors(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.neighbors.iter().flatten().copied()
    }

    /// World-space position of this chunk's minimum corner.
    pub fn world_position(&self, origin: Vector3<f32>) -> Vector3<f32> {
        let index = Vector3::new(self.index.x as f32, self.index.y as f32, self.index.z as f32);
        origin + index * self.size as f32
    }

    /// World-space position of this chunk's center.
    pub fn center(&self, origin: Vector3<f32>) -> Point3<f32> {
        let half = self.size as f32 * 0.5;
        Point3::from_vec(self.world_position(origin) + Vector3::new(half, half, half))
    }

    /// Fills the volume from the height field. Does nothing once generated.
    pub fn generate<N: FractalNoise + ?Sized>(&mut self, noise: &N, terrain: &TerrainConfig) {
        if self.generated {
            return;
        }
        let volume = generation::generate_volume(noise, terrain, self.index, self.size);
        debug!(
            "Generated chunk {:?} ({} solid voxels)",
            self.index,
            volume.solid_count()
        );
        self.volume = Some(volume);
        self.generated = true;
    }

    /// Replaces any held mesh with `mesh` and marks the chunk meshed and clean.
    pub fn attach_mesh(&mut self, mesh: Mesh<B>) {
        debug_assert!(self.generated, "meshed chunks must be generated");
        self.mesh = Some(mesh);
        self.meshed = true;
        self.dirty = false;
    }

    /// Releases the mesh. Does nothing when not meshed.
    pub fn unload(&mut self) {
        if !self.meshed {
            return;
        }
        self.release_mesh();
        debug!("Unloaded chunk {:?}", self.index);
    }

    /// Drops the mesh ahead of a rebuild.
    pub(crate) fn release_mesh(&mut self) {
        self.mesh = None;
        self.meshed = false;
    }

    /// Releases mesh and volume unconditionally, returning to the unborn state.
    pub fn dispose(&mut self) {
        self.mesh = None;
        self.volume = None;
        self.meshed = false;
        self.generated = false;
        self.dirty = false;
    }

    /// Per-frame hook. Chunks currently have no per-frame behaviour of their own.
    pub fn update<V: Viewpoint + ?Sized>(&mut self, _viewpoint: &V) {}

    /// Draws the mesh translated to this chunk's world position.
    ///
    /// Does nothing unless meshed with at least one triangle.
    pub fn render<S: ChunkShader<B> + ?Sized>(&self, shader: &mut S, origin: Vector3<f32>) {
        if !self.meshed {
            return;
        }
        let Some(mesh) = &self.mesh else {
            return;
        };
        if mesh.index_count() == 0 {
            return;
        }
        shader.set_model_matrix(Matrix4::from_translation(self.world_position(origin)));
        shader.draw_indexed(mesh.buffers(), mesh.index_count());
    }

    /// Block id at local `(x, y, z)`, following neighbor links in `chunks` for
    /// coordinates outside this chunk.
    ///
    /// `chunks` must be the collection the neighbor ids point into.
    pub fn voxel_id_at(&self, chunks: &[Chunk<B>], x: i32, y: i32, z: i32) -> BlockId {
        let mut chunk = self;
        let mut position = Vector3::new(x, y, z);

        loop {
            let size = chunk.size as i32;
            let side = if position.x < 0 {
                BlockSide::LEFT
            } else if position.x >= size {
                BlockSide::RIGHT
            } else if position.y < 0 {
                BlockSide::BOTTOM
            } else if position.y >= size {
                BlockSide::TOP
            } else if position.z < 0 {
                BlockSide::BACK
            } else if position.z >= size {
                BlockSide::FRONT
            } else {
                return chunk
                    .volume
                    .as_ref()
                    .map_or(AIR, |volume| {
                        volume.get(position.x as usize, position.y as usize, position.z as usize)
                    });
            };

            match chunk.neighbor(side).and_then(|id| chunks.get(id)) {
                Some(neighbor) => {
                    position -= side.offset() * size;
                    chunk = neighbor;
                }
                None => return AIR,
            }
        }
    }
}

/// A chunk seen together with the collection its neighbor links point into.
pub struct ChunkView<'a, B> {
    chunks: &'a [Chunk<B>],
    id: ChunkId,
}

impl<'a, B> ChunkView<'a, B> {
    /// Views `chunks[id]`.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    pub fn new(chunks: &'a [Chunk<B>], id: ChunkId) -> Self {
        assert!(id < chunks.len(), "chunk id {id} out of range");
        ChunkView { chunks, id }
    }

    /// The viewed chunk.
    pub fn chunk(&self) -> &'a Chunk<B> {
        &self.chunks[self.id]
    }
}

impl<B> VoxelSource for ChunkView<'_, B> {
    fn size(&self) -> usize {
        self.chunk().size()
    }

    fn voxel_id_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.chunk().voxel_id_at(self.chunks, x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn flat(_octaves: u32, _x: f64, _z: f64) -> f64 {
        0.0
    }

    /// Two generated 4³ chunks side by side along X, linked both ways.
    fn linked_pair() -> Vec<Chunk<()>> {
        let terrain = TerrainConfig {
            base_height: 2.0,
            amplitude: 0.0,
            dirt_depth: 1.0,
            ..TerrainConfig::default()
        };
        let mut left = Chunk::new(Point3::new(0, 0, 0), 4);
        let mut right = Chunk::new(Point3::new(1, 0, 0), 4);
        left.generate(&flat, &terrain);
        right.generate(&flat, &terrain);
        left.connect_neighbor(BlockSide::RIGHT, 1);
        right.connect_neighbor(BlockSide::LEFT, 0);
        vec![left, right]
    }

    #[test]
    fn generate_is_idempotent() {
        let terrain = TerrainConfig::default();
        let mut chunk: Chunk<()> = Chunk::new(Point3::new(0, 0, 0), 8);
        assert!(!chunk.is_generated());
        chunk.generate(&flat, &terrain);
        let first = chunk.volume().cloned();

        let bumpy = |_o: u32, x: f64, _z: f64| x * 1000.0;
        chunk.generate(&bumpy, &terrain);
        assert!(chunk.is_generated());
        assert_eq!(chunk.volume().cloned(), first);
    }

    #[test]
    fn in_range_lookup_reads_volume() {
        let chunks = linked_pair();
        assert_eq!(chunks[0].voxel_id_at(&chunks, 0, 0, 0), BlockType::DIRT.id());
        assert_eq!(chunks[0].voxel_id_at(&chunks, 0, 1, 0), BlockType::GRASS.id());
        assert_eq!(chunks[0].voxel_id_at(&chunks, 0, 2, 0), AIR);
    }

    #[test]
    fn out_of_range_lookup_delegates_to_neighbor() {
        let mut chunks = linked_pair();
        if let Some(volume) = chunks[1].volume.as_mut() {
            volume.set(0, 3, 2, 9);
        }
        if let Some(volume) = chunks[0].volume.as_mut() {
            volume.set(3, 3, 1, 7);
        }

        // x = 4 in the left chunk is x = 0 in the right one
        assert_eq!(chunks[0].voxel_id_at(&chunks, 4, 3, 2), 9);
        // x = -1 in the right chunk is x = 3 in the left one
        assert_eq!(chunks[1].voxel_id_at(&chunks, -1, 3, 1), 7);
        for y in 0..4 {
            for z in 0..4 {
                assert_eq!(
                    chunks[1].voxel_id_at(&chunks, -1, y, z),
                    chunks[0].voxel_id_at(&chunks, 3, y, z)
                );
            }
        }
    }

    #[test]
    fn lookup_delegates_along_every_axis() {
        let mut chunks: Vec<Chunk<()>> = vec![Chunk::new(Point3::new(1, 1, 1), 4)];
        chunks[0].volume = Some(Volume::new(4));
        for side in BlockSide::all() {
            let mut neighbor = Chunk::new(Point3::new(1, 1, 1) + side.offset(), 4);
            neighbor.volume = Some(Volume::filled(4, 10 + side as BlockId));
            let id = chunks.len();
            chunks[0].connect_neighbor(side, id);
            chunks.push(neighbor);
        }
        let cell = |chunks: &mut Vec<Chunk<()>>, side: BlockSide, x: usize, y: usize, z: usize, id: BlockId| {
            if let Some(volume) = chunks[1 + side as usize].volume.as_mut() {
                volume.set(x, y, z, id);
            }
        };
        cell(&mut chunks, BlockSide::TOP, 2, 0, 3, 99);
        cell(&mut chunks, BlockSide::BOTTOM, 1, 3, 2, 98);
        cell(&mut chunks, BlockSide::FRONT, 3, 1, 0, 97);
        cell(&mut chunks, BlockSide::BACK, 0, 2, 3, 96);

        let center = &chunks[0];
        assert_eq!(center.voxel_id_at(&chunks, 2, 4, 3), 99);
        assert_eq!(center.voxel_id_at(&chunks, 1, -1, 2), 98);
        assert_eq!(center.voxel_id_at(&chunks, 3, 1, 4), 97);
        assert_eq!(center.voxel_id_at(&chunks, 0, 2, -1), 96);

        assert_eq!(center.voxel_id_at(&chunks, 0, 4, 0), 10 + BlockSide::TOP as BlockId);
        assert_eq!(center.voxel_id_at(&chunks, 3, -1, 3), 10 + BlockSide::BOTTOM as BlockId);
        assert_eq!(center.voxel_id_at(&chunks, 1, 1, 4), 10 + BlockSide::FRONT as BlockId);
        assert_eq!(center.voxel_id_at(&chunks, 2, 0, -1), 10 + BlockSide::BACK as BlockId);
        assert_eq!(center.voxel_id_at(&chunks, 1, 1, 1), AIR);
    }

    #[test]
    fn missing_neighbor_reads_as_air() {
        let chunks = linked_pair();
        assert_eq!(chunks[0].voxel_id_at(&chunks, -1, 0, 0), AIR);
        assert_eq!(chunks[0].voxel_id_at(&chunks, 0, -1, 0), AIR);
        assert_eq!(chunks[0].voxel_id_at(&chunks, 0, 0, 4), AIR);
        // through the right neighbor and off its far edge
        assert_eq!(chunks[0].voxel_id_at(&chunks, 8, 0, 0), AIR);
    }

    #[test]
    fn ungenerated_neighbor_reads_as_air() {
        let mut chunks = linked_pair();
        chunks[1].dispose();
        assert_eq!(chunks[0].voxel_id_at(&chunks, 4, 0, 0), AIR);
    }

    #[test]
    fn lifecycle_flags() {
        let terrain = TerrainConfig::default();
        let mut chunk: Chunk<()> = Chunk::new(Point3::new(0, 0, 0), 4);
        assert!(chunk.needs_mesh());

        chunk.generate(&flat, &terrain);
        chunk.attach_mesh(Mesh::from_parts((), 6, 4));
        assert!(chunk.is_meshed());
        assert!(!chunk.needs_mesh());

        chunk.mark_dirty();
        assert!(chunk.needs_mesh());
        chunk.attach_mesh(Mesh::from_parts((), 12, 8));
        assert!(!chunk.is_dirty());
        assert_eq!(chunk.mesh().map(|mesh| mesh.index_count()), Some(12));

        chunk.unload();
        assert!(!chunk.is_meshed());
        assert!(chunk.mesh().is_none());
        assert!(chunk.is_generated());

        chunk.generate(&flat, &terrain);
        chunk.mark_dirty();
        chunk.dispose();
        assert!(!chunk.is_generated());
        assert!(!chunk.is_dirty());
        assert!(chunk.volume().is_none());
    }

    #[test]
    fn world_position_and_center() {
        let chunk: Chunk<()> = Chunk::new(Point3::new(1, 2, 3), 16);
        let origin = Vector3::new(-8.0, 0.0, 4.0);
        assert_eq!(chunk.world_position(origin), Vector3::new(8.0, 32.0, 52.0));
        assert_eq!(chunk.center(origin), Point3::new(16.0, 40.0, 60.0));
    }
}
