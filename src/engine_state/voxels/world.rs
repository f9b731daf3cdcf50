//! # World Module
//!
//! This module provides the `World` struct which owns a fixed grid of chunks and
//! drives their lifecycle from a viewer's position.
//!
//! ## Architecture
//!
//! All `world_size³` chunks are created up front and live in one vector for the
//! lifetime of the world. Creation order is nested x, z, y loops, so the chunk at
//! grid index `(x, y, z)` sits at `(x * world_size + z) * world_size + y`.
//! Neighbor links are ids into that vector.
//!
//! ## Streaming
//!
//! [`World::update`] runs one scheduler step (see [`streaming`](super::streaming)):
//! a bounded batch of generation, else meshing, else unloading. Spreading the
//! work across steps keeps the per-frame cost flat while new chunks come into
//! range. [`World::render`] draws the chunks the last step found ready.

use cgmath::{Point3, Vector3};
use log::{debug, info, trace};
use web_time::Instant;

use crate::config::WorldConfig;
use crate::engine_state::camera_state::Viewpoint;
use crate::engine_state::rendering::backend::{ChunkShader, MeshUploader};
use crate::engine_state::rendering::meshing::{greedy, Mesh};
use crate::error::WorldError;

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::block::{BlockId, AIR};
use super::chunk::{Chunk, ChunkId, ChunkView};
use super::streaming::{StreamingPlan, StreamingStep};
use super::terrain_noise::FractalNoise;

/// Counters describing the current state of a world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Total chunks in the grid
    pub chunks: usize,
    /// Chunks with a generated volume
    pub generated: usize,
    /// Chunks holding a mesh
    pub meshed: usize,
    /// Chunks waiting for a remesh
    pub dirty: usize,
    /// Vertices across all held meshes
    pub vertices: usize,
    /// Triangles across all held meshes
    pub triangles: usize,
}

/// Voxel counts per block type across generated chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockCounts {
    /// Empty cells
    pub air: usize,
    /// Grass cells
    pub grass: usize,
    /// Dirt cells
    pub dirt: usize,
    /// Cells holding an id with no named block type
    pub unknown: usize,
}

impl BlockCounts {
    /// Adds every id in `ids` to the counts.
    pub fn tally(&mut self, ids: &[BlockId]) {
        for &id in ids {
            match BlockType::from_id(id) {
                Some(BlockType::AIR) => self.air += 1,
                Some(BlockType::GRASS) => self.grass += 1,
                Some(BlockType::DIRT) => self.dirt += 1,
                None => self.unknown += 1,
            }
        }
    }

    /// Cells that are not air.
    pub fn solid(&self) -> usize {
        self.grass + self.dirt + self.unknown
    }
}

/// A bounded voxel world made of `world_size³` chunks.
///
/// `N` is the terrain noise source; `B` is the buffer type of the mesh uploader
/// the world is updated with.
pub struct World<N, B> {
    config: WorldConfig,
    noise: N,
    chunks: Vec<Chunk<B>>,
    plan: StreamingPlan,
}

impl<N: FractalNoise, B> World<N, B> {
    /// Builds the chunk grid and links every chunk to its face neighbors.
    ///
    /// No chunk is generated yet; that happens over the first few
    /// [`update`](Self::update) calls.
    ///
    /// # Arguments
    /// * `config` - Grid dimensions, terrain shape and streaming parameters
    /// * `noise` - Height field source sampled during generation
    ///
    /// # Returns
    /// A world of `world_size³` linked, ungenerated chunks.
    ///
    /// # Errors
    /// Returns the first problem [`WorldConfig::validate`] finds.
    pub fn new(config: WorldConfig, noise: N) -> Result<Self, WorldError> {
        config.validate()?;
        let world_size = config.world_size as i32;
        let chunk_size = config.chunk_size as usize;

        let mut chunks = Vec::with_capacity((config.world_size as usize).pow(3));
        for x in 0..world_size {
            for z in 0..world_size {
                for y in 0..world_size {
                    chunks.push(Chunk::new(Point3::new(x, y, z), chunk_size));
                }
            }
        }

        let mut world = World {
            config,
            noise,
            chunks,
            plan: StreamingPlan::new(),
        };
        world.connect_neighbors();

        info!(
            "Created world of {}³ chunks ({}³ voxels each) at origin {:?}",
            world.config.world_size, world.config.chunk_size, world.config.origin
        );

        Ok(world)
    }

    /// Links each chunk to the next one along every positive axis, in both
    /// directions.
    fn connect_neighbors(&mut self) {
        for id in 0..self.chunks.len() {
            let index = self.chunks[id].index();
            for axis in 0..3 {
                let side = BlockSide::from_axis(axis, true);
                if let Some(neighbor) = self.chunk_id_at(index + side.offset()) {
                    self.chunks[id].connect_neighbor(side, neighbor);
                    self.chunks[neighbor].connect_neighbor(side.opposite(), id);
                }
            }
        }
    }

    /// The configuration the world was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The terrain noise source.
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Chunks per grid axis.
    pub fn world_size(&self) -> u32 {
        self.config.world_size
    }

    /// Voxels per chunk axis.
    pub fn chunk_size(&self) -> u32 {
        self.config.chunk_size
    }

    /// World-space position of the corner of grid cell (0, 0, 0).
    pub fn origin(&self) -> Vector3<f32> {
        self.config.origin()
    }

    /// All chunks in creation order.
    pub fn chunks(&self) -> &[Chunk<B>] {
        &self.chunks
    }

    /// The chunk with id `id`.
    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk<B>> {
        self.chunks.get(id)
    }

    /// Id of the chunk at grid `index`, or `None` outside the grid.
    pub fn chunk_id_at(&self, index: Point3<i32>) -> Option<ChunkId> {
        let size = self.config.world_size as i32;
        let in_grid = |v: i32| (0..size).contains(&v);
        if !(in_grid(index.x) && in_grid(index.y) && in_grid(index.z)) {
            return None;
        }
        let size = size as usize;
        Some((index.x as usize * size + index.z as usize) * size + index.y as usize)
    }

    /// The chunk at grid `index`.
    pub fn chunk_at(&self, index: Point3<i32>) -> Option<&Chunk<B>> {
        self.chunk_id_at(index).map(|id| &self.chunks[id])
    }

    /// Block id at absolute voxel coordinates. Air outside the grid or in an
    /// ungenerated chunk.
    pub fn block_at(&self, voxel: Point3<i64>) -> BlockId {
        let size = self.config.chunk_size as i64;
        let chunk_index = Point3::new(
            voxel.x.div_euclid(size),
            voxel.y.div_euclid(size),
            voxel.z.div_euclid(size),
        );
        let (Ok(x), Ok(y), Ok(z)) = (
            i32::try_from(chunk_index.x),
            i32::try_from(chunk_index.y),
            i32::try_from(chunk_index.z),
        ) else {
            return AIR;
        };
        match self.chunk_at(Point3::new(x, y, z)).and_then(|chunk| chunk.volume()) {
            Some(volume) => volume.get(
                voxel.x.rem_euclid(size) as usize,
                voxel.y.rem_euclid(size) as usize,
                voxel.z.rem_euclid(size) as usize,
            ),
            None => AIR,
        }
    }

    /// Requests a remesh of the chunk at grid `index`. Returns whether it exists.
    pub fn mark_dirty(&mut self, index: Point3<i32>) -> bool {
        match self.chunk_id_at(index) {
            Some(id) => {
                self.chunks[id].mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Marks the chunk at `index` and its face neighbors dirty, as needed after
    /// a block on the chunk's boundary changes. Returns how many were marked.
    pub fn mark_dirty_around(&mut self, index: Point3<i32>) -> usize {
        let Some(id) = self.chunk_id_at(index) else {
            return 0;
        };
        let neighbors: Vec<ChunkId> = self.chunks[id].neighbors().collect();
        self.chunks[id].mark_dirty();
        for neighbor in &neighbors {
            self.chunks[*neighbor].mark_dirty();
        }
        1 + neighbors.len()
    }

    /// Runs one streaming step for a viewer at `viewpoint`.
    ///
    /// Classifies every chunk, then performs only the highest-priority
    /// non-empty stage: generation, else meshing through `uploader`, else
    /// unloading. The render set is refreshed whichever stage runs.
    ///
    /// # Arguments
    /// * `viewpoint` - Viewer whose position drives the distance tests
    /// * `uploader` - Turns freshly built meshes into buffers
    ///
    /// # Returns
    /// The stage that ran and how many chunks it touched, or
    /// [`StreamingStep::Idle`] when nothing needed work.
    pub fn update<V, U>(&mut self, viewpoint: &V, uploader: &mut U) -> StreamingStep
    where
        V: Viewpoint + ?Sized,
        U: MeshUploader<Buffers = B> + ?Sized,
    {
        for chunk in self.chunks.iter_mut() {
            chunk.update(viewpoint);
        }

        let origin = self.origin();
        self.plan
            .rebuild(&self.chunks, origin, viewpoint.position(), &self.config.streaming);
        trace!(
            "Streaming buckets: {} generate, {} load, {} unload, {} render",
            self.plan.generate.len(),
            self.plan.load.len(),
            self.plan.unload.len(),
            self.plan.render.len()
        );

        if !self.plan.generate.is_empty() {
            let start = Instant::now();
            for &id in &self.plan.generate {
                self.chunks[id].generate(&self.noise, &self.config.terrain);
            }
            debug!(
                "Generated {} chunks in {:?}",
                self.plan.generate.len(),
                start.elapsed()
            );
            return StreamingStep::Generated(self.plan.generate.len());
        }

        if !self.plan.load.is_empty() {
            let start = Instant::now();
            let load = std::mem::take(&mut self.plan.load);
            for &id in &load {
                self.load_chunk(id, uploader);
            }
            debug!("Meshed {} chunks in {:?}", load.len(), start.elapsed());
            self.plan.load = load;
            return StreamingStep::Loaded(self.plan.load.len());
        }

        if !self.plan.unload.is_empty() {
            for &id in &self.plan.unload {
                self.chunks[id].unload();
            }
            debug!("Unloaded {} chunks", self.plan.unload.len());
            return StreamingStep::Unloaded(self.plan.unload.len());
        }

        StreamingStep::Idle
    }

    /// Rebuilds the mesh of chunk `id` from its volume and its neighbors'.
    ///
    /// Does nothing if the chunk is ungenerated, or meshed and clean.
    pub fn load_chunk<U>(&mut self, id: ChunkId, uploader: &mut U)
    where
        U: MeshUploader<Buffers = B> + ?Sized,
    {
        let Some(chunk) = self.chunks.get_mut(id) else {
            return;
        };
        if !chunk.is_generated() || !chunk.needs_mesh() {
            return;
        }
        chunk.release_mesh();

        let data = greedy::build(&ChunkView::new(&self.chunks, id), self.config.face_culling);
        let mesh = Mesh::upload(&data, uploader);
        self.chunks[id].attach_mesh(mesh);
    }

    /// Chunk ids the last [`update`](Self::update) found ready to draw.
    pub fn render_set(&self) -> &[ChunkId] {
        &self.plan.render
    }

    /// Draws the render set: binds `shader` once, sets the view-projection of
    /// `viewpoint` once, then issues one draw per chunk with its translation.
    pub fn render<S, V>(&self, shader: &mut S, viewpoint: &V)
    where
        S: ChunkShader<B> + ?Sized,
        V: Viewpoint + ?Sized,
    {
        shader.use_program();
        shader.set_view_projection(viewpoint.view_projection());
        let origin = self.origin();
        for &id in &self.plan.render {
            self.chunks[id].render(shader, origin);
        }
    }

    /// Current chunk and mesh counters.
    pub fn stats(&self) -> WorldStats {
        self.chunks.iter().fold(
            WorldStats {
                chunks: self.chunks.len(),
                ..WorldStats::default()
            },
            |mut stats, chunk| {
                stats.generated += chunk.is_generated() as usize;
                stats.meshed += chunk.is_meshed() as usize;
                stats.dirty += chunk.is_dirty() as usize;
                if let Some(mesh) = chunk.mesh() {
                    stats.vertices += mesh.vertex_count() as usize;
                    stats.triangles += mesh.triangle_count() as usize;
                }
                stats
            },
        )
    }

    /// Counts the voxels of every generated chunk by block type. Ungenerated
    /// chunks contribute nothing.
    pub fn block_counts(&self) -> BlockCounts {
        let mut counts = BlockCounts::default();
        for volume in self.chunks.iter().filter_map(|chunk| chunk.volume()) {
            counts.tally(volume.as_slice());
        }
        counts
    }

    /// Releases every volume and mesh. The grid and its links stay in place, so
    /// later updates regenerate from scratch.
    pub fn dispose(&mut self) {
        for chunk in self.chunks.iter_mut() {
            chunk.dispose();
        }
        self.plan.clear();
        info!("Disposed all {} chunks", self.chunks.len());
    }
}
