//! # Streaming Module
//!
//! Per-step classification of chunks for the world's streaming scheduler.
//!
//! Every step scans the whole chunk collection in creation order and sorts each
//! chunk into at most one bucket:
//!
//! 1. **generate**: not yet generated, while fewer than `budget` are queued
//! 2. **load**: generated, center closer than `distance`, unmeshed or dirty,
//!    while fewer than `budget` chunks are queued for generation
//! 3. **render**: generated, meshed and clean, center closer than `distance`
//! 4. **unload**: meshed, center at or beyond `distance`
//!
//! The world then runs only the first non-empty bucket among generate, load and
//! unload. The render bucket is pure selection and is what the next draw uses.

use cgmath::{MetricSpace, Point3, Vector3};

use crate::config::StreamingConfig;

use super::chunk::{Chunk, ChunkId};

/// Which stage a scheduling step ran and how many chunks it touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamingStep {
    /// Nothing to generate, load or unload.
    Idle,
    /// This many chunks were generated.
    Generated(usize),
    /// This many chunks were meshed or remeshed.
    Loaded(usize),
    /// This many meshes were released.
    Unloaded(usize),
}

/// Chunk ids bucketed by the work they need, rebuilt every step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingPlan {
    /// Chunks to generate this step
    pub generate: Vec<ChunkId>,
    /// Chunks to mesh or remesh this step
    pub load: Vec<ChunkId>,
    /// Chunks whose mesh should be released this step
    pub unload: Vec<ChunkId>,
    /// Chunks ready to draw
    pub render: Vec<ChunkId>,
}

impl StreamingPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every bucket.
    pub fn clear(&mut self) {
        self.generate.clear();
        self.load.clear();
        self.unload.clear();
        self.render.clear();
    }

    /// Clears the plan and classifies `chunks` against a viewer at `position`.
    pub fn rebuild<B>(
        &mut self,
        chunks: &[Chunk<B>],
        origin: Vector3<f32>,
        position: Point3<f32>,
        streaming: &StreamingConfig,
    ) {
        self.clear();

        for (id, chunk) in chunks.iter().enumerate() {
            if !chunk.is_generated() {
                if self.generate.len() < streaming.budget {
                    self.generate.push(id);
                }
                continue;
            }

            let distance = chunk.center(origin).distance(position);
            if distance < streaming.distance {
                if chunk.needs_mesh() {
                    if self.generate.len() < streaming.budget {
                        self.load.push(id);
                    }
                } else {
                    self.render.push(id);
                }
            } else if chunk.is_meshed() {
                self.unload.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::engine_state::rendering::meshing::Mesh;

    fn flat(_octaves: u32, _x: f64, _z: f64) -> f64 {
        0.0
    }

    fn row(count: i32) -> Vec<Chunk<()>> {
        (0..count)
            .map(|x| Chunk::new(Point3::new(x, 0, 0), 16))
            .collect()
    }

    fn streaming(budget: usize) -> StreamingConfig {
        StreamingConfig {
            budget,
            distance: 128.0,
        }
    }

    #[test]
    fn generation_is_capped_by_budget() {
        let chunks = row(7);
        let mut plan = StreamingPlan::new();
        plan.rebuild(&chunks, Vector3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0), &streaming(5));
        assert_eq!(plan.generate, vec![0, 1, 2, 3, 4]);
        assert!(plan.load.is_empty() && plan.unload.is_empty() && plan.render.is_empty());
    }

    #[test]
    fn saturated_generation_blocks_later_loads() {
        let terrain = TerrainConfig::default();
        let mut chunks = row(4);
        chunks[3].generate(&flat, &terrain);
        let origin = Vector3::new(0.0, 0.0, 0.0);
        let viewer = Point3::new(0.0, 0.0, 0.0);

        let mut plan = StreamingPlan::new();
        plan.rebuild(&chunks, origin, viewer, &streaming(3));
        assert_eq!(plan.generate, vec![0, 1, 2]);
        assert!(plan.load.is_empty());

        plan.rebuild(&chunks, origin, viewer, &streaming(4));
        assert_eq!(plan.generate, vec![0, 1, 2]);
        assert_eq!(plan.load, vec![3]);
    }

    #[test]
    fn loads_see_the_generate_count_at_scan_time() {
        let terrain = TerrainConfig::default();
        let mut chunks = row(4);
        chunks[0].generate(&flat, &terrain);

        let mut plan = StreamingPlan::new();
        plan.rebuild(&chunks, Vector3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0), &streaming(3));
        assert_eq!(plan.generate, vec![1, 2, 3]);
        assert_eq!(plan.load, vec![0]);
    }

    #[test]
    fn buckets_are_exclusive() {
        let terrain = TerrainConfig::default();
        let mut chunks = row(12);
        for chunk in chunks.iter_mut() {
            chunk.generate(&flat, &terrain);
            chunk.attach_mesh(Mesh::from_parts((), 6, 4));
        }
        chunks[1].mark_dirty();
        chunks[2].unload();

        let mut plan = StreamingPlan::new();
        // centers sit at x = 8, 24, 40, ...; chunk 8 (x = 136) is past 128
        plan.rebuild(&chunks, Vector3::new(0.0, 0.0, 0.0), Point3::new(0.0, 8.0, 8.0), &streaming(5));
        assert!(plan.generate.is_empty());
        assert_eq!(plan.load, vec![1, 2]);
        assert_eq!(plan.render, vec![0, 3, 4, 5, 6, 7]);
        assert_eq!(plan.unload, vec![8, 9, 10, 11]);
    }

    #[test]
    fn rebuild_clears_previous_buckets() {
        let mut plan = StreamingPlan {
            generate: vec![9],
            load: vec![9],
            unload: vec![9],
            render: vec![9],
        };
        plan.rebuild::<()>(&[], Vector3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0), &streaming(5));
        assert_eq!(plan, StreamingPlan::new());
    }
}
