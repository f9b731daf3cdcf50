//! # Voxel World Headless Driver
//!
//! Builds a world from a JSON configuration (or defaults), orbits a camera over
//! the grid and runs one streaming step and one render pass per frame against
//! the in-memory mesh store. Useful for profiling generation and meshing
//! without a GPU.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- --frames 600 --radius 96
//! ```

use std::path::PathBuf;

use cgmath::{Deg, Matrix4, Point3};
use clap::Parser;
use log::info;
use web_time::{Duration, Instant};

use voxel_world::{
    Camera, CameraState, ChunkShader, CpuMeshStore, MeshData, OrbitController, PerlinFractal,
    Projection, StreamingStep, World, WorldConfig, WorldError,
};

/// Simulated time between frames.
const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(version, about = "Stream and mesh a voxel world without a window")]
struct Args {
    /// JSON world configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: usize,

    /// Camera orbit radius in world units; a third of the grid width by default
    #[arg(short, long)]
    radius: Option<f32>,
}

/// Shader stand-in that only counts what it is asked to draw.
#[derive(Default)]
struct DrawCounter {
    draws: usize,
    triangles: usize,
}

impl ChunkShader<MeshData> for DrawCounter {
    fn use_program(&mut self) {
        self.draws = 0;
        self.triangles = 0;
    }

    fn set_view_projection(&mut self, _view_projection: Matrix4<f32>) {}

    fn set_model_matrix(&mut self, _model: Matrix4<f32>) {}

    fn draw_indexed(&mut self, _buffers: &MeshData, index_count: u32) {
        self.draws += 1;
        self.triangles += index_count as usize / 3;
    }
}

fn main() -> Result<(), WorldError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    let noise = PerlinFractal::new(config.terrain.seed);
    let mut world = World::new(config, noise)?;

    let extent = (world.world_size() * world.chunk_size()) as f32;
    let origin = world.origin();
    let center = Point3::new(
        origin.x + extent * 0.5,
        origin.y + world.config().terrain.base_height as f32,
        origin.z + extent * 0.5,
    );
    let radius = args.radius.unwrap_or(extent / 3.0);
    let mut orbit = OrbitController::new(center, radius, 24.0, 0.25);
    let mut viewer = CameraState::new(
        Camera::new(center, Deg(0.0), Deg(0.0)),
        Projection::new(1280, 720, Deg(45.0), 0.1, 1000.0),
    );
    orbit.place(&mut viewer.camera);

    let mut store = CpuMeshStore::new();
    let mut shader = DrawCounter::default();
    let mut last_step = StreamingStep::Idle;
    let start = Instant::now();

    info!(
        "Simulating {} frames, orbit radius {:.1} around {:?}",
        args.frames, radius, center
    );

    for frame in 0..args.frames {
        orbit.update_camera(&mut viewer.camera, FRAME_TIME);
        let step = world.update(&viewer, &mut store);
        world.render(&mut shader, &viewer);

        if std::mem::discriminant(&step) != std::mem::discriminant(&last_step) {
            info!(
                "Frame {}: {:?}, drawing {} chunks ({} triangles)",
                frame, step, shader.draws, shader.triangles
            );
        }
        last_step = step;
    }

    let stats = world.stats();
    info!(
        "Finished in {:?}: {}/{} chunks generated, {} meshed, {} vertices, {} triangles, {} uploads",
        start.elapsed(),
        stats.generated,
        stats.chunks,
        stats.meshed,
        stats.vertices,
        stats.triangles,
        store.uploads()
    );
    let counts = world.block_counts();
    info!(
        "Voxels: {} grass, {} dirt, {} air, {} unknown",
        counts.grass, counts.dirt, counts.air, counts.unknown
    );

    world.dispose();
    Ok(())
}
