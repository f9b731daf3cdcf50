//! # Chunk Generation Module
//!
//! Fills a chunk volume from a 2D height field.
//!
//! Every column `(x, z)` samples the noise source once at its absolute world
//! voxel coordinates. Cells below the sampled height are solid; cells more than
//! `dirt_depth` below it are dirt, the rest of the solid column is grass. The
//! result depends only on the chunk's grid index, the chunk size, the noise
//! source and the terrain parameters, so independently generated neighbors
//! always agree along their shared faces.

use cgmath::Point3;

use crate::config::TerrainConfig;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::terrain_noise::FractalNoise;

use super::volume::Volume;

/// Height of the terrain surface for the column at absolute voxel `(x, z)`.
pub fn column_height<N: FractalNoise + ?Sized>(
    noise: &N,
    terrain: &TerrainConfig,
    x: i64,
    z: i64,
) -> f64 {
    let sample = noise.fractal(
        terrain.octaves,
        x as f64 * terrain.frequency,
        z as f64 * terrain.frequency,
    );
    sample * terrain.amplitude + terrain.base_height
}

/// Block type of a cell at absolute height `height` in a column whose surface is `surface`.
pub fn block_at_height(height: f64, surface: f64, terrain: &TerrainConfig) -> BlockType {
    if height >= surface {
        BlockType::AIR
    } else if height < surface - terrain.dirt_depth {
        BlockType::DIRT
    } else {
        BlockType::GRASS
    }
}

/// Generates the volume of the chunk at grid `index` with side `size`.
pub fn generate_volume<N: FractalNoise + ?Sized>(
    noise: &N,
    terrain: &TerrainConfig,
    index: Point3<i32>,
    size: usize,
) -> Volume {
    let mut volume = Volume::new(size);
    let base_x = index.x as i64 * size as i64;
    let base_y = index.y as i64 * size as i64;
    let base_z = index.z as i64 * size as i64;

    for x in 0..size {
        for z in 0..size {
            let surface = column_height(noise, terrain, base_x + x as i64, base_z + z as i64);
            for y in 0..size {
                let height = (base_y + y as i64) as f64;
                let block = block_at_height(height, surface, terrain);
                if block.is_solid() {
                    volume.set(x, y, z, block.id());
                }
            }
        }
    }

    volume
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::terrain_noise::PerlinFractal;

    fn flat(_octaves: u32, _x: f64, _z: f64) -> f64 {
        0.0
    }

    #[test]
    fn flat_noise_gives_layered_columns() {
        // surface = 0 * 10 + 10 = 10: heights 0..6 dirt, 6..10 grass, 10.. air
        let terrain = TerrainConfig::default();
        let volume = generate_volume(&flat, &terrain, Point3::new(0, 0, 0), 16);
        for y in 0..16 {
            let expected = if y < 6 {
                BlockType::DIRT
            } else if y < 10 {
                BlockType::GRASS
            } else {
                BlockType::AIR
            };
            assert_eq!(volume.get(3, y, 5), expected.id(), "y = {y}");
        }
    }

    #[test]
    fn chunk_above_surface_is_empty() {
        let terrain = TerrainConfig::default();
        let volume = generate_volume(&flat, &terrain, Point3::new(0, 1, 0), 16);
        assert_eq!(volume.solid_count(), 0);
    }

    #[test]
    fn samples_absolute_coordinates_with_frequency() {
        let terrain = TerrainConfig::default();
        let seen = std::cell::RefCell::new(Vec::new());
        let recorder = |octaves: u32, x: f64, z: f64| {
            seen.borrow_mut().push((octaves, x, z));
            0.0
        };
        generate_volume(&recorder, &terrain, Point3::new(2, 0, 3), 4);

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 16);
        assert!(seen.iter().all(|(octaves, _, _)| *octaves == 8));
        let (_, x, z) = seen[0];
        assert!((x - 8.0 * 0.02).abs() < 1e-12);
        assert!((z - 12.0 * 0.02).abs() < 1e-12);
    }

    #[test]
    fn regeneration_is_identical() {
        let terrain = TerrainConfig::default();
        let noise = PerlinFractal::new(11);
        let index = Point3::new(3, 0, 5);
        assert_eq!(
            generate_volume(&noise, &terrain, index, 16),
            generate_volume(&noise, &terrain, index, 16)
        );
    }

    #[test]
    fn neighbors_agree_on_column_heights() {
        // a column sampled from either side of a chunk boundary sees the same surface
        let terrain = TerrainConfig::default();
        let noise = PerlinFractal::new(5);
        let left = generate_volume(&noise, &terrain, Point3::new(0, 0, 0), 8);
        let wide = generate_volume(&noise, &terrain, Point3::new(0, 0, 0), 16);
        for x in 0..8 {
            for y in 0..8 {
                for z in 0..8 {
                    assert_eq!(left.get(x, y, z), wide.get(x, y, z));
                }
            }
        }
    }
}
