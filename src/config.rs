//! # Configuration Module
//!
//! Construction parameters for a [`World`](crate::World).
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! configuration describing a 16×16×16 grid of 16³ chunks streamed within 128
//! units of the viewer.
//!
//! ```json
//! {
//!     "world_size": 8,
//!     "chunk_size": 32,
//!     "origin": [-128.0, 0.0, -128.0],
//!     "face_culling": "material",
//!     "terrain": { "seed": 42 },
//!     "streaming": { "budget": 3, "distance": 96.0 }
//! }
//! ```

use std::path::Path;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Default number of chunks along each grid axis.
pub const DEFAULT_WORLD_SIZE: u32 = 16;
/// Default number of voxels along each chunk axis.
pub const DEFAULT_CHUNK_SIZE: u32 = 16;
/// Default maximum number of chunks generated or meshed in one scheduling step.
pub const DEFAULT_STREAMING_BUDGET: usize = 5;
/// Default streaming radius, measured from the chunk center to the viewer.
pub const DEFAULT_STREAMING_DISTANCE: f32 = 128.0;

/// Rule the greedy mesher uses to decide whether a boundary between two cells
/// carries a visible face.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceCulling {
    /// A face exists only where exactly one side is solid. Touching solids of
    /// different ids are hidden from each other.
    #[default]
    Presence,
    /// Like `Presence`, but two touching solids with different ids also show
    /// a face on each side of the boundary.
    Material,
}

/// Height-field parameters used by chunk generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Octaves summed by the fractal noise source.
    pub octaves: u32,
    /// Scale applied to absolute voxel (x, z) before sampling.
    pub frequency: f64,
    /// Column height is `noise * amplitude + base_height`.
    pub amplitude: f64,
    /// See `amplitude`.
    pub base_height: f64,
    /// Cells deeper than this below the column surface become dirt.
    pub dirt_depth: f64,
    /// Seed of the default Perlin noise source.
    pub seed: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            octaves: 8,
            frequency: 0.02,
            amplitude: 10.0,
            base_height: 10.0,
            dirt_depth: 4.0,
            seed: 0,
        }
    }
}

/// Limits of the per-step streaming scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Maximum number of chunks generated (or meshed) per step.
    pub budget: usize,
    /// Chunks whose center lies strictly closer than this are kept meshed.
    pub distance: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_STREAMING_BUDGET,
            distance: DEFAULT_STREAMING_DISTANCE,
        }
    }
}

/// Complete set of world construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of chunks along each grid axis.
    pub world_size: u32,
    /// Number of voxels along each chunk axis.
    pub chunk_size: u32,
    /// World-space position of the corner of grid cell (0, 0, 0).
    pub origin: [f32; 3],
    /// Boundary rule for the greedy mesher.
    pub face_culling: FaceCulling,
    /// Terrain generation parameters.
    pub terrain: TerrainConfig,
    /// Streaming scheduler parameters.
    pub streaming: StreamingConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: DEFAULT_WORLD_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            origin: [0.0; 3],
            face_culling: FaceCulling::default(),
            terrain: TerrainConfig::default(),
            streaming: StreamingConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WorldError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that the parameters describe a buildable world.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.world_size == 0 {
            return Err(WorldError::InvalidWorldSize(self.world_size));
        }
        let chunk_size = self.chunk_size as usize;
        if chunk_size == 0
            || chunk_size
                .checked_mul(chunk_size)
                .and_then(|plane| plane.checked_mul(chunk_size))
                .is_none()
        {
            return Err(WorldError::InvalidChunkSize(self.chunk_size));
        }
        if self.streaming.budget == 0 {
            return Err(WorldError::InvalidBudget(self.streaming.budget));
        }
        if !self.streaming.distance.is_finite() || self.streaming.distance <= 0.0 {
            return Err(WorldError::InvalidDistance(self.streaming.distance));
        }
        Ok(())
    }

    /// The configured origin as a vector.
    pub fn origin(&self) -> Vector3<f32> {
        Vector3::from(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = WorldConfig::from_json_str("{}").unwrap();
        assert_eq!(config, WorldConfig::default());
        assert_eq!(config.world_size, 16);
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.terrain.octaves, 8);
        assert_eq!(config.streaming.budget, 5);
        assert_eq!(config.streaming.distance, 128.0);
        assert_eq!(config.face_culling, FaceCulling::Presence);
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let config = WorldConfig::from_json_str(
            r#"{ "world_size": 4, "face_culling": "material", "streaming": { "budget": 2 } }"#,
        )
        .unwrap();
        assert_eq!(config.world_size, 4);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.face_culling, FaceCulling::Material);
        assert_eq!(config.streaming.budget, 2);
        assert_eq!(config.streaming.distance, DEFAULT_STREAMING_DISTANCE);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = WorldConfig::from_json_str("{ world_size: ").unwrap_err();
        assert!(matches!(err, WorldError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WorldConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, WorldError::ConfigIo { .. }));
    }

    #[test]
    fn validate_rejects_degenerate_sizes() {
        let mut config = WorldConfig::default();
        assert!(config.validate().is_ok());

        config.world_size = 0;
        assert!(matches!(config.validate(), Err(WorldError::InvalidWorldSize(0))));

        config = WorldConfig { chunk_size: 0, ..WorldConfig::default() };
        assert!(matches!(config.validate(), Err(WorldError::InvalidChunkSize(0))));

        config = WorldConfig::default();
        config.streaming.budget = 0;
        assert!(matches!(config.validate(), Err(WorldError::InvalidBudget(0))));

        config = WorldConfig::default();
        config.streaming.distance = f32::NAN;
        assert!(matches!(config.validate(), Err(WorldError::InvalidDistance(_))));
    }
}
