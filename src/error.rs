//! # Error Module
//!
//! Errors surfaced while building a world or reading its configuration.
//!
//! Voxel lookups, generation and meshing are infallible: coordinates outside
//! the grid resolve to air and meshing an empty or solid chunk is valid. The
//! only fallible steps are validating construction parameters and loading a
//! configuration file.

use std::path::PathBuf;

/// Errors produced while configuring or constructing a [`World`](crate::World).
#[derive(thiserror::Error, Debug)]
pub enum WorldError {
    /// The grid must contain at least one chunk per axis.
    #[error("world size must be at least 1 chunk per axis (got {0})")]
    InvalidWorldSize(u32),

    /// Chunks must hold at least one voxel per axis and `size³` must fit in memory.
    #[error("chunk size {0} is not usable (must be >= 1 and size³ must fit in usize)")]
    InvalidChunkSize(u32),

    /// The per-step generation/load budget must allow some progress.
    #[error("streaming budget must be at least 1 chunk per step (got {0})")]
    InvalidBudget(usize),

    /// The streaming radius must be a positive finite distance.
    #[error("streaming distance must be positive and finite (got {0})")]
    InvalidDistance(f32),

    /// The configuration file could not be read.
    #[error("I/O while reading config '{path}': {source}")]
    ConfigIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`WorldConfig`](crate::WorldConfig).
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
