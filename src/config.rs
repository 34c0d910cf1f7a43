//! # Configuration
//!
//! World and terrain settings, loaded from JSON. Every struct is
//! `#[serde(default)]`, so a file only needs the fields it changes.
//!
//! ```text
//! {
//!     "max_loaded_chunks": 64,
//!     "world_seed": 7,
//!     "terrain": { "cave_count_range": { "start": 0, "end": 0 } }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::voxels::chunk::ChunkDimensions;

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The two values a normalised noise sample is interpolated between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LerpBounds {
    pub low: f64,
    pub high: f64,
}

impl LerpBounds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Linear interpolation from `low` (t = 0) to `high` (t = 1).
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        self.low + (self.high - self.low) * t
    }
}

/// Constants driving the layered terrain and cave passes.
///
/// Integer ranges are half-open. An empty range always yields its start value,
/// so `cave_count_range: 0..0` turns caves off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Stone surface height, interpolated by the stone noise.
    pub stone_height: LerpBounds,
    /// World-space to noise-space scale for the stone layer.
    pub stone_noise_scale: f64,
    /// Dirt thickness above the stone surface, interpolated by the dirt noise.
    pub dirt_thickness: LerpBounds,
    /// World-space to noise-space scale for the dirt layer.
    pub dirt_noise_scale: f64,
    /// Bedrock thickness per column.
    pub bedrock_height_range: Range<i32>,
    /// Number of caves carved per chunk.
    pub cave_count_range: Range<i32>,
    /// Radius of each cave.
    pub cave_radius_range: Range<i32>,
    /// Cave centers keep this many cells away from the bottom and the top of the chunk.
    pub cave_vertical_guard: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            stone_height: LerpBounds::new(5.0, 10.0),
            stone_noise_scale: 0.05,
            dirt_thickness: LerpBounds::new(0.0, 5.0),
            dirt_noise_scale: 0.1,
            bedrock_height_range: 1..4,
            cave_count_range: 10..20,
            cave_radius_range: 3..8,
            cave_vertical_guard: 10,
        }
    }
}

impl TerrainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, scale) in [
            ("stone_noise_scale", self.stone_noise_scale),
            ("dirt_noise_scale", self.dirt_noise_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and positive, got {scale}"
                )));
            }
        }
        for (name, bounds) in [
            ("stone_height", self.stone_height),
            ("dirt_thickness", self.dirt_thickness),
        ] {
            if !bounds.low.is_finite() || !bounds.high.is_finite() || bounds.low > bounds.high {
                return Err(ConfigError::Invalid(format!(
                    "{name} bounds are inverted or not finite: {} .. {}",
                    bounds.low, bounds.high
                )));
            }
        }
        for (name, range) in [
            ("bedrock_height_range", &self.bedrock_height_range),
            ("cave_count_range", &self.cave_count_range),
            ("cave_radius_range", &self.cave_radius_range),
        ] {
            if range.start < 0 || range.start > range.end {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative, non-inverted range, got {}..{}",
                    range.start, range.end
                )));
            }
        }
        if self.cave_vertical_guard < 0 {
            return Err(ConfigError::Invalid(format!(
                "cave_vertical_guard must not be negative, got {}",
                self.cave_vertical_guard
            )));
        }
        Ok(())
    }
}

/// Top-level settings for a streamed world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Hard cap on the number of chunks loaded at once.
    pub max_loaded_chunks: usize,
    /// Seed for both the noise field and the per-chunk random streams.
    pub world_seed: u64,
    /// Extents of every chunk.
    pub chunk_dimensions: ChunkDimensions,
    /// Worker threads used to generate chunks; 0 generates on the calling thread.
    pub worker_threads: usize,
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_loaded_chunks: 100,
            world_seed: 0,
            chunk_dimensions: ChunkDimensions::default(),
            worker_threads: 0,
            terrain: TerrainConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: WorldConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_loaded_chunks == 0 {
            return Err(ConfigError::Invalid(
                "max_loaded_chunks must be positive".to_string(),
            ));
        }
        let ChunkDimensions {
            width,
            height,
            depth,
        } = self.chunk_dimensions;
        if width == 0 || height == 0 || depth == 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk dimensions must be non-zero, got {width}x{height}x{depth}"
            )));
        }
        if width > i32::MAX as usize || height > i32::MAX as usize || depth > i32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "chunk dimensions are too large: {width}x{height}x{depth}"
            )));
        }
        self.terrain.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "max_loaded_chunks": 9, "terrain": { "cave_count_range": { "start": 0, "end": 0 } } }"#,
        )
        .unwrap();
        assert_eq!(config.max_loaded_chunks, 9);
        assert_eq!(config.chunk_dimensions, ChunkDimensions::new(32, 128, 32));
        assert_eq!(config.worker_threads, 0);
        assert_eq!(config.terrain.cave_count_range, 0..0);
        assert_eq!(config.terrain.cave_radius_range, 3..8);
        assert_eq!(config.terrain.stone_noise_scale, 0.05);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let error = WorldConfig::from_json_str(r#"{ "max_loaded_chunks": 0 }"#).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = WorldConfig::from_json_str("{ max_loaded_chunks: ").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = WorldConfig::from_path("/definitely/not/here/world.json").unwrap_err();
        assert!(matches!(error, ConfigError::Io(_)));
    }

    #[test]
    fn inverted_and_degenerate_terrain_settings_are_rejected() {
        let mut config = WorldConfig::default();
        config.terrain.stone_height = LerpBounds::new(10.0, 5.0);
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.terrain.dirt_noise_scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.chunk_dimensions.height = 0;
        assert!(config.validate().is_err());

        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn lerp_interpolates_between_bounds() {
        let bounds = LerpBounds::new(5.0, 10.0);
        assert_eq!(bounds.lerp(0.0), 5.0);
        assert_eq!(bounds.lerp(0.5), 7.5);
        assert_eq!(bounds.lerp(1.0), 10.0);
    }
}
