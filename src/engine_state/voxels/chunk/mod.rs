//! # Chunk Module
//!
//! This module provides the `Chunk` struct and the types used to address and size
//! chunks: `ChunkCoordinate`, `ChunkDimensions` and the per-chunk `VoxelGrid`.
//!
//! ## Lifecycle
//!
//! A chunk is built in one step by [`Chunk::generate`]: the grid is filled by the
//! terrain generator and immediately converted into per-block-type meshes. There is
//! no partially generated state; once a `Chunk` value exists its grid and meshes are
//! complete, and dropping it releases both together.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    rendering::meshing::ChunkMeshes, voxels::terrain::TerrainGenerator,
};

mod chunk_coordinate;
pub mod voxel_grid;

pub use chunk_coordinate::ChunkCoordinate;
pub use voxel_grid::VoxelGrid;

/// Default chunk width (X extent) in blocks.
pub const CHUNK_WIDTH: usize = 32;
/// Default chunk height (Y extent) in blocks.
pub const CHUNK_HEIGHT: usize = 128;
/// Default chunk depth (Z extent) in blocks.
pub const CHUNK_DEPTH: usize = 32;

/// The extents of every chunk in a world, in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkDimensions {
    /// Extent along X.
    pub width: usize,
    /// Extent along Y.
    pub height: usize,
    /// Extent along Z.
    pub depth: usize,
}

impl ChunkDimensions {
    /// Creates a set of extents.
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells in one chunk.
    #[inline]
    pub const fn volume(&self) -> usize {
        self.width * self.height * self.depth
    }
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self::new(CHUNK_WIDTH, CHUNK_HEIGHT, CHUNK_DEPTH)
    }
}

/// A generated, meshed column of the voxel world.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkCoordinate,
    grid: VoxelGrid,
    meshes: ChunkMeshes,
}

impl Chunk {
    /// Generates the terrain for `position` and extracts its meshes.
    pub fn generate(position: ChunkCoordinate, generator: &TerrainGenerator) -> Self {
        let mut grid = VoxelGrid::new(generator.dimensions());
        generator.generate(position, &mut grid);
        Self::from_grid(position, grid)
    }

    /// Wraps an already filled grid, extracting its meshes.
    pub fn from_grid(position: ChunkCoordinate, grid: VoxelGrid) -> Self {
        let meshes = ChunkMeshes::extract(&grid);
        Chunk {
            position,
            grid,
            meshes,
        }
    }

    /// The chunk's blocks.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The chunk's meshes, one per block type present on a visible surface.
    pub fn meshes(&self) -> &ChunkMeshes {
        &self.meshes
    }

    /// Where the host should place this chunk's meshes in world space.
    pub fn world_position(&self) -> Point3<f32> {
        self.position.world_position(&self.grid.dimensions())
    }
}
