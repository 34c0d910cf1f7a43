//! Mesh generation for voxel rendering.
//!
//! This module converts voxel grids into renderer-ready buffers.
//!
//! # Architecture
//! - [`ChunkMeshes`]: The meshes of one chunk, one [`MeshBuffers`] per block type
//! - [`Face`]: A single quad on one side of a voxel, with its fixed winding
//! - Face culling: a face is only emitted when nothing solid covers it
//!
//! # Usage
//! ```
//! use voxel_terrain::engine_state::{
//!     rendering::meshing::ChunkMeshes,
//!     voxels::{block::block_type::BlockType, chunk::{ChunkDimensions, VoxelGrid}},
//! };
//!
//! let mut grid = VoxelGrid::new(ChunkDimensions::new(2, 2, 2));
//! grid.set(0, 0, 0, BlockType::STONE);
//! let meshes = ChunkMeshes::extract(&grid);
//! assert_eq!(meshes.face_count(), 6);
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::extract;
pub use face::Face;
pub use mesh::*;
