//! Rendering-side data for the voxel engine.
//!
//! Drawing is the host's job. This module produces what the host draws: per-chunk,
//! per-block-type triangle meshes built from voxel grids.

pub mod meshing;
