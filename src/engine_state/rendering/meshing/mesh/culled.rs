use log::trace;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    chunk::{ChunkDimensions, VoxelGrid},
};

use super::{face::Face, mesh::ChunkMeshes};

/// Builds per-block-type meshes with face culling.
///
/// Every solid cell contributes one quad for each side whose neighbor is empty
/// or beyond the grid edge. Chunks know nothing about their neighbors, so faces
/// on the grid boundary are always emitted.
///
/// Cells are visited z-outer, y, x-inner; each cell's faces in
/// `BlockSide::all()` order.
pub fn extract(grid: &VoxelGrid) -> ChunkMeshes {
    let ChunkDimensions {
        width,
        height,
        depth,
    } = grid.dimensions();
    let mut meshes = ChunkMeshes::default();

    for k in 0..depth {
        for j in 0..height {
            for i in 0..width {
                if !grid.is_block_solid(i, j, k) {
                    continue;
                }
                let block_type = grid.get(i, j, k);
                for side in BlockSide::all() {
                    if !grid.is_neighbor_solid(i, j, k, side) {
                        meshes.push_face(&Face::new(i, j, k, block_type, side));
                    }
                }
            }
        }
    }

    trace!("Extracted {} faces", meshes.face_count());
    debug_assert!(meshes.get(BlockType::EMPTY).is_none());
    meshes
}
