//! # Voxel Grid Module
//!
//! Fixed-extent storage for the blocks of a single chunk.
//!
//! ## Storage
//!
//! Cells live in a flat vector in x-fastest order (`x + width * y + width * height * z`).
//! Alongside the cells the grid keeps a bit vector with one bit per cell that is set
//! when the cell is solid. Every write goes through [`VoxelGrid::set`], which keeps the
//! two in sync, so the solidity test used by face culling never has to decode a block.
//!
//! ## Bounds
//!
//! Indexing outside the grid is a programming error and panics. Neighbor queries that
//! are allowed to fall off the edge use the signed `*_at` accessors instead, which
//! report "no block" for any out-of-range position.

use bitvec::prelude::BitVec;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType, Block};

use super::ChunkDimensions;

/// A fixed-size 3D array of blocks for one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    dimensions: ChunkDimensions,
    blocks: Vec<Block>,
    /// One bit per cell, set when the cell holds anything other than `EMPTY`.
    solid_array: BitVec,
}

impl VoxelGrid {
    /// Creates a grid of the given extents with every cell `EMPTY`.
    pub fn new(dimensions: ChunkDimensions) -> Self {
        let volume = dimensions.volume();
        VoxelGrid {
            dimensions,
            blocks: vec![Block::new(BlockType::EMPTY); volume],
            solid_array: BitVec::repeat(false, volume),
        }
    }

    /// Creates a grid with every cell set to `block_type`.
    pub fn filled(dimensions: ChunkDimensions, block_type: BlockType) -> Self {
        let mut grid = Self::new(dimensions);
        grid.fill(block_type);
        grid
    }

    /// The extents of this grid.
    #[inline]
    pub fn dimensions(&self) -> ChunkDimensions {
        self.dimensions
    }

    /// Returns `true` if the signed position lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.dimensions.width
            && (y as usize) < self.dimensions.height
            && (z as usize) < self.dimensions.depth
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        let ChunkDimensions {
            width,
            height,
            depth,
        } = self.dimensions;
        if x >= width || y >= height || z >= depth {
            panic!(
                "voxel index ({x}, {y}, {z}) is outside the {width}x{height}x{depth} grid"
            );
        }
        x + width * y + width * height * z
    }

    /// Gets the block type at the given position.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[self.index(x, y, z)].get_block_type()
    }

    /// Sets the block type at the given position.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        let index = self.index(x, y, z);
        self.blocks[index] = Block::new(block_type);
        self.solid_array.set(index, block_type.is_solid());
    }

    /// Gets the block type at a signed position, or `None` outside the grid.
    pub fn try_get(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        if self.in_bounds(x, y, z) {
            Some(self.get(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Checks if the block at the specified position is solid.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.solid_array[self.index(x, y, z)]
    }

    /// Checks solidity at a signed position; anything outside the grid is not solid.
    #[inline]
    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.in_bounds(x, y, z) && self.is_block_solid(x as usize, y as usize, z as usize)
    }

    /// Checks whether the neighbor across `side` of the given cell is solid.
    ///
    /// Neighbors beyond the grid edge count as empty, so boundary faces are
    /// always considered exposed.
    #[inline]
    pub fn is_neighbor_solid(&self, x: usize, y: usize, z: usize, side: BlockSide) -> bool {
        let offset = side.neighbor_offset();
        self.is_solid_at(x as i32 + offset.x, y as i32 + offset.y, z as i32 + offset.z)
    }

    /// Sets every cell to `block_type`.
    pub fn fill(&mut self, block_type: BlockType) {
        self.blocks.fill(Block::new(block_type));
        self.solid_array.fill(block_type.is_solid());
    }

    /// Number of cells holding `block_type`.
    pub fn count(&self, block_type: BlockType) -> usize {
        let stored = Block::new(block_type);
        self.blocks.iter().filter(|block| **block == stored).count()
    }

    /// Number of non-empty cells.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Iterates the column at (x, z) from the bottom (y = 0) to the top.
    ///
    /// # Panics
    /// Panics if (x, z) is outside the grid.
    pub fn column(&self, x: usize, z: usize) -> impl Iterator<Item = BlockType> + '_ {
        (0..self.dimensions.height).map(move |y| self.get(x, y, z))
    }

    /// The raw cell bytes, one per cell in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ChunkDimensions {
        ChunkDimensions::new(4, 6, 3)
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = VoxelGrid::new(small());
        assert_eq!(grid.count(BlockType::EMPTY), 4 * 6 * 3);
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn set_keeps_solidity_in_sync() {
        let mut grid = VoxelGrid::new(small());
        grid.set(3, 5, 2, BlockType::STONE);
        assert_eq!(grid.get(3, 5, 2), BlockType::STONE);
        assert!(grid.is_block_solid(3, 5, 2));
        assert_eq!(grid.solid_count(), 1);

        grid.set(3, 5, 2, BlockType::EMPTY);
        assert!(!grid.is_block_solid(3, 5, 2));
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn fill_sets_every_cell() {
        let mut grid = VoxelGrid::filled(small(), BlockType::DIRT);
        assert_eq!(grid.count(BlockType::DIRT), small().volume());
        assert_eq!(grid.solid_count(), small().volume());
        grid.fill(BlockType::EMPTY);
        assert_eq!(grid.solid_count(), 0);
    }

    #[test]
    fn signed_accessors_treat_outside_as_empty() {
        let grid = VoxelGrid::filled(small(), BlockType::STONE);
        assert_eq!(grid.try_get(-1, 0, 0), None);
        assert_eq!(grid.try_get(0, 6, 0), None);
        assert_eq!(grid.try_get(0, 0, 2), Some(BlockType::STONE));
        assert!(!grid.is_solid_at(4, 0, 0));
        assert!(!grid.is_neighbor_solid(0, 0, 0, BlockSide::LEFT));
        assert!(grid.is_neighbor_solid(0, 0, 0, BlockSide::RIGHT));
    }

    #[test]
    #[should_panic(expected = "outside the 4x6x3 grid")]
    fn get_out_of_bounds_panics() {
        let grid = VoxelGrid::new(small());
        grid.get(4, 0, 0);
    }

    #[test]
    #[should_panic(expected = "outside the 4x6x3 grid")]
    fn set_out_of_bounds_panics() {
        let mut grid = VoxelGrid::new(small());
        grid.set(0, 0, 3, BlockType::DIRT);
    }

    #[test]
    fn column_reads_bottom_to_top() {
        let mut grid = VoxelGrid::new(small());
        grid.set(1, 0, 1, BlockType::BEDROCK);
        grid.set(1, 1, 1, BlockType::STONE);
        let column: Vec<BlockType> = grid.column(1, 1).take(3).collect();
        assert_eq!(
            column,
            vec![BlockType::BEDROCK, BlockType::STONE, BlockType::EMPTY]
        );
    }

    #[test]
    fn bytes_follow_storage_order() {
        let mut grid = VoxelGrid::new(small());
        grid.set(1, 0, 0, BlockType::GRASS);
        let bytes = grid.as_bytes();
        assert_eq!(bytes.len(), small().volume());
        assert_eq!(bytes[1], BlockType::GRASS as u8);
    }
}
