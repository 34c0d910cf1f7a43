//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the compact block
//! cell stored in voxel grids.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// A UV quad: one texture coordinate per face corner.
pub type UvQuad = [[f32; 2]; 4];

const FULL_TILE: UvQuad = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Maps each block type to the UV quad applied to every face of that type.
///
/// The array is indexed by `BlockType` as a `usize`. Every type currently maps
/// the full texture onto each face; a texture atlas would give each row its own
/// tile.
pub static BLOCK_TYPE_TO_UVS: [UvQuad; BlockType::COUNT] = [
    FULL_TILE, // EMPTY (never meshed)
    FULL_TILE, // BEDROCK
    FULL_TILE, // STONE
    FULL_TILE, // DIRT
    FULL_TILE, // GRASS
];

/// Represents a single voxel block in a grid.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and `Pod` derive let a grid's cells be viewed as
/// raw bytes, one byte per cell.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq, Default)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Decodes the stored ordinal back into a `BlockType`.
    #[inline]
    pub fn get_block_type(&self) -> BlockType {
        BlockType::get_block_type_from_int(self.block_type)
    }

    /// Gets the UV quad for a block type.
    #[inline]
    pub fn get_uvs(block_type: BlockType) -> &'static UvQuad {
        &BLOCK_TYPE_TO_UVS[block_type.index()]
    }
}
