//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides conversion between the rich enum and the compact ordinal used for storage.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant of each variant is its ordinal, which is used both as the
/// compact storage format and as the index into per-type lookup tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum BlockType {
    /// No solid voxel present.
    #[default]
    EMPTY = 0,

    /// The indestructible floor layer at the bottom of every column.
    BEDROCK = 1,

    /// The bulk layer between bedrock and dirt.
    STONE = 2,

    /// The soil layer on top of stone.
    DIRT = 3,

    /// Dirt that is exposed to the open air at the top of its column.
    GRASS = 4,
}

impl BlockType {
    /// The number of block types, used to size enumeration-indexed tables.
    pub const COUNT: usize = 5;

    /// Every block type in ordinal order.
    pub const ALL: [BlockType; Self::COUNT] = [
        BlockType::EMPTY,
        BlockType::BEDROCK,
        BlockType::STONE,
        BlockType::DIRT,
        BlockType::GRASS,
    ];

    /// Converts a `BlockTypeSize` back to a `BlockType`.
    ///
    /// # Panics
    /// Panics if the input value doesn't correspond to a valid `BlockType`.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        match BlockType::from_u8(btype) {
            Some(block_type) => block_type,
            None => panic!("invalid block type ordinal {btype}"),
        }
    }

    /// Returns `true` for every type other than `EMPTY`.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockType::EMPTY
    }

    /// The ordinal of this type, for indexing lookup tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}
