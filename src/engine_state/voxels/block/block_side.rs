//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block and the
//! neighbor offsets used for face culling.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants follow the order in which faces are emitted for a cell
/// during mesh extraction: below, above, front, back, left, right.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The bottom face (facing negative Y)
    BOTTOM = 0,

    /// The top face (facing positive Y)
    TOP = 1,

    /// The front face (facing negative Z)
    FRONT = 2,

    /// The back face (facing positive Z)
    BACK = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Offset from a cell to the neighbor that shares this face.
    pub fn neighbor_offset(self) -> Vector3<i32> {
        match self {
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, -1),
            BlockSide::BACK => Vector3::new(0, 0, 1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.neighbor_offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }
}
