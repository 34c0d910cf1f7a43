use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points in chunk-local block coordinates and
/// the two triangles that cover them. The corner order and triangle pattern are
/// fixed per side so that every triangle winds with its outward normal equal to
/// `(v1 - v0) × (v2 - v0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners, in the order the triangle pattern refers to them
    pub corners: [Point3<usize>; 4],
    /// The block type of the cell this face belongs to
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the voxel at (`i`, `j`, `k`).
    pub fn new(i: usize, j: usize, k: usize, block_type: BlockType, block_side: BlockSide) -> Self {
        let corners = match block_side {
            BlockSide::BOTTOM => [
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
            ],

            BlockSide::TOP => [
                Point3::new(i, j + 1, k),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
            ],

            BlockSide::FRONT => [
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k),
                Point3::new(i, j + 1, k),
                Point3::new(i + 1, j + 1, k),
            ],

            BlockSide::BACK => [
                Point3::new(i + 1, j, k + 1),
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i, j + 1, k + 1),
            ],

            BlockSide::LEFT => [
                Point3::new(i, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
            ],

            BlockSide::RIGHT => [
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i + 1, j + 1, k + 1),
            ],
        };

        Face {
            corners,
            block_type,
            block_side,
        }
    }

    /// The two triangles of this face as indices into `corners`.
    pub fn local_indices(&self) -> [u32; 6] {
        match self.block_side {
            BlockSide::BOTTOM | BlockSide::LEFT => [0, 1, 2, 1, 3, 2],
            BlockSide::TOP | BlockSide::FRONT | BlockSide::BACK | BlockSide::RIGHT => {
                [0, 2, 1, 1, 2, 3]
            }
        }
    }

    /// Corner positions as vertex data.
    pub fn vertices(&self) -> [[f32; 3]; 4] {
        self.corners
            .map(|corner| [corner.x as f32, corner.y as f32, corner.z as f32])
    }

    /// The geometric normal of the first triangle, from its winding.
    pub fn normal(&self) -> Vector3<f32> {
        let v = self.vertices().map(Vector3::from);
        let [i0, i1, i2, ..] = self.local_indices();
        let (v0, v1, v2) = (v[i0 as usize], v[i1 as usize], v[i2 as usize]);
        (v1 - v0).cross(v2 - v0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winding_matches_side_normal() {
        for side in BlockSide::all() {
            let face = Face::new(3, 4, 5, BlockType::STONE, side);
            assert_eq!(face.normal(), side.normal(), "{side:?}");
        }
    }

    #[test]
    fn both_triangles_share_the_normal() {
        for side in BlockSide::all() {
            let face = Face::new(0, 0, 0, BlockType::DIRT, side);
            let v = face.vertices().map(Vector3::from);
            for triangle in face.local_indices().chunks(3) {
                let (v0, v1, v2) = (
                    v[triangle[0] as usize],
                    v[triangle[1] as usize],
                    v[triangle[2] as usize],
                );
                assert_eq!((v1 - v0).cross(v2 - v0), side.normal(), "{side:?}");
            }
        }
    }
}
