use std::fmt;

use cgmath::Point3;

use crate::engine_state::camera_state::frustum::Aabb;

use super::ChunkDimensions;

/// Identifies a chunk column on the horizontal chunk grid.
///
/// Chunks have no vertical neighbors: each coordinate owns one full-height column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkCoordinate {
    /// Column index along the world X axis.
    pub x: i32,
    /// Column index along the world Z axis.
    pub z: i32,
}

impl ChunkCoordinate {
    /// Creates a coordinate from its two grid indices.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The coordinate of the chunk a world-space position is closest to.
    ///
    /// Positions are divided by the chunk footprint and rounded to the nearest
    /// integer, halves going to the even neighbour.
    pub fn from_world_position(position: Point3<f32>, dimensions: &ChunkDimensions) -> Self {
        Self {
            x: (position.x / dimensions.width as f32).round_ties_even() as i32,
            z: (position.z / dimensions.depth as f32).round_ties_even() as i32,
        }
    }

    /// The world-space position of the chunk's minimum corner, where the host
    /// places the chunk's meshes.
    pub fn world_position(&self, dimensions: &ChunkDimensions) -> Point3<f32> {
        Point3::new(
            (self.x as i64 * dimensions.width as i64) as f32,
            0.0,
            (self.z as i64 * dimensions.depth as i64) as f32,
        )
    }

    /// The world-space bounds of the whole column.
    pub fn bounding_box(&self, dimensions: &ChunkDimensions) -> Aabb {
        let min = self.world_position(dimensions);
        let max = Point3::new(
            min.x + dimensions.width as f32,
            dimensions.height as f32,
            min.z + dimensions.depth as f32,
        );
        Aabb::new(min, max)
    }

    /// The world-space center of the column.
    pub fn center(&self, dimensions: &ChunkDimensions) -> Point3<f32> {
        self.bounding_box(dimensions).center()
    }
}

impl fmt::Display for ChunkCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

impl From<(i32, i32)> for ChunkCoordinate {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}
