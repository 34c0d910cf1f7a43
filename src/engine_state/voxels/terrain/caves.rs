//! Spherical cave carving.

use cgmath::Point3;
use log::trace;

use crate::config::TerrainConfig;
use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{ChunkDimensions, VoxelGrid},
};

use super::sample_range;

/// Carves a random number of caves into `grid`, returning how many were carved.
///
/// Cave centers are kept `cave_vertical_guard` cells away from the bottom and top
/// of the grid; a grid too short to fit that band gets no caves.
pub fn carve_caves(grid: &mut VoxelGrid, config: &TerrainConfig, rng: &mut fastrand::Rng) -> usize {
    let ChunkDimensions {
        width,
        height,
        depth,
    } = grid.dimensions();
    let count = sample_range(rng, &config.cave_count_range).max(0) as usize;
    let guard = config.cave_vertical_guard;
    let vertical = guard..(height as i32 - guard);

    if count == 0 || vertical.is_empty() || width == 0 || depth == 0 {
        return 0;
    }

    for _ in 0..count {
        let center = Point3::new(
            rng.i32(0..width as i32),
            rng.i32(vertical.clone()),
            rng.i32(0..depth as i32),
        );
        let radius = sample_range(rng, &config.cave_radius_range);
        trace!("Carving cave at {:?} with radius {}", center, radius);
        carve_sphere(grid, center, radius);
    }
    count
}

/// Empties every cell within Euclidean distance `radius` of `center`.
///
/// The sphere is clipped to the grid, so centers near or beyond an edge are fine.
pub fn carve_sphere(grid: &mut VoxelGrid, center: Point3<i32>, radius: i32) {
    if radius < 0 {
        return;
    }
    let ChunkDimensions {
        width,
        height,
        depth,
    } = grid.dimensions();
    let clip = |c: i32, extent: usize| {
        let low = (c as i64 - radius as i64).max(0);
        let high = (c as i64 + radius as i64).min(extent as i64 - 1);
        low..=high
    };
    let radius_squared = radius as i64 * radius as i64;

    for z in clip(center.z, depth) {
        let dz = z - center.z as i64;
        for y in clip(center.y, height) {
            let dy = y - center.y as i64;
            for x in clip(center.x, width) {
                let dx = x - center.x as i64;
                if dx * dx + dy * dy + dz * dz <= radius_squared {
                    grid.set(x as usize, y as usize, z as usize, BlockType::EMPTY);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone(width: usize, height: usize, depth: usize) -> VoxelGrid {
        VoxelGrid::filled(ChunkDimensions::new(width, height, depth), BlockType::STONE)
    }

    #[test]
    fn corner_sphere_is_clipped_to_the_grid() {
        let mut grid = stone(32, 128, 32);
        carve_sphere(&mut grid, Point3::new(0, 10, 0), 8);

        assert_eq!(grid.get(0, 10, 0), BlockType::EMPTY);
        assert_eq!(grid.get(8, 10, 0), BlockType::EMPTY);
        assert_eq!(grid.get(0, 2, 0), BlockType::EMPTY);
        assert_eq!(grid.get(9, 10, 0), BlockType::STONE);
        assert_eq!(grid.get(6, 16, 0), BlockType::STONE);
        assert_eq!(grid.get(0, 1, 0), BlockType::STONE);
    }

    #[test]
    fn sphere_outside_the_grid_changes_nothing() {
        let mut grid = stone(8, 8, 8);
        carve_sphere(&mut grid, Point3::new(-20, 4, -20), 3);
        carve_sphere(&mut grid, Point3::new(4, 4, 4), -1);
        assert_eq!(grid.solid_count(), 8 * 8 * 8);
    }

    #[test]
    fn unit_sphere_removes_center_and_six_neighbors() {
        let mut grid = stone(5, 5, 5);
        carve_sphere(&mut grid, Point3::new(2, 2, 2), 1);
        assert_eq!(grid.count(BlockType::EMPTY), 7);
    }

    #[test]
    fn short_grids_get_no_caves() {
        let mut grid = stone(8, 20, 8);
        let mut rng = fastrand::Rng::with_seed(5);
        let carved = carve_caves(&mut grid, &TerrainConfig::default(), &mut rng);
        assert_eq!(carved, 0);
        assert_eq!(grid.solid_count(), 8 * 20 * 8);
    }

    #[test]
    fn cave_count_follows_configured_range() {
        let mut grid = stone(16, 64, 16);
        let mut rng = fastrand::Rng::with_seed(5);
        let carved = carve_caves(&mut grid, &TerrainConfig::default(), &mut rng);
        assert!((10..20).contains(&carved));
        assert!(grid.solid_count() < 16 * 64 * 16);
    }
}
