//! # Terrain Generation
//!
//! Fills a chunk's `VoxelGrid` with layered terrain:
//!
//! 1. A random bedrock floor per column.
//! 2. Stone up to a noise-driven surface.
//! 3. A noise-driven dirt blanket on top of the stone.
//! 4. Spherical caves carved through the solid fill (see [`caves`]).
//! 5. Grass on every column whose topmost dirt is open to the sky.
//!
//! Generation is a pure function of the chunk coordinate, the world seed and the
//! noise source: the random stream for each chunk is seeded from the world seed
//! and the coordinate, so regenerating a chunk reproduces it exactly.

use std::fmt;
use std::ops::Range;

use log::debug;
use noise::{NoiseFn, Perlin};

use crate::config::TerrainConfig;
use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{ChunkCoordinate, ChunkDimensions, VoxelGrid},
};

pub mod caves;

/// A deterministic, continuous 2D height field sampled in `[0, 1]`.
pub trait HeightNoise: Send + Sync {
    fn sample(&self, x: f64, z: f64) -> f64;
}

/// Seeded Perlin noise remapped from `[-1, 1]` to `[0, 1]`.
pub struct PerlinHeightNoise {
    perlin: Perlin,
}

impl PerlinHeightNoise {
    pub fn new(world_seed: u64) -> Self {
        let folded = (world_seed ^ (world_seed >> 32)) as u32;
        Self {
            perlin: Perlin::new(folded),
        }
    }
}

impl HeightNoise for PerlinHeightNoise {
    fn sample(&self, x: f64, z: f64) -> f64 {
        ((self.perlin.get([x, z]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Rounded layer surfaces for one column. Cells below `stone` are stone (above
/// the bedrock), cells in `stone..dirt` are dirt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeights {
    pub stone: i32,
    pub dirt: i32,
}

/// Draws from a half-open range, yielding the start of an empty range.
pub(crate) fn sample_range(rng: &mut fastrand::Rng, range: &Range<i32>) -> i32 {
    if range.is_empty() {
        range.start
    } else {
        rng.i32(range.clone())
    }
}

/// Generates the blocks of a chunk from its coordinate.
pub struct TerrainGenerator {
    config: TerrainConfig,
    dimensions: ChunkDimensions,
    world_seed: u64,
    noise: Box<dyn HeightNoise>,
}

impl fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("config", &self.config)
            .field("dimensions", &self.dimensions)
            .field("world_seed", &self.world_seed)
            .finish_non_exhaustive()
    }
}

impl TerrainGenerator {
    /// Creates a generator backed by Perlin noise seeded from `world_seed`.
    pub fn new(config: TerrainConfig, dimensions: ChunkDimensions, world_seed: u64) -> Self {
        Self::with_noise(
            config,
            dimensions,
            world_seed,
            Box::new(PerlinHeightNoise::new(world_seed)),
        )
    }

    /// Creates a generator with an explicit noise source.
    pub fn with_noise(
        config: TerrainConfig,
        dimensions: ChunkDimensions,
        world_seed: u64,
        noise: Box<dyn HeightNoise>,
    ) -> Self {
        Self {
            config,
            dimensions,
            world_seed,
            noise,
        }
    }

    /// The extents of the grids this generator produces.
    pub fn dimensions(&self) -> ChunkDimensions {
        self.dimensions
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Fills `grid` with the terrain of the chunk at `coordinate`.
    ///
    /// The grid is expected to be freshly created (all `EMPTY`); layers only
    /// ever fill empty cells.
    pub fn generate(&self, coordinate: ChunkCoordinate, grid: &mut VoxelGrid) {
        let mut rng = self.rng_for(coordinate);
        self.fill_layers(coordinate, grid, &mut rng);
        let carved = caves::carve_caves(grid, &self.config, &mut rng);
        let grass = grow_grass(grid);
        debug!(
            "Generated chunk {}: {} solid cells, {} caves, {} grass",
            coordinate,
            grid.solid_count(),
            carved,
            grass
        );
    }

    /// The rounded stone and dirt surfaces at a world-space column.
    ///
    /// Both layers sample the same noise field at different scales. The dirt
    /// surface is built on the unrounded stone surface and rounded once, with
    /// halves going to the even neighbour.
    pub fn column_heights(&self, world_x: i64, world_z: i64) -> ColumnHeights {
        let (x, z) = (world_x as f64, world_z as f64);
        let stone_scale = self.config.stone_noise_scale;
        let dirt_scale = self.config.dirt_noise_scale;

        let stone = self
            .config
            .stone_height
            .lerp(self.noise.sample(x * stone_scale, z * stone_scale));
        let thickness = self
            .config
            .dirt_thickness
            .lerp(self.noise.sample(x * dirt_scale, z * dirt_scale));

        ColumnHeights {
            stone: stone.round_ties_even() as i32,
            dirt: (stone + thickness).round_ties_even() as i32,
        }
    }

    fn rng_for(&self, coordinate: ChunkCoordinate) -> fastrand::Rng {
        let seed = self.world_seed
            ^ (coordinate.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (coordinate.z as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        fastrand::Rng::with_seed(seed)
    }

    fn fill_layers(&self, coordinate: ChunkCoordinate, grid: &mut VoxelGrid, rng: &mut fastrand::Rng) {
        let ChunkDimensions {
            width,
            height,
            depth,
        } = grid.dimensions();
        let height = height as i32;
        let origin_x = coordinate.x as i64 * width as i64;
        let origin_z = coordinate.z as i64 * depth as i64;

        for z in 0..depth {
            for x in 0..width {
                let bedrock = sample_range(rng, &self.config.bedrock_height_range);
                let heights = self.column_heights(origin_x + x as i64, origin_z + z as i64);

                fill_span(grid, x, z, 0..bedrock.min(height), BlockType::BEDROCK);
                fill_span(
                    grid,
                    x,
                    z,
                    bedrock.max(0)..heights.stone.min(height),
                    BlockType::STONE,
                );
                fill_span(
                    grid,
                    x,
                    z,
                    heights.stone.max(0)..heights.dirt.min(height),
                    BlockType::DIRT,
                );
            }
        }
    }
}

/// Writes `block_type` into the still-empty cells of a column span.
fn fill_span(grid: &mut VoxelGrid, x: usize, z: usize, span: Range<i32>, block_type: BlockType) {
    for y in span {
        let y = y as usize;
        if grid.get(x, y, z) == BlockType::EMPTY {
            grid.set(x, y, z, block_type);
        }
    }
}

/// Turns the topmost dirt of each column into grass when nothing sits on it.
///
/// Scanning stops at the first dirt found from the top, whether or not it was
/// converted, so a column gets at most one grass block. Returns how many were grown.
pub fn grow_grass(grid: &mut VoxelGrid) -> usize {
    let ChunkDimensions {
        width,
        height,
        depth,
    } = grid.dimensions();
    let mut grown = 0;

    for z in 0..depth {
        for x in 0..width {
            for y in (0..height).rev() {
                if grid.get(x, y, z) != BlockType::DIRT {
                    continue;
                }
                if y == height - 1 || grid.get(x, y + 1, z) == BlockType::EMPTY {
                    grid.set(x, y, z, BlockType::GRASS);
                    grown += 1;
                }
                break;
            }
        }
    }
    grown
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantNoise(f64);

    impl HeightNoise for ConstantNoise {
        fn sample(&self, _x: f64, _z: f64) -> f64 {
            self.0
        }
    }

    fn no_caves() -> TerrainConfig {
        TerrainConfig {
            cave_count_range: 0..0,
            ..TerrainConfig::default()
        }
    }

    fn dims() -> ChunkDimensions {
        ChunkDimensions::new(16, 64, 16)
    }

    fn generate(generator: &TerrainGenerator, coordinate: ChunkCoordinate) -> VoxelGrid {
        let mut grid = VoxelGrid::new(generator.dimensions());
        generator.generate(coordinate, &mut grid);
        grid
    }

    #[test]
    fn constant_noise_gives_flat_layers() {
        let generator =
            TerrainGenerator::with_noise(no_caves(), dims(), 3, Box::new(ConstantNoise(0.5)));
        assert_eq!(
            generator.column_heights(123, -40),
            ColumnHeights { stone: 8, dirt: 10 }
        );

        let grid = generate(&generator, ChunkCoordinate::new(0, 0));
        for z in 0..16 {
            for x in 0..16 {
                let column: Vec<BlockType> = grid.column(x, z).collect();
                let bedrock = column
                    .iter()
                    .take_while(|b| **b == BlockType::BEDROCK)
                    .count();
                assert!((1..=3).contains(&bedrock));
                assert!(column[bedrock..8].iter().all(|b| *b == BlockType::STONE));
                assert_eq!(column[8], BlockType::DIRT);
                assert_eq!(column[9], BlockType::GRASS);
                assert!(column[10..].iter().all(|b| *b == BlockType::EMPTY));
            }
        }
    }

    #[test]
    fn half_heights_round_to_even() {
        let generator =
            TerrainGenerator::with_noise(no_caves(), dims(), 0, Box::new(ConstantNoise(0.3)));
        // stone 6.5, dirt 6.5 + 1.5 = 8.0
        assert_eq!(
            generator.column_heights(0, 0),
            ColumnHeights { stone: 6, dirt: 8 }
        );
    }

    #[test]
    fn layers_are_monotonic_without_caves() {
        let generator = TerrainGenerator::new(no_caves(), dims(), 42);
        let grid = generate(&generator, ChunkCoordinate::new(-3, 5));
        for z in 0..16 {
            for x in 0..16 {
                let column: Vec<BlockType> = grid.column(x, z).collect();
                let solid = column.iter().take_while(|b| b.is_solid()).count();
                assert!(column[solid..].iter().all(|b| *b == BlockType::EMPTY));
                assert!(column[..solid].windows(2).all(|pair| pair[0] <= pair[1]));
                assert_eq!(column[0], BlockType::BEDROCK);
            }
        }
    }

    #[test]
    fn grass_is_the_single_topmost_exposed_dirt() {
        let generator = TerrainGenerator::new(TerrainConfig::default(), dims(), 9);
        let grid = generate(&generator, ChunkCoordinate::new(2, 1));
        for z in 0..16 {
            for x in 0..16 {
                let column: Vec<BlockType> = grid.column(x, z).collect();
                let grass: Vec<usize> = (0..column.len())
                    .filter(|&y| column[y] == BlockType::GRASS)
                    .collect();
                assert!(grass.len() <= 1);
                if let Some(&y) = grass.first() {
                    assert!(y == column.len() - 1 || column[y + 1] == BlockType::EMPTY);
                    assert!(column[y + 1..].iter().all(|b| *b != BlockType::DIRT));
                }
            }
        }
    }

    #[test]
    fn same_seed_and_coordinate_reproduce_the_chunk() {
        let first = TerrainGenerator::new(TerrainConfig::default(), dims(), 1234);
        let second = TerrainGenerator::new(TerrainConfig::default(), dims(), 1234);
        let coordinate = ChunkCoordinate::new(7, -2);
        assert_eq!(
            generate(&first, coordinate).as_bytes(),
            generate(&second, coordinate).as_bytes()
        );
    }

    #[test]
    fn empty_ranges_yield_their_start() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(sample_range(&mut rng, &(5..5)), 5);
        for _ in 0..100 {
            assert!((1..4).contains(&sample_range(&mut rng, &(1..4))));
        }
    }

    #[test]
    fn grass_needs_open_sky() {
        let mut grid = VoxelGrid::new(ChunkDimensions::new(1, 4, 1));
        grid.set(0, 0, 0, BlockType::DIRT);
        grid.set(0, 1, 0, BlockType::DIRT);
        grid.set(0, 2, 0, BlockType::STONE);
        assert_eq!(grow_grass(&mut grid), 0);

        grid.set(0, 3, 0, BlockType::DIRT);
        assert_eq!(grow_grass(&mut grid), 1);
        assert_eq!(grid.get(0, 3, 0), BlockType::GRASS);
        assert_eq!(grid.get(0, 1, 0), BlockType::DIRT);
    }
}
