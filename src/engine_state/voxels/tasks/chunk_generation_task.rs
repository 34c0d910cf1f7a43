//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask` which builds a complete chunk,
//! terrain and meshes, on a worker thread. The finished chunk is handed to the
//! world on the calling thread, so a chunk is never observable half-built.

use std::sync::Arc;

use crate::engine_state::{
    task_management::task::{Task, TaskResult},
    voxels::{
        chunk::{Chunk, ChunkCoordinate},
        terrain::TerrainGenerator,
        world::World,
    },
};

/// A task that generates and meshes one chunk.
pub struct ChunkGenerationTask {
    /// The generator shared by every task of the world
    generator: Arc<TerrainGenerator>,
    /// The position of the chunk to generate (in chunk coordinates)
    position: ChunkCoordinate,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    pub fn new(generator: Arc<TerrainGenerator>, position: ChunkCoordinate) -> Self {
        ChunkGenerationTask {
            generator,
            position,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        Box::new(ChunkGenerationTaskResult {
            chunk: Chunk::generate(self.position, &self.generator),
        })
    }
}

/// The result of a chunk generation task: the finished chunk.
pub struct ChunkGenerationTaskResult {
    chunk: Chunk,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Inserts the chunk into the world. A chunk whose coordinate got loaded in
    /// the meantime is dropped.
    fn handle_result(self: Box<Self>, world: &mut World) -> Vec<Box<dyn Task + Send>> {
        world.insert_generated(self.chunk);
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::engine_state::voxels::chunk::ChunkDimensions;

    #[test]
    fn worker_built_chunk_matches_synchronous_one() {
        let generator = Arc::new(TerrainGenerator::new(
            TerrainConfig::default(),
            ChunkDimensions::new(8, 32, 8),
            77,
        ));
        let coordinate = ChunkCoordinate::new(3, -1);
        let mut world = World::new(generator.clone());

        let result = ChunkGenerationTask::new(generator.clone(), coordinate).process();
        assert!(result.handle_result(&mut world).is_empty());

        let expected = Chunk::generate(coordinate, &generator);
        let chunk = world.get(coordinate).unwrap();
        assert_eq!(chunk.grid(), expected.grid());
        assert_eq!(chunk.meshes(), expected.meshes());
    }
}
