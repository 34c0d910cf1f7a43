//! # Engine State Module
//!
//! The core engine module that owns the loaded world and keeps it in step with
//! the viewer.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera, projection and view frustum
//! * `rendering` - Mesh extraction for the host's renderer
//! * `task_management` - Worker threads for parallel chunk generation
//! * `voxels` - Voxel data, chunks, terrain, the world and streaming
//!
//! ## Lifecycle
//!
//! The host calls [`EngineState::bootstrap`] once, then [`EngineState::update`]
//! whenever the viewer moves. Every call computes a [`StreamingPlan`] and applies
//! it before returning: chunks leaving the target set are destroyed first, then
//! the new ones are generated. The loaded count therefore never exceeds the
//! configured capacity, not even halfway through an update.

use std::sync::Arc;

use camera_state::ViewerState;
use log::{debug, info};
use task_management::TaskManager;
use voxels::{
    streaming::{StreamingManager, StreamingPlan},
    tasks::chunk_generation_task::ChunkGenerationTask,
    terrain::TerrainGenerator,
    world::World,
};

use crate::config::WorldConfig;

pub mod camera_state;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use voxel_terrain::config::WorldConfig;
/// use voxel_terrain::engine_state::EngineState;
/// use voxel_terrain::engine_state::voxels::chunk::ChunkDimensions;
///
/// let config = WorldConfig {
///     max_loaded_chunks: 4,
///     chunk_dimensions: ChunkDimensions::new(8, 32, 8),
///     ..WorldConfig::default()
/// };
/// let mut engine_state = EngineState::new(&config);
/// engine_state.bootstrap();
/// assert_eq!(engine_state.world().len(), 4);
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    world: World,
    /// Decides which chunks should be loaded
    streaming: StreamingManager,
    /// Worker pool, when chunks are generated in parallel
    task_manager: Option<TaskManager>,
}

impl EngineState {
    /// Creates an engine with an empty world.
    ///
    /// The configuration is assumed to be valid; see [`WorldConfig::validate`].
    pub fn new(config: &WorldConfig) -> Self {
        let generator = Arc::new(TerrainGenerator::new(
            config.terrain.clone(),
            config.chunk_dimensions,
            config.world_seed,
        ));
        let task_manager =
            (config.worker_threads > 0).then(|| TaskManager::new(config.worker_threads));

        info!(
            "Engine ready: capacity {}, chunks {}x{}x{}, seed {}, {} workers",
            config.max_loaded_chunks,
            config.chunk_dimensions.width,
            config.chunk_dimensions.height,
            config.chunk_dimensions.depth,
            config.world_seed,
            config.worker_threads
        );

        EngineState {
            world: World::new(generator),
            streaming: StreamingManager::new(config.max_loaded_chunks, config.chunk_dimensions),
            task_manager,
        }
    }

    /// Loads the initial block of chunks at the origin.
    pub fn bootstrap(&mut self) -> StreamingPlan {
        let plan = self.streaming.bootstrap_plan(self.world.coordinates());
        self.apply(&plan);
        info!("Bootstrapped {} chunks", self.world.len());
        plan
    }

    /// Brings the loaded set in line with what `viewer` should see.
    pub fn update(&mut self, viewer: &ViewerState) -> StreamingPlan {
        let plan = self.streaming.plan(viewer, self.world.coordinates());
        self.apply(&plan);
        plan
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn streaming(&self) -> &StreamingManager {
        &self.streaming
    }

    fn apply(&mut self, plan: &StreamingPlan) {
        for &coordinate in &plan.to_unload {
            self.world.destroy(coordinate);
        }

        match self.task_manager.as_mut() {
            Some(task_manager) => {
                for &coordinate in &plan.to_load {
                    task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                        self.world.generator().clone(),
                        coordinate,
                    )));
                }
                task_manager.run_until_idle(&mut self.world);
            }
            None => {
                for &coordinate in &plan.to_load {
                    self.world.create(coordinate);
                }
            }
        }

        debug!(
            "Applied plan: -{} +{}, {} loaded",
            plan.to_unload.len(),
            plan.to_load.len(),
            self.world.len()
        );
    }
}
