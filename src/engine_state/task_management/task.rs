//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system,
//! which executes work on background threads.
//!
//! ## Core Components
//! - `Task`: Represents a unit of work that can be executed on a worker
//! - `TaskResult`: Represents the result of a completed task
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the calling thread with the world
//! 5. The result can spawn follow-up tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred between threads
//! - `TaskResult` must be `Send` to be transferred back
//! - Tasks own everything they read; the world is only touched in `handle_result()`

use crate::engine_state::voxels::world::World;

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should be self-contained and own all the data they need, so that no
/// shared mutable state is involved while they run.
pub trait Task: Send {
    /// Processes the task and returns a result.
    ///
    /// This runs on a background thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`.
///
/// Results are applied on the thread that owns the `World`, one at a time.
pub trait TaskResult: Send {
    /// Applies the result to the world.
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty).
    fn handle_result(self: Box<Self>, world: &mut World) -> Vec<Box<dyn Task + Send>>;
}
