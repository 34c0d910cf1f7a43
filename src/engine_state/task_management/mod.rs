//! # Task Management System
//!
//! This module provides a small thread pool for executing work off the calling
//! thread. It is used to generate and mesh the chunks of one streaming update in
//! parallel.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work executed on a worker
//! - `TaskResult`: The result of a completed task, applied to the `World`
//! - `TaskChannel`: Communication channel between the calling thread and one worker
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks and send back results
//! 4. Results are applied on the calling thread in `process_completed_tasks()`
//! 5. Results can spawn new tasks
//! 6. `run_until_idle()` repeats the above until no work is left
//!
//! A manager with zero workers runs every task inline inside `run_until_idle()`.

pub mod task;

use log::{error, info};
use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use task::{Task, TaskResult};

use super::voxels::world::World;

/// A communication channel between the calling thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Tracks number of tasks currently being processed
/// - `_worker`: Handle to the worker thread
///
/// The worker exits once `task_sender` is dropped.
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// # Fields
/// - `channels`: Set of active worker channels
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `current_channel`: Index for round-robin scheduling
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// With one task per worker, queued tasks go to whichever worker frees up first.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with up to `num_workers` worker threads.
    ///
    /// A worker whose thread cannot be spawned is logged and skipped.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        info!(
            "Starting {} chunk workers (available parallelism: {:?})",
            num_workers,
            thread::available_parallelism()
        );

        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            match thread::Builder::new()
                .name(format!("chunk-worker-{index}"))
                .spawn(task_closure)
            {
                Ok(worker) => channels.push(TaskChannel {
                    task_sender: task_tx,
                    result_receiver: result_rx,
                    num_tasks_in_flight: 0,
                    _worker: worker,
                }),
                Err(err) => error!("Failed to spawn chunk worker {}: {}", index, err),
            }
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Number of running workers.
    pub fn worker_count(&self) -> usize {
        self.channels.len()
    }

    /// Returns `true` when nothing is queued or in flight.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty()
            && self
                .channels
                .iter()
                .all(|channel| channel.num_tasks_in_flight == 0)
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// A disconnected worker is removed from the pool and the task is handed back.
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                self.current_channel = (channel_idx + 1) % self.channels.len();
                Ok(())
            }
            Err(task) => {
                self.remove_channel(channel_idx);
                Err(task.0)
            }
        }
    }

    /// Drops a worker whose thread has stopped, along with any tasks it still held.
    fn remove_channel(&mut self, channel_idx: usize) {
        let channel = self.channels.remove(channel_idx);
        error!(
            "A chunk worker stopped with {} task(s) in flight; dropping them ({} workers left)",
            channel.num_tasks_in_flight,
            self.channels.len()
        );
        self.current_channel = match self.channels.len() {
            0 => 0,
            len => self.current_channel % len,
        };
    }

    /// Finds an available worker channel, round-robin from the last used one.
    fn find_available_channel(&self) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }

        let start_channel = self.current_channel;
        let mut current = start_channel;

        loop {
            if self.channels[current].num_tasks_in_flight < MAX_TASKS_IN_FLIGHT {
                return Some(current);
            }
            current = (current + 1) % self.channels.len();
            if current == start_channel {
                return None;
            }
        }
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on an available worker
    /// - `false` if the task was queued because all workers are busy
    pub fn publish_task(&mut self, mut task: Box<dyn Task + Send>) -> bool {
        while let Some(channel_idx) = self.find_available_channel() {
            match self.try_send_task(task, channel_idx) {
                Ok(_) => return true,
                Err(returned) => task = returned,
            }
        }
        self.queued_tasks.push_back(task);
        false
    }

    /// Moves queued tasks to free workers, oldest first.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            if let Err(task) = self.try_send_task(task, channel_idx) {
                self.queued_tasks.push_front(task);
            }
        }
    }

    /// Applies every result that has already arrived, without blocking.
    ///
    /// # Returns
    /// The number of results applied.
    pub fn process_completed_tasks(&mut self, world: &mut World) -> usize {
        let mut tasks_to_queue = Vec::new();
        let mut disconnected = Vec::new();
        let mut handled = 0;
        for (channel_idx, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        tasks_to_queue.extend(result.handle_result(world));
                        handled += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected.push(channel_idx);
                        break;
                    }
                }
            }
        }

        for channel_idx in disconnected.into_iter().rev() {
            self.remove_channel(channel_idx);
        }
        for task in tasks_to_queue {
            self.publish_task(task);
        }
        handled
    }

    /// Blocks until every published task, and every task they spawn, has been
    /// processed and applied to `world`.
    ///
    /// Tasks still queued once every worker has stopped run on the calling thread.
    pub fn run_until_idle(&mut self, world: &mut World) {
        while !self.is_idle() {
            if self.channels.is_empty() {
                self.run_queued_inline(world);
                break;
            }
            self.process_queued_tasks();
            self.wait_for_result(world);
            self.process_completed_tasks(world);
        }
    }

    fn run_queued_inline(&mut self, world: &mut World) {
        while let Some(task) = self.queued_tasks.pop_front() {
            let follow_ups = task.process().handle_result(world);
            self.queued_tasks.extend(follow_ups);
        }
    }

    /// Blocks on the first busy worker until it delivers a result.
    fn wait_for_result(&mut self, world: &mut World) {
        let Some(channel_idx) = self
            .channels
            .iter()
            .position(|channel| channel.num_tasks_in_flight > 0)
        else {
            return;
        };

        match self.channels[channel_idx].result_receiver.recv() {
            Ok(result) => {
                self.channels[channel_idx].num_tasks_in_flight -= 1;
                let follow_ups = result.handle_result(world);
                self.queued_tasks.extend(follow_ups);
            }
            Err(_) => self.remove_channel(channel_idx),
        }
    }
}
