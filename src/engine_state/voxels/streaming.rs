//! # Chunk Streaming
//!
//! Decides which chunks should be loaded for a viewer. Each update:
//!
//! 1. The viewer's chunk is found by rounding its position to the chunk grid.
//! 2. Every coordinate in a square window of radius `ceil(sqrt(capacity))` around
//!    it is a candidate (x outer, z inner).
//! 3. Candidates whose full-height column box misses the view frustum are dropped.
//! 4. The rest are ranked by `1 / (distance + 1)` from the viewer to the column
//!    center, highest first, ties keeping enumeration order.
//! 5. The first `capacity` of them are the target set.
//!
//! The result is a [`StreamingPlan`]: what to load (in priority order) and what to
//! unload. Applying it is left to the caller; this module never touches chunks.

use std::collections::{BTreeSet, HashSet};

use cgmath::{MetricSpace, Point3};
use log::debug;

use crate::engine_state::camera_state::ViewerState;

use super::chunk::{ChunkCoordinate, ChunkDimensions};

/// The changes needed to move the loaded set to the target set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingPlan {
    /// Target coordinates not yet loaded, highest priority first.
    pub to_load: Vec<ChunkCoordinate>,
    /// Loaded coordinates outside the target set, in coordinate order.
    pub to_unload: Vec<ChunkCoordinate>,
}

impl StreamingPlan {
    pub fn is_empty(&self) -> bool {
        self.to_load.is_empty() && self.to_unload.is_empty()
    }
}

/// Computes streaming plans under a fixed capacity.
#[derive(Debug, Clone)]
pub struct StreamingManager {
    capacity: usize,
    dimensions: ChunkDimensions,
}

impl StreamingManager {
    pub fn new(capacity: usize, dimensions: ChunkDimensions) -> Self {
        Self {
            capacity,
            dimensions,
        }
    }

    /// The most chunks a plan will ever leave loaded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Side length of the bootstrap block and radius of the candidate window.
    pub fn load_radius(&self) -> i32 {
        (self.capacity as f64).sqrt().ceil() as i32
    }

    /// The plan used before any viewer is known: a square block of chunks
    /// starting at the origin, cut down to `capacity`.
    pub fn bootstrap_plan<I>(&self, loaded: I) -> StreamingPlan
    where
        I: IntoIterator<Item = ChunkCoordinate>,
    {
        let size = self.load_radius();
        let target: Vec<ChunkCoordinate> = (0..size)
            .flat_map(|x| (0..size).map(move |z| ChunkCoordinate::new(x, z)))
            .take(self.capacity)
            .collect();
        let plan = diff(&target, loaded);
        debug!(
            "Bootstrap plan: {} to load, {} to unload",
            plan.to_load.len(),
            plan.to_unload.len()
        );
        plan
    }

    /// Plans the transition from `loaded` to the target set for `viewer`.
    pub fn plan<I>(&self, viewer: &ViewerState, loaded: I) -> StreamingPlan
    where
        I: IntoIterator<Item = ChunkCoordinate>,
    {
        let target = self.target_set(viewer);
        let plan = diff(&target, loaded);
        debug!(
            "Streaming plan around {:?}: {} targeted, {} to load, {} to unload",
            viewer.position,
            target.len(),
            plan.to_load.len(),
            plan.to_unload.len()
        );
        plan
    }

    /// The coordinates that should be loaded for `viewer`, highest priority first.
    pub fn target_set(&self, viewer: &ViewerState) -> Vec<ChunkCoordinate> {
        let candidates = self.visible_candidates(viewer);
        self.rank_candidates(viewer.position, candidates)
            .into_iter()
            .take(self.capacity)
            .map(|(coordinate, _)| coordinate)
            .collect()
    }

    /// Window coordinates around the viewer whose column intersects its frustum,
    /// in enumeration order.
    pub fn visible_candidates(&self, viewer: &ViewerState) -> Vec<ChunkCoordinate> {
        let center = ChunkCoordinate::from_world_position(viewer.position, &self.dimensions);
        let radius = self.load_radius();
        // Far-away viewers clamp to the edge of the chunk grid.
        let xs = center.x.saturating_sub(radius)..=center.x.saturating_add(radius);
        let zs = center.z.saturating_sub(radius)..=center.z.saturating_add(radius);

        xs.flat_map(|x| zs.clone().map(move |z| ChunkCoordinate::new(x, z)))
            .filter(|coordinate| {
                viewer
                    .frustum
                    .intersects_aabb(&coordinate.bounding_box(&self.dimensions))
            })
            .collect()
    }

    /// Scores each candidate and sorts by descending priority.
    ///
    /// The sort is stable, so equally distant chunks keep their input order.
    pub fn rank_candidates(
        &self,
        viewer_position: Point3<f32>,
        candidates: Vec<ChunkCoordinate>,
    ) -> Vec<(ChunkCoordinate, f32)> {
        let mut ranked: Vec<(ChunkCoordinate, f32)> = candidates
            .into_iter()
            .map(|coordinate| (coordinate, self.priority(viewer_position, coordinate)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// `1 / (distance + 1)` from the viewer to the center of the chunk's column.
    pub fn priority(&self, viewer_position: Point3<f32>, coordinate: ChunkCoordinate) -> f32 {
        let distance = viewer_position.distance(coordinate.center(&self.dimensions));
        1.0 / (distance + 1.0)
    }
}

/// Splits the difference between a target list and the loaded set.
fn diff<I>(target: &[ChunkCoordinate], loaded: I) -> StreamingPlan
where
    I: IntoIterator<Item = ChunkCoordinate>,
{
    let loaded: BTreeSet<ChunkCoordinate> = loaded.into_iter().collect();
    let targeted: HashSet<ChunkCoordinate> = target.iter().copied().collect();

    StreamingPlan {
        to_load: target
            .iter()
            .copied()
            .filter(|coordinate| !loaded.contains(coordinate))
            .collect(),
        to_unload: loaded
            .into_iter()
            .filter(|coordinate| !targeted.contains(coordinate))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{perspective, Deg, Matrix4, Vector3};

    use super::*;
    use crate::engine_state::camera_state::frustum::{Frustum, Plane};

    fn frustum_with(distance: f32) -> Frustum {
        Frustum::new([Plane::new(Vector3::new(0.0, 1.0, 0.0), distance); 6])
    }

    fn sees_everything(position: Point3<f32>) -> ViewerState {
        ViewerState {
            position,
            frustum: frustum_with(1.0e9),
        }
    }

    fn coordinates(pairs: &[(i32, i32)]) -> Vec<ChunkCoordinate> {
        pairs.iter().copied().map(ChunkCoordinate::from).collect()
    }

    #[test]
    fn nearer_chunks_rank_first() {
        let manager = StreamingManager::new(4, ChunkDimensions::new(1, 1, 1));
        let viewer = Point3::new(0.5, 0.5, 0.5);
        let ranked = manager.rank_candidates(viewer, coordinates(&[(0, 10), (5, 0), (1, 0)]));

        let order: Vec<ChunkCoordinate> = ranked.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, coordinates(&[(1, 0), (5, 0), (0, 10)]));
        assert!((ranked[0].1 - 0.5).abs() < 1e-6);
        assert!((ranked[2].1 - 1.0 / 11.0).abs() < 1e-6);
    }

    #[test]
    fn equal_priorities_keep_enumeration_order() {
        let manager = StreamingManager::new(4, ChunkDimensions::new(1, 1, 1));
        let viewer = Point3::new(0.5, 0.5, 0.5);
        let input = coordinates(&[(1, 0), (0, -1), (-1, 0), (0, 1)]);
        let ranked = manager.rank_candidates(viewer, input.clone());
        let order: Vec<ChunkCoordinate> = ranked.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, input);
    }

    #[test]
    fn target_is_capped_and_starts_at_the_viewer() {
        let manager = StreamingManager::new(9, ChunkDimensions::default());
        let viewer = sees_everything(Point3::new(16.0, 64.0, 16.0));

        assert_eq!(manager.visible_candidates(&viewer).len(), 49);
        let plan = manager.plan(&viewer, std::iter::empty());
        assert_eq!(plan.to_load.len(), 9);
        assert_eq!(plan.to_load[0], ChunkCoordinate::new(0, 0));
        assert!(plan.to_unload.is_empty());
        assert!(plan
            .to_load
            .iter()
            .all(|c| c.x.abs() <= 1 && c.z.abs() <= 1));
    }

    #[test]
    fn chunks_outside_the_target_are_unloaded() {
        let manager = StreamingManager::new(9, ChunkDimensions::default());
        let viewer = sees_everything(Point3::new(16.0, 64.0, 16.0));
        let loaded = coordinates(&[(100, 100), (0, 0), (-50, 2)]);

        let plan = manager.plan(&viewer, loaded);
        assert_eq!(plan.to_unload, coordinates(&[(-50, 2), (100, 100)]));
        assert_eq!(plan.to_load.len(), 8);
        assert!(!plan.to_load.contains(&ChunkCoordinate::new(0, 0)));
    }

    #[test]
    fn a_settled_world_needs_no_changes() {
        let manager = StreamingManager::new(4, ChunkDimensions::default());
        let viewer = sees_everything(Point3::new(100.0, 64.0, -30.0));
        let target = manager.target_set(&viewer);
        assert!(manager.plan(&viewer, target).is_empty());
    }

    #[test]
    fn frustum_rejects_chunks_behind_the_viewer() {
        let manager = StreamingManager::new(9, ChunkDimensions::default());
        let position = Point3::new(16.0, 64.0, 16.0);
        let view = Matrix4::look_to_rh(position, Vector3::new(1.0, 0.0, 0.0), Vector3::unit_y());
        let projection = perspective(Deg(60.0f32), 1.0, 0.1, 1000.0);
        let viewer = ViewerState {
            position,
            frustum: Frustum::from_matrix(projection * view),
        };

        let plan = manager.plan(&viewer, std::iter::empty());
        assert!(!plan.to_load.is_empty());
        assert!(plan.to_load.len() <= 9);
        assert!(plan.to_load.iter().all(|c| c.x >= 0));
    }

    #[test]
    fn degenerate_frustum_unloads_everything() {
        let manager = StreamingManager::new(9, ChunkDimensions::default());
        let viewer = ViewerState {
            position: Point3::new(0.0, 0.0, 0.0),
            frustum: frustum_with(-1.0e6),
        };
        let plan = manager.plan(&viewer, coordinates(&[(0, 0), (1, 1)]));
        assert!(plan.to_load.is_empty());
        assert_eq!(plan.to_unload, coordinates(&[(0, 0), (1, 1)]));
    }

    #[test]
    fn zero_capacity_targets_nothing() {
        let manager = StreamingManager::new(0, ChunkDimensions::default());
        let viewer = sees_everything(Point3::new(0.0, 0.0, 0.0));
        assert!(manager.target_set(&viewer).is_empty());
        assert!(manager.bootstrap_plan(std::iter::empty()).is_empty());
    }

    #[test]
    fn viewers_beyond_the_chunk_grid_clamp_to_its_edge() {
        let manager = StreamingManager::new(9, ChunkDimensions::default());

        let viewer = sees_everything(Point3::new(1.0e11, 64.0, 0.0));
        assert_eq!(manager.visible_candidates(&viewer).len(), 4 * 7);
        let plan = manager.plan(&viewer, std::iter::empty());
        assert_eq!(plan.to_load.len(), 9);
        assert!(plan.to_load.iter().all(|c| c.x >= i32::MAX - 3));

        let viewer = sees_everything(Point3::new(-1.0e11, 64.0, -1.0e11));
        assert_eq!(manager.visible_candidates(&viewer).len(), 4 * 4);
        let plan = manager.plan(&viewer, std::iter::empty());
        assert_eq!(plan.to_load.len(), 9);
        assert!(plan
            .to_load
            .iter()
            .all(|c| c.x <= i32::MIN + 3 && c.z <= i32::MIN + 3));
    }

    #[test]
    fn bootstrap_fills_a_block_from_the_origin() {
        let manager = StreamingManager::new(9, ChunkDimensions::default());
        let plan = manager.bootstrap_plan(std::iter::empty());
        assert_eq!(
            plan.to_load,
            coordinates(&[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ])
        );
    }

    #[test]
    fn bootstrap_is_truncated_to_capacity() {
        let manager = StreamingManager::new(5, ChunkDimensions::default());
        let plan = manager.bootstrap_plan(std::iter::empty());
        assert_eq!(manager.load_radius(), 3);
        assert_eq!(plan.to_load, coordinates(&[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)]));
    }
}
