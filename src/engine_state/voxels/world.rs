//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk.
//! It is the single authority on chunk identity: at most one chunk exists per
//! coordinate, and a chunk only becomes visible once its terrain and meshes are
//! complete.
//!
//! ## Architecture
//!
//! The world uses sparse storage: a hash map from chunk coordinate to chunk.
//! Which coordinates are loaded is decided elsewhere (see
//! [`streaming`](super::streaming)); the world only carries out the creations and
//! destructions it is told to perform.
//!
//! ## Chunk Generation
//!
//! [`World::create`] generates a chunk synchronously with the world's
//! [`TerrainGenerator`]. Chunks built on worker threads are handed over finished
//! through [`World::insert_generated`], which applies the same uniqueness rule.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use cgmath::Point3;
use log::debug;

use crate::engine_state::voxels::{
    chunk::{Chunk, ChunkCoordinate, ChunkDimensions},
    terrain::TerrainGenerator,
};

/// The set of loaded chunks, keyed by coordinate.
#[derive(Debug)]
pub struct World {
    chunks: HashMap<ChunkCoordinate, Chunk>,
    generator: Arc<TerrainGenerator>,
}

impl World {
    /// Creates a new, empty world that generates chunks with `generator`.
    pub fn new(generator: Arc<TerrainGenerator>) -> Self {
        World {
            chunks: HashMap::new(),
            generator,
        }
    }

    /// The generator used for synchronous creation, shared with worker tasks.
    pub fn generator(&self) -> &Arc<TerrainGenerator> {
        &self.generator
    }

    /// Extents of every chunk in this world.
    pub fn dimensions(&self) -> ChunkDimensions {
        self.generator.dimensions()
    }

    /// Generates, meshes and stores the chunk at `coordinate`.
    ///
    /// Returns the new chunk, or `None` if a chunk was already loaded there, in
    /// which case nothing changes.
    pub fn create(&mut self, coordinate: ChunkCoordinate) -> Option<&Chunk> {
        match self.chunks.entry(coordinate) {
            Entry::Occupied(_) => {
                debug!("Chunk {} is already loaded; skipping create", coordinate);
                None
            }
            Entry::Vacant(entry) => {
                let chunk = Chunk::generate(coordinate, &self.generator);
                debug!(
                    "Created chunk {} with {} faces",
                    coordinate,
                    chunk.meshes().face_count()
                );
                Some(entry.insert(chunk))
            }
        }
    }

    /// Stores a chunk that was generated elsewhere.
    ///
    /// Returns `false` and drops `chunk` if its coordinate is already loaded.
    pub fn insert_generated(&mut self, chunk: Chunk) -> bool {
        match self.chunks.entry(chunk.position) {
            Entry::Occupied(_) => {
                debug!(
                    "Chunk {} is already loaded; dropping generated copy",
                    chunk.position
                );
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(chunk);
                true
            }
        }
    }

    /// Unloads the chunk at `coordinate`, releasing its grid and meshes.
    ///
    /// Returns `false` if nothing was loaded there.
    pub fn destroy(&mut self, coordinate: ChunkCoordinate) -> bool {
        let removed = self.chunks.remove(&coordinate).is_some();
        if removed {
            debug!("Destroyed chunk {}", coordinate);
        }
        removed
    }

    pub fn get(&self, coordinate: ChunkCoordinate) -> Option<&Chunk> {
        self.chunks.get(&coordinate)
    }

    pub fn contains(&self, coordinate: ChunkCoordinate) -> bool {
        self.chunks.contains_key(&coordinate)
    }

    /// Returns `true` if every coordinate in `coordinates` is loaded.
    pub fn contains_all<I>(&self, coordinates: I) -> bool
    where
        I: IntoIterator<Item = ChunkCoordinate>,
    {
        coordinates
            .into_iter()
            .all(|coordinate| self.contains(coordinate))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The loaded coordinates, in no particular order.
    pub fn coordinates(&self) -> impl Iterator<Item = ChunkCoordinate> + '_ {
        self.chunks.keys().copied()
    }

    /// The loaded chunks, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    /// Where the host should place the chunk at `coordinate`.
    pub fn world_position(&self, coordinate: ChunkCoordinate) -> Point3<f32> {
        coordinate.world_position(&self.dimensions())
    }
}
