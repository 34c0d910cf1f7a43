//! # Voxel World
//!
//! This module contains everything that turns coordinates into chunks and keeps
//! the right chunks loaded.
//!
//! ## Architecture
//!
//! * **Block**: Block types, faces and the compact per-cell storage
//! * **Chunk**: Chunk coordinates, dimensions, the voxel grid and the chunk itself
//! * **Terrain**: Layered noise terrain, caves and grass
//! * **World**: The set of loaded chunks, unique per coordinate
//! * **Streaming**: Chooses which chunks should be loaded for a viewer
//! * **Tasks**: Off-thread chunk generation
//!
//! ## Data Flow
//!
//! 1. Streaming compares the viewer's target set with the loaded set
//! 2. The world destroys chunks that fell out of the target set
//! 3. New chunks are generated, meshed, then inserted into the world
//! 4. The host reads each chunk's meshes and world position for rendering

pub mod block;
pub mod chunk;
pub mod streaming;
pub mod tasks;
pub mod terrain;
pub mod world;
