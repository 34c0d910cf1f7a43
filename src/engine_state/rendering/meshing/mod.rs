//! Mesh extraction for chunks.
//!
//! The renderer itself lives outside this crate. What it receives per chunk is a
//! set of plain buffers per block type (see [`mesh`]), which it pairs with the
//! material for that block type and places at the chunk's world position.

pub mod mesh;

pub use mesh::{ChunkMeshes, Face, MeshBuffers};
