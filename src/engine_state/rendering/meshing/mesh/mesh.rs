//! Mesh data structures handed to the renderer.
//!
//! A chunk produces one [`MeshBuffers`] per block type. Buffers are plain vectors
//! of vertex positions, triangle indices and UVs; indices are local to the
//! buffer they live in, so each block type can be uploaded and drawn with its
//! own material independently.

use crate::engine_state::voxels::{
    block::{block_type::BlockType, Block},
    chunk::VoxelGrid,
};

use super::{culled, face::Face};

/// Vertex, index and UV data for every visible face of one block type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Corner positions in chunk-local block coordinates
    pub vertices: Vec<[f32; 3]>,
    /// Three indices per triangle, into `vertices`
    pub triangle_indices: Vec<u32>,
    /// One texture coordinate per vertex
    pub uv_coordinates: Vec<[f32; 2]>,
}

impl MeshBuffers {
    /// Appends a face: four vertices, four UVs and two triangles.
    pub fn push_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.uv_coordinates
            .extend_from_slice(Block::get_uvs(face.block_type));
        self.triangle_indices
            .extend(face.local_indices().iter().map(|index| base + index));
    }

    /// Number of quads in the buffers.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw bytes of the vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw bytes of the index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangle_indices)
    }

    /// Raw bytes of the UV buffer.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uv_coordinates)
    }
}

/// The meshes of one chunk, indexed by block type.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMeshes {
    meshes: [MeshBuffers; BlockType::COUNT],
}

impl Default for ChunkMeshes {
    fn default() -> Self {
        ChunkMeshes {
            meshes: std::array::from_fn(|_| MeshBuffers::default()),
        }
    }
}

impl ChunkMeshes {
    /// Builds the face-culled meshes of a grid.
    pub fn extract(grid: &VoxelGrid) -> Self {
        culled::extract(grid)
    }

    /// Routes a face into the buffers of its block type.
    pub fn push_face(&mut self, face: &Face) {
        self.meshes[face.block_type.index()].push_face(face);
    }

    /// The buffers for `block_type`, if any face of that type is visible.
    pub fn get(&self, block_type: BlockType) -> Option<&MeshBuffers> {
        let mesh = &self.meshes[block_type.index()];
        (!mesh.is_empty()).then_some(mesh)
    }

    /// Iterates the non-empty meshes in block type order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockType, &MeshBuffers)> {
        BlockType::ALL
            .into_iter()
            .zip(self.meshes.iter())
            .filter(|(_, mesh)| !mesh.is_empty())
    }

    /// Total number of faces across all block types.
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(MeshBuffers::face_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(MeshBuffers::is_empty)
    }
}
