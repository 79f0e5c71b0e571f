//! Error types for mesh handling.

use thiserror::Error;

/// Malformed vertex or face buffers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Vertex buffer length is not a multiple of 3.
    #[error("mesh {mesh}: vertex buffer length {len} is not a multiple of 3")]
    VertexBufferLength {
        /// Position of the mesh in its input sequence.
        mesh: usize,
        /// Offending length.
        len: usize,
    },

    /// Face index buffer length is not a multiple of 3.
    #[error("mesh {mesh}: face buffer length {len} is not a multiple of 3")]
    FaceBufferLength {
        /// Position of the mesh in its input sequence.
        mesh: usize,
        /// Offending length.
        len: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("mesh {mesh}: face index {index} out of bounds ({vertex_count} vertices)")]
    IndexOutOfBounds {
        /// Position of the mesh in its input sequence.
        mesh: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
