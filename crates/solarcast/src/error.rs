//! Error types for exposure estimation.

use solarcast_math::MathError;
use solarcast_mesh::MeshError;
use thiserror::Error;

use crate::MeshRole;

/// Errors that can occur while computing an exposure grid.
#[derive(Error, Debug)]
pub enum ExposureError {
    /// A ray direction could not be normalized.
    #[error(transparent)]
    DegenerateVector(#[from] MathError),

    /// A vertex or face buffer is malformed.
    #[error("malformed {role} mesh: {source}")]
    MalformedMesh {
        /// Which input the mesh came from.
        role: MeshRole,
        /// Underlying buffer error.
        #[source]
        source: MeshError,
    },

    /// The base surface has no vertices.
    #[error("base geometry is empty")]
    EmptyGeometry,

    /// The base extent produces no samples along at least one axis.
    #[error("sample extent has zero area ({columns}x{rows} samples)")]
    ZeroExtent {
        /// Samples along x.
        columns: usize,
        /// Samples along y.
        rows: usize,
    },

    /// The generated sample grid does not match the declared output grid.
    #[error("sample grid is {columns}x{rows} but output grid is declared as {width}x{height}")]
    GridMismatch {
        /// Samples along x.
        columns: usize,
        /// Samples along y.
        rows: usize,
        /// Declared grid width.
        width: usize,
        /// Declared grid height.
        height: usize,
    },

    /// Counter buffer does not fill the output grid.
    #[error("expected {expected} exposure counters, got {actual}")]
    CellCount {
        /// `width * height`.
        expected: usize,
        /// Counters supplied.
        actual: usize,
    },

    /// Invalid settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl ExposureError {
    pub(crate) fn mesh(role: MeshRole) -> impl FnOnce(MeshError) -> Self {
        move |source| ExposureError::MalformedMesh { role, source }
    }
}

/// Result type for exposure operations.
pub type Result<T> = std::result::Result<T, ExposureError>;
