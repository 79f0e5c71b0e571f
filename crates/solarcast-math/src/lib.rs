#![warn(missing_docs)]

//! Math types for the solarcast exposure estimator.
//!
//! Thin wrappers around nalgebra providing the points, vectors and
//! directions used by the mesh, ray tracing and exposure crates, plus a
//! checked normalization that refuses zero-length input.

use nalgebra::{Unit, Vector3};
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Vectors shorter than this cannot be normalized.
pub const DEGENERATE_LENGTH: f64 = 1e-12;

/// Errors raised by vector math.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Normalization of a zero (or numerically zero) vector.
    #[error("cannot normalize degenerate vector ({x}, {y}, {z})")]
    DegenerateVector {
        /// X component.
        x: f64,
        /// Y component.
        y: f64,
        /// Z component.
        z: f64,
    },
}

/// Normalize `v`, failing if its magnitude is below [`DEGENERATE_LENGTH`].
pub fn try_normalize(v: &Vec3) -> Result<Dir3, MathError> {
    Unit::try_new(*v, DEGENERATE_LENGTH).ok_or(MathError::DegenerateVector {
        x: v.x,
        y: v.y,
        z: v.z,
    })
}

/// Unit direction pointing from `from` towards `to`.
pub fn direction_between(from: &Point3, to: &Point3) -> Result<Dir3, MathError> {
    try_normalize(&(to - from))
}
