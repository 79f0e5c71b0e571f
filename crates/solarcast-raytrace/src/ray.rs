//! Ray representation and ray-box tests.

use solarcast_math::{direction_between, MathError, Point3, Vec3};
use solarcast_mesh::Aabb3;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is stored as given; intersection distances are measured
/// along it, so they are Euclidean only when it has unit length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
    /// Componentwise reciprocal of `direction`, for slab tests.
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.map(|d| 1.0 / d),
        }
    }

    /// Ray from `origin` with unit direction towards `target`.
    ///
    /// Fails when the two points coincide.
    pub fn toward(origin: Point3, target: &Point3) -> Result<Self, MathError> {
        let dir = direction_between(&origin, target)?;
        Ok(Self::new(origin, dir.into_inner()))
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Parameter interval `(enter, exit)` over which the ray is inside
    /// `aabb`, clipped to `t >= 0`; `None` if it never enters.
    ///
    /// A zero direction component against a slab the origin lies on yields
    /// NaN, which `f64::max`/`min` discard, so the test errs towards a hit.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let mut enter = f64::NEG_INFINITY;
        let mut exit = f64::INFINITY;

        for axis in 0..3 {
            let inv = self.inv_direction[axis];
            let t_lo = (aabb.min[axis] - self.origin[axis]) * inv;
            let t_hi = (aabb.max[axis] - self.origin[axis]) * inv;
            let (near, far) = if inv < 0.0 { (t_hi, t_lo) } else { (t_lo, t_hi) };
            enter = enter.max(near);
            exit = exit.min(far);
        }

        (exit >= enter && exit >= 0.0).then_some((enter.max(0.0), exit))
    }
}
