//! Möller–Trumbore ray/triangle intersection and brute-force occlusion.

use serde::{Deserialize, Serialize};
use solarcast_mesh::Triangle;

use crate::Ray;

/// Tolerances that separate real hits from floating-point noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectTolerance {
    /// Determinants with magnitude below this are treated as parallel (miss).
    pub parallel: f64,
    /// Hits must lie strictly further than this along the ray.
    pub distance: f64,
}

impl Default for IntersectTolerance {
    fn default() -> Self {
        Self {
            parallel: 1e-5,
            distance: 1e-5,
        }
    }
}

/// Intersect a ray with one triangle.
///
/// Returns the ray parameter `t` of the hit. Near-parallel rays and hits at
/// or behind `tol.distance` are misses.
#[inline]
pub fn intersect_triangle(ray: &Ray, tri: &Triangle, tol: &IntersectTolerance) -> Option<f64> {
    let e1 = tri.b - tri.a;
    let e2 = tri.c - tri.a;

    let h = ray.direction.cross(&e2);
    let det = e1.dot(&h);
    if det.abs() < tol.parallel {
        return None;
    }

    let f = 1.0 / det;
    let s = ray.origin - tri.a;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&e1);
    let v = f * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(&q);
    (t > tol.distance).then_some(t)
}

/// True if any triangle is struck ahead of the ray origin.
///
/// Stops at the first hit; the nearest hit is never computed.
pub fn occluded(ray: &Ray, triangles: &[Triangle], tol: &IntersectTolerance) -> bool {
    triangles
        .iter()
        .any(|tri| intersect_triangle(ray, tri, tol).is_some())
}
