#![warn(missing_docs)]

//! Ray/triangle occlusion testing for solarcast.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and direction
//! - [`intersect`] - Möller–Trumbore intersection and brute-force occlusion
//! - [`bvh`] - Bounding volume hierarchy for acceleration
//! - [`Occluders`] - An occluder set that answers "is this ray blocked?"
//!
//! # Example
//!
//! ```ignore
//! use solarcast_raytrace::{IntersectTolerance, Occluders, Ray};
//!
//! let occluders = Occluders::accelerated(&triangles);
//! let ray = Ray::toward(sun, &sample)?;
//! let blocked = occluders.occluded(&ray, &IntersectTolerance::default());
//! ```

mod ray;
pub mod bvh;
pub mod intersect;

pub use bvh::TriangleBvh;
pub use intersect::{intersect_triangle, occluded, IntersectTolerance};
pub use ray::Ray;

use solarcast_mesh::Triangle;

/// A set of occluding triangles with its query strategy.
///
/// Both variants answer [`Occluders::occluded`] identically; the BVH only
/// skips triangles whose boxes the ray cannot reach.
#[derive(Debug, Clone)]
pub enum Occluders {
    /// Test every triangle in order.
    BruteForce(Vec<Triangle>),
    /// Test triangles reached through a bounding volume hierarchy.
    Bvh(TriangleBvh),
}

impl Occluders {
    /// Occluders tested by linear scan.
    pub fn brute_force(triangles: &[Triangle]) -> Self {
        Occluders::BruteForce(triangles.to_vec())
    }

    /// Occluders tested through a BVH.
    pub fn accelerated(triangles: &[Triangle]) -> Self {
        Occluders::Bvh(TriangleBvh::build(triangles))
    }

    /// Number of occluding triangles.
    pub fn len(&self) -> usize {
        match self {
            Occluders::BruteForce(tris) => tris.len(),
            Occluders::Bvh(bvh) => bvh.len(),
        }
    }

    /// True if nothing can occlude.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if any triangle is struck ahead of the ray origin.
    pub fn occluded(&self, ray: &Ray, tol: &IntersectTolerance) -> bool {
        match self {
            Occluders::BruteForce(tris) => occluded(ray, tris, tol),
            Occluders::Bvh(bvh) => bvh.occluded(ray, tol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarcast_math::{Point3, Vec3};

    #[test]
    fn test_strategies_agree() {
        let panel = Triangle::new(
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(0.0, 10.0, 10.0),
        );
        let tol = IntersectTolerance::default();
        let brute = Occluders::brute_force(&[panel]);
        let bvh = Occluders::accelerated(&[panel]);
        assert_eq!(brute.len(), 1);
        assert_eq!(bvh.len(), 1);

        let down = Vec3::new(0.0, 0.0, -1.0);
        for (x, y, expected) in [(2.0, 2.0, true), (9.0, 9.0, false), (-1.0, 5.0, false)] {
            let ray = Ray::new(Point3::new(x, y, 50.0), down);
            assert_eq!(brute.occluded(&ray, &tol), expected);
            assert_eq!(bvh.occluded(&ray, &tol), expected);
        }
    }

    #[test]
    fn test_empty_occluders() {
        let occluders = Occluders::accelerated(&[]);
        assert!(occluders.is_empty());
        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        assert!(!occluders.occluded(&ray, &IntersectTolerance::default()));
    }
}
