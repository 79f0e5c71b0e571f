//! Axis-aligned bounding boxes over vertex buffers.

use solarcast_math::{Point3, Vec3};

use crate::error::{MeshError, Result};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Box spanning `min` to `max`.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// The reserved empty box: `min = +inf`, `max = -inf`, so including
    /// any point collapses it onto that point.
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vec3::repeat(f64::INFINITY)),
            max: Point3::from(Vec3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// True for the reserved empty box (no point has been included).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to contain `p`.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grow the box to contain `other`. Empty boxes leave it unchanged.
    pub fn include_aabb(&mut self, other: &Aabb3) {
        if !other.is_empty() {
            self.min = self.min.inf(&other.min);
            self.max = self.max.sup(&other.max);
        }
    }

    /// Pad every face outward by `margin`.
    pub fn expand(&mut self, margin: f64) {
        let pad = Vec3::repeat(margin);
        self.min -= pad;
        self.max += pad;
    }

    /// Surface area of the box, zero when empty.
    pub fn surface_area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.max - self.min;
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }
}

/// Compute the bounding box of a flat `[x0, y0, z0, x1, ...]` vertex buffer.
///
/// An empty buffer yields [`Aabb3::empty`]; callers must check
/// [`Aabb3::is_empty`] before deriving anything from the result.
pub fn bounding_box(vertices: &[f64]) -> Result<Aabb3> {
    if vertices.len() % 3 != 0 {
        return Err(MeshError::VertexBufferLength {
            mesh: 0,
            len: vertices.len(),
        });
    }

    let mut aabb = Aabb3::empty();
    for v in vertices.chunks_exact(3) {
        aabb.include_point(&Point3::new(v[0], v[1], v[2]));
    }
    Ok(aabb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point() {
        let aabb = bounding_box(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(aabb.min, Point3::new(5.0, 5.0, 5.0));
        assert_eq!(aabb.max, Point3::new(5.0, 5.0, 5.0));
        assert!(!aabb.is_empty());
    }

    #[test]
    fn test_square() {
        let verts = [
            0.0, 0.0, 1.0, //
            20.0, 0.0, 1.0, //
            20.0, 30.0, 2.0, //
            -4.5, 30.0, 1.5,
        ];
        let aabb = bounding_box(&verts).unwrap();
        assert_eq!(aabb.min, Point3::new(-4.5, 0.0, 1.0));
        assert_eq!(aabb.max, Point3::new(20.0, 30.0, 2.0));
    }

    #[test]
    fn test_empty_buffer() {
        let aabb = bounding_box(&[]).unwrap();
        assert!(aabb.is_empty());
        assert_eq!(aabb.surface_area(), 0.0);
    }

    #[test]
    fn test_bad_length() {
        let err = bounding_box(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, MeshError::VertexBufferLength { mesh: 0, len: 2 });
    }

    #[test]
    fn test_include_aabb_and_expand() {
        let mut a = Aabb3::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        a.include_aabb(&Aabb3::empty());
        assert_eq!(a.max, Point3::new(1.0, 1.0, 1.0));

        a.include_aabb(&Aabb3::new(
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(3.0, 3.0, 3.0),
        ));
        assert_eq!(a.max, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(a.min, Point3::origin());

        a.expand(0.5);
        assert_eq!(a.min, Point3::new(-0.5, -0.5, -0.5));
        assert!((a.surface_area() - 96.0).abs() < 1e-12);
    }
}
