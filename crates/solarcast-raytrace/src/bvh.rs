//! Bounding Volume Hierarchy over a triangle soup.
//!
//! Uses binned Surface Area Heuristic (SAH) construction. Queries return
//! exactly what a brute-force scan over every triangle returns: node boxes
//! are padded so the slab test never rejects a box containing a hit.

use solarcast_math::Point3;
use solarcast_mesh::{Aabb3, Triangle};

use crate::intersect::{intersect_triangle, IntersectTolerance};
use crate::Ray;

/// Padding added to every node box, relative to the scene extent.
const BOX_PADDING: f64 = 1e-7;

/// Maximum number of triangles in a leaf.
const LEAF_SIZE: usize = 4;

/// A BVH node - either a leaf containing triangles or an internal node with children.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Leaf node containing triangle indices.
    Leaf {
        /// Axis-aligned bounding box of this node.
        aabb: Aabb3,
        /// Indices into the triangle array.
        triangles: Vec<usize>,
    },
    /// Internal node with two children.
    Internal {
        /// Axis-aligned bounding box of this node.
        aabb: Aabb3,
        /// Left child node.
        left: Box<BvhNode>,
        /// Right child node.
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Bounding box of this node.
    pub fn aabb(&self) -> &Aabb3 {
        match self {
            BvhNode::Leaf { aabb, .. } => aabb,
            BvhNode::Internal { aabb, .. } => aabb,
        }
    }
}

/// Bounding Volume Hierarchy for accelerated occlusion queries.
#[derive(Debug, Clone)]
pub struct TriangleBvh {
    root: Option<BvhNode>,
    triangles: Vec<Triangle>,
}

/// Per-triangle build record: (index, bounds, centroid).
type BuildEntry = (usize, Aabb3, Point3);

impl TriangleBvh {
    /// Build a BVH over `triangles` using SAH construction.
    pub fn build(triangles: &[Triangle]) -> Self {
        let mut scene = Aabb3::empty();
        let mut entries: Vec<BuildEntry> = triangles
            .iter()
            .enumerate()
            .map(|(i, tri)| {
                let aabb = tri.aabb();
                scene.include_aabb(&aabb);
                (i, aabb, tri.centroid())
            })
            .collect();

        let root = if entries.is_empty() {
            None
        } else {
            let extent = (scene.max - scene.min).amax().max(1.0);
            Some(build_node(&mut entries, BOX_PADDING * extent))
        };

        Self {
            root,
            triangles: triangles.to_vec(),
        }
    }

    /// Number of triangles indexed.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if the BVH indexes no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get a reference to the root node, if any.
    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_ref()
    }

    /// True if any triangle is struck ahead of the ray origin.
    pub fn occluded(&self, ray: &Ray, tol: &IntersectTolerance) -> bool {
        match self.root {
            Some(ref root) => self.occluded_node(ray, root, tol),
            None => false,
        }
    }

    fn occluded_node(&self, ray: &Ray, node: &BvhNode, tol: &IntersectTolerance) -> bool {
        if ray.intersect_aabb(node.aabb()).is_none() {
            return false;
        }
        match node {
            BvhNode::Leaf { triangles, .. } => triangles
                .iter()
                .any(|&i| intersect_triangle(ray, &self.triangles[i], tol).is_some()),
            BvhNode::Internal { left, right, .. } => {
                self.occluded_node(ray, left, tol) || self.occluded_node(ray, right, tol)
            }
        }
    }
}

/// Build a BVH node recursively using SAH.
fn build_node(entries: &mut [BuildEntry], padding: f64) -> BvhNode {
    let mut bounds = Aabb3::empty();
    for (_, aabb, _) in entries.iter() {
        bounds.include_aabb(aabb);
    }

    if entries.len() <= LEAF_SIZE {
        bounds.expand(padding);
        return BvhNode::Leaf {
            aabb: bounds,
            triangles: entries.iter().map(|(i, _, _)| *i).collect(),
        };
    }

    let mid = match find_best_split(entries, &bounds) {
        Some((axis, pos)) => partition(entries, axis, pos),
        None => 0,
    };

    // Fallback if partition fails
    let mid = if mid == 0 || mid == entries.len() {
        entries.len() / 2
    } else {
        mid
    };

    let (left, right) = entries.split_at_mut(mid);
    bounds.expand(padding);
    BvhNode::Internal {
        aabb: bounds,
        left: Box::new(build_node(left, padding)),
        right: Box::new(build_node(right, padding)),
    }
}

fn axis_value(p: &Point3, axis: usize) -> f64 {
    match axis {
        0 => p.x,
        1 => p.y,
        _ => p.z,
    }
}

/// Find the best split axis and position using SAH.
fn find_best_split(entries: &[BuildEntry], bounds: &Aabb3) -> Option<(usize, f64)> {
    const NUM_BUCKETS: usize = 12;

    let total_area = bounds.surface_area();
    let mut best: Option<(f64, usize, f64)> = None;

    for axis in 0..3 {
        let axis_min = axis_value(&bounds.min, axis);
        let axis_extent = axis_value(&bounds.max, axis) - axis_min;
        if axis_extent < 1e-10 {
            continue;
        }

        let mut bucket_counts = [0usize; NUM_BUCKETS];
        let mut bucket_bounds = [Aabb3::empty(); NUM_BUCKETS];

        for (_, aabb, centroid) in entries {
            let c = axis_value(centroid, axis);
            let b = ((c - axis_min) / axis_extent * NUM_BUCKETS as f64) as usize;
            let b = b.min(NUM_BUCKETS - 1);
            bucket_counts[b] += 1;
            bucket_bounds[b].include_aabb(aabb);
        }

        for split in 1..NUM_BUCKETS {
            let mut left_count = 0;
            let mut left_bounds = Aabb3::empty();
            for i in 0..split {
                left_count += bucket_counts[i];
                left_bounds.include_aabb(&bucket_bounds[i]);
            }

            let mut right_count = 0;
            let mut right_bounds = Aabb3::empty();
            for i in split..NUM_BUCKETS {
                right_count += bucket_counts[i];
                right_bounds.include_aabb(&bucket_bounds[i]);
            }

            if left_count == 0 || right_count == 0 {
                continue;
            }

            // Flat scenes have zero area; fall back to counts alone.
            let (pl, pr) = if total_area > 0.0 {
                (
                    left_bounds.surface_area() / total_area,
                    right_bounds.surface_area() / total_area,
                )
            } else {
                (1.0, 1.0)
            };
            let cost = 0.125 + pl * left_count as f64 + pr * right_count as f64;

            if best.map_or(true, |(c, _, _)| cost < c) {
                let pos = axis_min + (split as f64 / NUM_BUCKETS as f64) * axis_extent;
                best = Some((cost, axis, pos));
            }
        }
    }

    best.map(|(_, axis, pos)| (axis, pos))
}

/// Partition entries by centroid along an axis.
fn partition(entries: &mut [BuildEntry], axis: usize, pos: f64) -> usize {
    let mut left = 0;
    let mut right = entries.len();

    while left < right {
        if axis_value(&entries[left].2, axis) < pos {
            left += 1;
        } else {
            right -= 1;
            entries.swap(left, right);
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::occluded;
    use solarcast_math::Vec3;

    /// A field of small roof panels at varying heights.
    fn panel_field() -> Vec<Triangle> {
        let mut tris = Vec::new();
        for i in 0..8 {
            for j in 0..8 {
                let x = i as f64 * 12.0 - 40.0;
                let y = j as f64 * 12.0 - 40.0;
                let z = 5.0 + ((i * 3 + j * 5) % 7) as f64;
                tris.push(Triangle::new(
                    Point3::new(x, y, z),
                    Point3::new(x + 8.0, y, z),
                    Point3::new(x + 8.0, y + 8.0, z + 1.0),
                ));
                tris.push(Triangle::new(
                    Point3::new(x, y, z),
                    Point3::new(x + 8.0, y + 8.0, z + 1.0),
                    Point3::new(x, y + 8.0, z + 1.0),
                ));
            }
        }
        tris
    }

    #[test]
    fn test_bvh_build() {
        let tris = panel_field();
        let bvh = TriangleBvh::build(&tris);
        assert_eq!(bvh.len(), 128);
        assert!(matches!(bvh.root(), Some(BvhNode::Internal { .. })));
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = TriangleBvh::build(&[]);
        assert!(bvh.is_empty());
        assert!(bvh.root().is_none());
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(!bvh.occluded(&ray, &IntersectTolerance::default()));
    }

    #[test]
    fn test_bvh_matches_brute_force() {
        let tris = panel_field();
        let bvh = TriangleBvh::build(&tris);
        let tol = IntersectTolerance::default();

        for sx in (-100..100).step_by(10) {
            let sun = Point3::new(sx as f64, 0.0, 100.0);
            for px in (-50..60).step_by(5) {
                for py in (-50..60).step_by(5) {
                    let target = Point3::new(px as f64, py as f64, 0.0);
                    let ray = Ray::toward(sun, &target).unwrap();
                    assert_eq!(
                        bvh.occluded(&ray, &tol),
                        occluded(&ray, &tris, &tol),
                        "sun {:?} target {:?}",
                        sun,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn test_bvh_flat_scene() {
        // Every triangle coplanar: zero surface area at every level.
        let tris: Vec<Triangle> = (0..20)
            .map(|i| {
                let x = i as f64 * 2.0;
                Triangle::new(
                    Point3::new(x, 0.0, 10.0),
                    Point3::new(x + 2.0, 0.0, 10.0),
                    Point3::new(x, 2.0, 10.0),
                )
            })
            .collect();
        let bvh = TriangleBvh::build(&tris);
        let tol = IntersectTolerance::default();

        let down = Vec3::new(0.0, 0.0, -1.0);
        let hit = Ray::new(Point3::new(10.5, 0.5, 50.0), down);
        let miss = Ray::new(Point3::new(10.5, 5.0, 50.0), down);
        assert!(bvh.occluded(&hit, &tol));
        assert!(!bvh.occluded(&miss, &tol));
    }
}
