#![warn(missing_docs)]

//! Indexed meshes, triangles and bounding boxes for solarcast.
//!
//! Occluder geometry arrives as indexed meshes (a flat vertex buffer plus a
//! flat face index buffer). [`triangulate`] flattens a sequence of them into
//! an explicit triangle soup for ray tracing, and [`bounding_box`] computes
//! the extent that sample points are laid out over.

pub mod bbox;
pub mod error;

pub use bbox::{bounding_box, Aabb3};
pub use error::{MeshError, Result};

use serde::{Deserialize, Serialize};
use solarcast_math::{Point3, Vec3};

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f64>,
    /// Flat array of triangle vertex indices: `[i0, i1, i2, ...]`.
    pub faces: Vec<u32>,
}

impl IndexedMesh {
    /// Create a mesh from its buffers.
    pub fn new(vertices: Vec<f64>, faces: Vec<u32>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.faces.len() / 3
    }

    /// Check buffer lengths and index bounds.
    ///
    /// `position` identifies the mesh in error messages.
    pub fn validate(&self, position: usize) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(MeshError::VertexBufferLength {
                mesh: position,
                len: self.vertices.len(),
            });
        }
        if self.faces.len() % 3 != 0 {
            return Err(MeshError::FaceBufferLength {
                mesh: position,
                len: self.faces.len(),
            });
        }
        let vertex_count = self.num_vertices();
        if let Some(&index) = self.faces.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfBounds {
                mesh: position,
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Position of vertex `i`. The index must be in bounds.
    fn vertex(&self, i: u32) -> Point3 {
        let i = i as usize * 3;
        Point3::new(self.vertices[i], self.vertices[i + 1], self.vertices[i + 2])
    }

    /// Iterate the mesh's faces as triangles. The mesh must be valid.
    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.chunks_exact(3).map(|f| {
            Triangle::new(self.vertex(f[0]), self.vertex(f[1]), self.vertex(f[2]))
        })
    }
}

/// A triangle with ordered vertices `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,
    /// Second vertex.
    pub b: Point3,
    /// Third vertex.
    pub c: Point3,
}

impl Triangle {
    /// Create a triangle from its vertices.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized normal `(b - a) × (c - a)`; its sign follows vertex order.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Triangle area.
    pub fn area(&self) -> f64 {
        self.normal().norm() / 2.0
    }

    /// Centroid of the three vertices.
    pub fn centroid(&self) -> Point3 {
        Point3::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Bounding box of the three vertices.
    pub fn aabb(&self) -> Aabb3 {
        let mut aabb = Aabb3::empty();
        aabb.include_point(&self.a);
        aabb.include_point(&self.b);
        aabb.include_point(&self.c);
        aabb
    }
}

/// Flatten meshes into one ordered triangle soup.
///
/// Triangles appear in mesh order, then face order within each mesh. Every
/// mesh is validated before any triangle is produced.
pub fn triangulate<'a, I>(meshes: I) -> Result<Vec<Triangle>>
where
    I: IntoIterator<Item = &'a IndexedMesh>,
{
    let meshes: Vec<&IndexedMesh> = meshes.into_iter().collect();
    for (position, mesh) in meshes.iter().enumerate() {
        mesh.validate(position)?;
    }

    let total: usize = meshes.iter().map(|m| m.num_triangles()).sum();
    let mut triangles = Vec::with_capacity(total);
    for mesh in meshes {
        triangles.extend(mesh.triangles());
    }
    Ok(triangles)
}
