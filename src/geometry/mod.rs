//! # Procedural Geometry
//!
//! This module provides the shared geometry container used across the crate,
//! axis-aligned bounding boxes for layout measurement, and procedural
//! generators for the shapes the bookstore scene is dressed with.
//!
//! ## Key Components
//!
//! - [`GeometryData`] - Raw vertex/index data ready for a renderer to consume
//! - [`Aabb`] - Axis-aligned bounding box with corner-accurate transforms
//! - [`primitives`] - Box, plane, cylinder and open-front shelf generators
//!
//! ## Usage
//!
//! ```
//! use folio::geometry::{generate_box, generate_shelf};
//!
//! // A book-sized box
//! let book = generate_box(0.16, 0.85, 0.6);
//!
//! // A fallback shelf when no model file is available
//! let shelf = generate_shelf(4.0, 5.0, 0.8, 4);
//! ```

pub mod primitives;

pub use primitives::*;

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4, Zero};

/// Represents generated or loaded geometry, renderer-agnostic
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Build geometry from the flat position/normal/index arrays an OBJ
    /// loader produces. Missing normals are reconstructed, missing texture
    /// coordinates are zero-filled.
    pub fn from_raw(positions: &[f32], normals: &[f32], tex_coords: &[f32], indices: Vec<u32>) -> Self {
        let vertex_count = positions.len() / 3;

        let vertices: Vec<[f32; 3]> = (0..vertex_count)
            .map(|i| [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]])
            .collect();

        let normals = if normals.len() == positions.len() {
            (0..vertex_count)
                .map(|i| [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]])
                .collect()
        } else {
            smooth_normals(&vertices, &indices)
        };

        let tex_coords = if tex_coords.len() == vertex_count * 2 {
            (0..vertex_count)
                .map(|i| [tex_coords[i * 2], tex_coords[i * 2 + 1]])
                .collect()
        } else {
            vec![[0.0, 0.0]; vertex_count]
        };

        Self {
            vertices,
            tex_coords,
            normals,
            indices,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another geometry, translated by `offset`, re-basing its indices
    pub fn append(&mut self, other: &GeometryData, offset: Vector3<f32>) {
        let base = self.vertices.len() as u32;

        for v in &other.vertices {
            self.vertices
                .push([v[0] + offset.x, v[1] + offset.y, v[2] + offset.z]);
        }
        self.tex_coords.extend_from_slice(&other.tex_coords);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Bounding box of this geometry, or `None` when it has no vertices
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Area-weighted smooth vertex normals for geometry that arrives without them
pub fn smooth_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vector3::zero(); vertices.len()];

    for triangle in indices.chunks(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];

        let v0 = Vector3::from(vertices[i0]);
        let v1 = Vector3::from(vertices[i1]);
        let v2 = Vector3::from(vertices[i2]);

        // Cross product magnitude weights larger faces more heavily
        let face_normal = (v1 - v0).cross(v2 - v0);

        for &idx in &[i0, i1, i2] {
            accumulated[idx] += face_normal;
        }
    }

    accumulated
        .into_iter()
        .map(|n| {
            if n.magnitude2() > 0.0 {
                n.normalize().into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create an AABB from a set of points, or `None` if the slice is empty
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let first = points.first()?;
        let mut min = Vector3::new(first[0], first[1], first[2]);
        let mut max = min;

        for p in points.iter().skip(1) {
            min.x = min.x.min(p[0]);
            min.y = min.y.min(p[1]);
            min.z = min.z.min(p[2]);
            max.x = max.x.max(p[0]);
            max.y = max.y.max(p[1]);
            max.z = max.z.max(p[2]);
        }

        Some(Self::new(min, max))
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Center point of the box
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) / 2.0
    }

    /// True when any axis has non-positive extent
    pub fn is_degenerate(&self) -> bool {
        let s = self.size();
        s.x <= 0.0 || s.y <= 0.0 || s.z <= 0.0
    }

    /// Apply a transformation matrix to the AABB
    ///
    /// A transformed box is not axis-aligned under rotation, so all 8 corners
    /// are pushed through the matrix and a fresh box is fitted around them.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let t = matrix * homogeneous;
            transformed.push([t.x / t.w, t.y / t.w, t.z / t.w]);
        }

        // 8 corners are never empty
        Aabb::from_points(&transformed).unwrap_or(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Rad;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_aabb_from_points() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_points(&points).unwrap();

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_aabb_empty_points() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_aabb_rotation_refits_corners() {
        // A thin slab rotated 90 degrees about Y swaps its X and Z extents
        let aabb = Aabb::new(Vector3::new(-2.0, 0.0, -0.5), Vector3::new(2.0, 1.0, 0.5));
        let rotated = aabb.transform(&Matrix4::from_angle_y(Rad(FRAC_PI_2)));

        assert!((rotated.size().x - 1.0).abs() < 1e-5);
        assert!((rotated.size().z - 4.0).abs() < 1e-5);
        assert!((rotated.size().y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_union() {
        let a = Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vector3::new(-1.0, 0.5, 0.0), Vector3::new(0.5, 2.0, 3.0));
        let u = a.union(&b);

        assert_eq!(u.min, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_smooth_normals_flat_quad() {
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ];
        let indices = vec![0, 2, 1, 0, 3, 2];
        let normals = smooth_normals(&vertices, &indices);

        for n in normals {
            assert!((n[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut a = generate_box(1.0, 1.0, 1.0);
        let b = generate_box(1.0, 1.0, 1.0);
        let base_vertices = a.vertex_count() as u32;

        a.append(&b, Vector3::new(2.0, 0.0, 0.0));

        assert_eq!(a.vertex_count(), 48);
        assert!(a.indices[36..].iter().all(|&i| i >= base_vertices));
    }
}
