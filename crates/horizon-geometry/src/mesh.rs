//! Mesh container holding the sphere's vertex attributes and triangle indices.

use glam::{DVec2, DVec3};

/// An indexed triangle mesh with per-vertex position, normal, and UV attributes.
///
/// Attributes are stored in parallel buffers sharing one index space: the
/// vertex at index `i` is described by `positions()[i]`, `normals()[i]`, and
/// `uvs()[i]`. Geometry math runs in f64; conversion to the interleaved f32
/// GPU format happens only at the upload boundary (see `horizon-render`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SphereMesh {
    /// Vertex positions.
    positions: Vec<DVec3>,
    /// Unit vertex normals, index-aligned with `positions`.
    normals: Vec<DVec3>,
    /// Texture coordinates in `[0, 1]²`, index-aligned with `positions`.
    uvs: Vec<DVec2>,
    /// Triangle list indices (3 per triangle).
    indices: Vec<u32>,
}

impl SphereMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated attribute and index capacity.
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: DVec3, normal: DVec3, uv: DVec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Appends a triangle by vertex indices.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Mutable vertex positions, for in-place warping.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [DVec3] {
        &mut self.positions
    }

    /// Vertex normals.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Texture coordinates.
    #[inline]
    pub fn uvs(&self) -> &[DVec2] {
        &self.uvs
    }

    /// Triangle indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Mirrors the mesh across the XY plane: negates the z component of every
    /// position and normal, leaving UVs and indices untouched.
    ///
    /// Mirroring flips the triangle winding as seen from outside, which turns
    /// an outward-facing sphere into an interior-facing one without rewriting
    /// the index buffer.
    pub fn mirror_z(&mut self) {
        for p in &mut self.positions {
            p.z = -p.z;
        }
        for n in &mut self.normals {
            n.z = -n.z;
        }
    }

    /// Axis-aligned bounding box of the vertex positions as `(min, max)`.
    ///
    /// Returns zero extents for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        if self.positions.is_empty() {
            (DVec3::ZERO, DVec3::ZERO)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> SphereMesh {
        let mut mesh = SphereMesh::new();
        let n = DVec3::Z;
        mesh.push_vertex(DVec3::new(0.0, 0.0, 1.0), n, DVec2::new(0.0, 0.0));
        mesh.push_vertex(DVec3::new(1.0, 0.0, 1.0), n, DVec2::new(1.0, 0.0));
        mesh.push_vertex(DVec3::new(1.0, 1.0, 1.0), n, DVec2::new(1.0, 1.0));
        mesh.push_vertex(DVec3::new(0.0, 1.0, 1.0), n, DVec2::new(0.0, 1.0));
        mesh.push_triangle(0, 1, 2);
        mesh.push_triangle(0, 2, 3);
        mesh
    }

    /// Attribute buffers stay index-aligned as vertices are appended.
    #[test]
    fn test_attribute_buffers_stay_aligned() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.positions().len(), mesh.normals().len());
        assert_eq!(mesh.positions().len(), mesh.uvs().len());
        assert_eq!(mesh.triangle_count(), 2);
    }

    /// `mirror_z` negates position and normal z and leaves everything else alone.
    #[test]
    fn test_mirror_z_flips_only_z() {
        let mut mesh = quad();
        let uvs_before = mesh.uvs().to_vec();
        let indices_before = mesh.indices().to_vec();

        mesh.mirror_z();

        for p in mesh.positions() {
            assert_eq!(p.z, -1.0, "position z should be negated, got {p:?}");
        }
        for n in mesh.normals() {
            assert_eq!(*n, -DVec3::Z, "normal should be negated, got {n:?}");
        }
        assert_eq!(mesh.uvs(), uvs_before, "UVs must not change");
        assert_eq!(mesh.indices(), indices_before, "indices must not change");
    }

    /// Double mirror restores the original mesh.
    #[test]
    fn test_mirror_z_is_involutive() {
        let mut mesh = quad();
        let original = mesh.clone();
        mesh.mirror_z();
        mesh.mirror_z();
        assert_eq!(mesh, original);
    }

    /// Bounding box spans the vertex extents.
    #[test]
    fn test_bounding_box() {
        let mesh = quad();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(max, DVec3::new(1.0, 1.0, 1.0));
    }

    /// Empty mesh reports zero extents instead of infinities.
    #[test]
    fn test_empty_bounding_box() {
        let mesh = SphereMesh::new();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::ZERO);
    }
}
