//! Mesh data structures for voxel rendering.
//!
//! [`MeshData`] is the CPU-side output of the greedy mesher. [`Mesh`] is what a
//! chunk keeps after upload: the renderer's buffer handle and the counts needed
//! to draw it. A mesh is never patched in place; a remesh builds a new one and
//! drops the old, which releases its buffers.

use cgmath::{InnerSpace, Vector3};

use super::face::Face;
use crate::engine_state::rendering::backend::MeshUploader;
use crate::engine_state::rendering::Vertex;

/// Vertex and index arrays produced by the mesher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Four vertices per quad
    pub vertices: Vec<Vertex>,
    /// Six `u32` indices per quad, a triangle list
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Creates empty mesh data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one quad.
    pub fn push_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(face.vertices());
        self.indices.extend(face.indices(base));
    }

    /// Writes a flat normal to every vertex: the normalized cross product of
    /// each triangle's two edges, assigned to all three of its corners.
    pub fn compute_flat_normals(&mut self) {
        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let p0 = Vector3::from(self.vertices[a].position);
            let p1 = Vector3::from(self.vertices[b].position);
            let p2 = Vector3::from(self.vertices[c].position);
            let cross = (p1 - p0).cross(p2 - p0);
            if cross.magnitude2() == 0.0 {
                continue;
            }
            let normal: [f32; 3] = cross.normalize().into();
            for index in [a, b, c] {
                self.vertices[index].normal = normal;
            }
        }
    }

    /// Number of quads.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// An uploaded chunk mesh.
///
/// Owns the renderer's buffer handle; dropping the mesh releases it.
#[derive(Debug)]
pub struct Mesh<B> {
    buffers: B,
    index_count: u32,
    vertex_count: u32,
}

impl<B> Mesh<B> {
    /// Uploads `data` through `uploader`.
    pub fn upload<U>(data: &MeshData, uploader: &mut U) -> Self
    where
        U: MeshUploader<Buffers = B> + ?Sized,
    {
        let buffers = uploader.upload(&data.vertices, &data.indices);
        Self::from_parts(buffers, data.indices.len() as u32, data.vertices.len() as u32)
    }

    /// Wraps buffers that were uploaded elsewhere.
    pub fn from_parts(buffers: B, index_count: u32, vertex_count: u32) -> Self {
        Mesh {
            buffers,
            index_count,
            vertex_count,
        }
    }

    /// The renderer's buffer handle.
    pub fn buffers(&self) -> &B {
        &self.buffers
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Number of uploaded vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of triangles to draw.
    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::backend::CpuMeshStore;

    fn unit_face(back_face: bool) -> Face {
        Face::new(
            Vector3::new(0, 0, 1),
            Vector3::new(1, 0, 0),
            Vector3::new(0, 1, 0),
            2,
            back_face,
        )
    }

    #[test]
    fn flat_normals_point_along_winding() {
        let mut data = MeshData::new();
        data.push_face(&unit_face(false));
        data.push_face(&unit_face(true));
        data.compute_flat_normals();

        assert!(data.vertices[..4].iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert!(data.vertices[4..].iter().all(|v| v.normal == [0.0, 0.0, -1.0]));
        assert_eq!(data.indices[6..], [6, 5, 4, 7, 6, 4]);
        assert_eq!(data.quad_count(), 2);
        assert_eq!(data.triangle_count(), 4);
    }

    #[test]
    fn upload_records_counts() {
        let mut data = MeshData::new();
        data.push_face(&unit_face(false));
        let mut store = CpuMeshStore::new();
        let mesh = Mesh::upload(&data, &mut store);

        assert_eq!(store.uploads(), 1);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.buffers(), &data);
    }
}
