//! CPU-side mesh representation produced by the OBJ loader.

/// Axis-aligned bounding box in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Deduplicated, GPU-ready mesh.
///
/// Attribute arrays are flat and share one vertex numbering: vertex `i` owns
/// `positions[3i..3i + 3]`, `normals[3i..3i + 3]` and, when the source declared
/// texture coordinates, `texcoords[w*i..w*i + w]` with `w = texcoord_width`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    /// Zero-filled for vertices whose face corner had no normal reference.
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    /// Components per texcoord (2 or 3), or 0 if the file had no `vt` records.
    pub texcoord_width: usize,
    /// Triangle list, stride 3.
    pub indices: Vec<u32>,
    /// Line list, stride 2, one entry per undirected edge.
    pub wireframe_indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.wireframe_indices.len() / 2
    }

    /// Returns `true` if the mesh has vertices, triangles, and every index
    /// points at an existing vertex.
    pub fn is_valid(&self) -> bool {
        let count = self.vertex_count();
        count > 0
            && !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self.wireframe_indices.len() % 2 == 0
            && self.normals.len() == self.positions.len()
            && self
                .indices
                .iter()
                .chain(&self.wireframe_indices)
                .all(|&i| (i as usize) < count)
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(3 * i..3 * i + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Normal of vertex `i`.
    pub fn normal(&self, i: usize) -> Option<[f32; 3]> {
        let n = self.normals.get(3 * i..3 * i + 3)?;
        Some([n[0], n[1], n[2]])
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut chunks = self.positions.chunks_exact(3);
        let first = chunks.next()?;
        let mut bounds = Bounds {
            min: [first[0], first[1], first[2]],
            max: [first[0], first[1], first[2]],
        };
        for p in chunks {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0; 9],
            indices: vec![0, 1, 2],
            wireframe_indices: vec![0, 1, 1, 2, 2, 0],
            ..Default::default()
        }
    }

    #[test]
    fn mesh_data_validity() {
        let data = triangle();
        assert!(data.is_valid());
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.triangle_count(), 1);
        assert_eq!(data.edge_count(), 3);
    }

    #[test]
    fn dangling_index_is_invalid() {
        let mut data = triangle();
        data.indices[2] = 3;
        assert!(!data.is_valid());
        assert!(!MeshData::default().is_valid());
    }

    #[test]
    fn bounds_cover_all_positions() {
        let b = triangle().bounds().unwrap();
        assert_eq!(b.min, [0.0, 0.0, 0.0]);
        assert_eq!(b.max, [1.0, 1.0, 0.0]);
        assert_eq!(b.size(), [1.0, 1.0, 0.0]);
        assert!(MeshData::default().bounds().is_none());
    }

    #[test]
    fn attribute_accessors() {
        let data = triangle();
        assert_eq!(data.position(1), Some([1.0, 0.0, 0.0]));
        assert_eq!(data.normal(2), Some([0.0, 0.0, 0.0]));
        assert_eq!(data.position(3), None);
    }
}
