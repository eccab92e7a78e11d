// Copyright 2021 Tristam MacDonald
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::{
    extractor::Extractor,
    math::{Bounds, Vec2, Vec3},
};

/// Color given to vertices that have none when meshes with and without
/// colors are merged.
pub const DEFAULT_COLOR: Vec3 = Vec3 {
    x: 0.8,
    y: 0.8,
    z: 0.8,
};

/// A triangle mesh stored as parallel per-vertex arrays.
///
/// `positions` is always populated. Each of `normals`, `colors` and `uvs` is
/// either empty (attribute absent) or exactly as long as `positions`.
/// `indices` holds triples of vertex indices.
///
/// Triangles are stored in marching cubes table order. The front face of the
/// stored triangle `(a, b, c)` is `(a, c, b)`: normals point out of the front
/// face, and the exporters write front face order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// RGB colors in the [0, 1] range.
    pub colors: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty Mesh
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty() && self.normals.len() == self.positions.len()
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty() && self.colors.len() == self.positions.len()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && self.uvs.len() == self.positions.len()
    }

    /// Iterate over the triangles of the mesh, in stored order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Check the structural invariants: attribute arrays are absent or match
    /// the vertex count, and every index refers to an existing vertex.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len();
        let attribute_ok = |len: usize| len == 0 || len == n;

        attribute_ok(self.normals.len())
            && attribute_ok(self.colors.len())
            && attribute_ok(self.uvs.len())
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// The axis-aligned bounds of the vertex positions.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(&self.positions)
    }

    /// Appends another mesh, offsetting its indices by the current vertex
    /// count.
    ///
    /// If only one side carries an attribute, the other side is padded
    /// (zero normals and UVs, [`DEFAULT_COLOR`]) so the result stays valid.
    pub fn append(&mut self, other: Mesh) {
        let offset = self.positions.len() as u32;
        let (ours, theirs) = (self.positions.len(), other.positions.len());

        merge_attribute(&mut self.normals, other.normals, ours, theirs, Vec3::zero());
        merge_attribute(&mut self.colors, other.colors, ours, theirs, DEFAULT_COLOR);
        merge_attribute(&mut self.uvs, other.uvs, ours, theirs, Vec2::zero());

        self.positions.extend(other.positions);
        self.indices.reserve(other.indices.len());
        self.indices
            .extend(other.indices.into_iter().map(|i| i + offset));
    }

    /// Give every vertex the same color.
    pub fn set_uniform_color(&mut self, color: Vec3) {
        self.colors = vec![color; self.positions.len()];
    }

    /// Replace the vertex colors. Returns false, leaving the mesh untouched,
    /// if there is not exactly one color per vertex.
    pub fn set_colors(&mut self, colors: Vec<Vec3>) -> bool {
        if colors.len() != self.positions.len() {
            return false;
        }
        self.colors = colors;
        true
    }
}

fn merge_attribute<T: Copy>(
    ours: &mut Vec<T>,
    theirs: Vec<T>,
    our_count: usize,
    their_count: usize,
    fill: T,
) {
    match (ours.is_empty(), theirs.is_empty()) {
        (true, true) => {}
        (false, false) => ours.extend(theirs),
        (false, true) => ours.resize(our_count + their_count, fill),
        (true, false) => {
            ours.resize(our_count, fill);
            ours.extend(theirs);
        }
    }
}

impl Extractor for Mesh {
    fn extract_vertex(&mut self, vertex: Vec3) -> u32 {
        self.positions.push(vertex);
        (self.positions.len() - 1) as u32
    }

    fn extract_index(&mut self, index: u32) {
        self.indices.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        for p in &[
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        ] {
            let i = mesh.extract_vertex(*p);
            mesh.extract_index(i);
        }
        mesh
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut mesh = triangle();
        mesh.append(triangle());

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_append_pads_missing_attributes() {
        let mut colored = triangle();
        colored.set_uniform_color(vec3(1.0, 0.0, 0.0));

        let mut mesh = triangle();
        mesh.append(colored);

        assert!(mesh.has_colors());
        assert_eq!(mesh.colors[0], DEFAULT_COLOR);
        assert_eq!(mesh.colors[5], vec3(1.0, 0.0, 0.0));
        assert!(!mesh.has_normals());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_set_colors_requires_one_per_vertex() {
        let mut mesh = triangle();
        assert!(!mesh.set_colors(vec![Vec3::one()]));
        assert!(!mesh.has_colors());
        assert!(mesh.set_colors(vec![Vec3::one(); 3]));
        assert!(mesh.has_colors());
    }

    #[test]
    fn test_bounds() {
        assert!(Mesh::new().bounds().is_none());

        let bounds = triangle().bounds().unwrap();
        assert_eq!(bounds.min, Vec3::zero());
        assert_eq!(bounds.max, vec3(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_is_valid_rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.indices[2] = 3;
        assert!(!mesh.is_valid());
    }
}
