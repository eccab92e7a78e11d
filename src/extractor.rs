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
use crate::math::Vec3;

/// Trait for outputting mesh vertices and indices.
///
/// The cube evaluator never reuses vertices, so every index it emits refers to
/// a vertex returned by an earlier call to `extract_vertex`.
pub trait Extractor {
    /// Store a vertex, returning the index it can be referenced by.
    fn extract_vertex(&mut self, vertex: Vec3) -> u32;
    fn extract_index(&mut self, index: u32);
}

/// Output vertices as a tightly packed array of floats, and indices as a
/// separate array, ready for upload to a vertex and index buffer.
pub struct IndexedVertices<'a> {
    vertices: &'a mut Vec<f32>,
    indices: &'a mut Vec<u32>,
}

impl<'a> IndexedVertices<'a> {
    pub fn new(vertices: &'a mut Vec<f32>, indices: &'a mut Vec<u32>) -> Self {
        Self { vertices, indices }
    }
}

impl<'a> Extractor for IndexedVertices<'a> {
    fn extract_vertex(&mut self, v: Vec3) -> u32 {
        let index = (self.vertices.len() / 3) as u32;
        self.vertices.push(v.x);
        self.vertices.push(v.y);
        self.vertices.push(v.z);
        index
    }

    fn extract_index(&mut self, index: u32) {
        self.indices.push(index);
    }
}
