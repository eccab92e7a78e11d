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

//! Per-vertex attributes derived from mesh geometry.

use crate::{
    math::{Vec2, Vec3},
    mesh::Mesh,
};

/// Texture repeats per world unit used when the caller has no preference.
pub const DEFAULT_UV_SCALE: f32 = 10.0;

/// Replace the normals of `mesh` with area-weighted vertex normals.
///
/// Each triangle adds its unnormalised front face normal to its three
/// vertices, then every accumulated normal is normalised. Vertices that end
/// up with a zero-length sum keep a zero normal. Triangles referencing
/// missing vertices are ignored.
pub fn compute_normals(mesh: &mut Mesh) {
    let mut normals = vec![Vec3::zero(); mesh.positions.len()];

    for [i0, i1, i2] in mesh.triangles() {
        let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
        if i0 >= normals.len() || i1 >= normals.len() || i2 >= normals.len() {
            continue;
        }

        let p0 = mesh.positions[i0];
        let face = (mesh.positions[i2] - p0).cross(mesh.positions[i1] - p0);

        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }

    for n in &mut normals {
        *n = n.normalised().unwrap_or_else(Vec3::zero);
    }

    mesh.normals = normals;
}

/// Replace the texture coordinates of `mesh` with triplanar projections,
/// computing normals first if the mesh has none.
pub fn compute_uvs(mesh: &mut Mesh, scale: f32) {
    if !mesh.has_normals() {
        compute_normals(mesh);
    }

    mesh.uvs = mesh
        .positions
        .iter()
        .zip(mesh.normals.iter())
        .map(|(&p, &n)| triplanar_uv(p, n, scale))
        .collect();
}

/// Project `position` onto the coordinate plane most perpendicular to
/// `normal` and wrap the scaled result into [0, 1).
///
/// Ties between axes resolve towards x, then y.
pub fn triplanar_uv(position: Vec3, normal: Vec3, scale: f32) -> Vec2 {
    let projected = match normal.abs().dominant_axis() {
        0 => position.yz(),
        1 => position.xz(),
        _ => position.xy(),
    };
    (projected * scale).fract()
}
