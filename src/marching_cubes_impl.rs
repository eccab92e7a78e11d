// Copyright 2018 Tristam MacDonald
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

//! Per-cell marching cubes: classification, edge interpolation and
//! triangulation.

use crate::{
    extractor::Extractor,
    marching_cubes_tables::{EDGE_CONNECTION, EDGE_TABLE, TRIANGLE_CONNECTION},
    math::Vec3,
};

/// Values closer than this to the isolevel (or to each other) snap the
/// crossing onto a corner instead of interpolating.
pub const SNAP_EPSILON: f32 = 0.00001;

/// Build the corner configuration of a cube: bit `i` is set when corner `i`
/// lies below the isolevel.
pub fn classify_corners(values: &[f32; 8], isolevel: f32) -> usize {
    let mut cube_index = 0;
    for (i, &value) in values.iter().enumerate() {
        if value < isolevel {
            cube_index |= 1 << i;
        }
    }
    cube_index
}

/// Find the point on the edge from `p1` to `p2` where the linearly
/// interpolated value equals the isolevel.
pub fn interpolate_edge(isolevel: f32, p1: Vec3, p2: Vec3, v1: f32, v2: f32) -> Vec3 {
    if (isolevel - v1).abs() < SNAP_EPSILON {
        return p1;
    }
    if (isolevel - v2).abs() < SNAP_EPSILON {
        return p2;
    }
    if (v1 - v2).abs() < SNAP_EPSILON {
        return p1;
    }

    let t = (isolevel - v1) / (v2 - v1);
    p1 + (p2 - p1) * t
}

/// Compute the surface crossing on every edge the configuration intersects.
///
/// Entries for edges that are not crossed are left untouched.
pub fn find_edge_crossings(
    cube_index: usize,
    corners: &[Vec3; 8],
    values: &[f32; 8],
    isolevel: f32,
    vertices: &mut [Vec3; 12],
) {
    let edges = EDGE_TABLE[cube_index];

    for (edge, &[u, v]) in EDGE_CONNECTION.iter().enumerate() {
        if edges & (1 << edge) != 0 {
            vertices[edge] =
                interpolate_edge(isolevel, corners[u], corners[v], values[u], values[v]);
        }
    }
}

/// March a single cube, given its corner configuration.
///
/// The `triangle_func` will be invoked once for each triangle in the resulting
/// mesh data, with the indices of the three edges the triangle's vertices lie
/// on.
pub fn march_cube<T>(cube_index: usize, mut triangle_func: T)
where
    T: FnMut(usize, usize, usize),
{
    for triangle in TRIANGLE_CONNECTION[cube_index].chunks_exact(3) {
        if triangle[0] < 0 {
            break;
        }
        triangle_func(
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
    }
}

/// Triangulate one cell into the given extractor.
///
/// Every triangle gets three fresh vertices; nothing is shared with
/// neighbouring cells. Returns the number of triangles emitted.
pub fn polygonise<E>(
    corners: &[Vec3; 8],
    values: &[f32; 8],
    isolevel: f32,
    extractor: &mut E,
) -> usize
where
    E: Extractor,
{
    let cube_index = classify_corners(values, isolevel);
    if EDGE_TABLE[cube_index] == 0 {
        return 0;
    }

    let mut vertices = [Vec3::zero(); 12];
    find_edge_crossings(cube_index, corners, values, isolevel, &mut vertices);

    let mut count = 0;
    march_cube(cube_index, |a, b, c| {
        for &edge in &[a, b, c] {
            let index = extractor.extract_vertex(vertices[edge]);
            extractor.extract_index(index);
        }
        count += 1;
    });
    count
}
