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

//! Parallel marching cubes extraction of isosurface meshes, with normals,
//! triplanar texture coordinates and glTF / OBJ interchange.
//!
//! ```
//! use isomesh::{attributes, implicit::Sphere, math::Bounds, MarchingCubes};
//!
//! let mut mesh =
//!     MarchingCubes::new(0.0).extract_source(&Sphere::new(0.8), 32, Bounds::centered(1.0));
//! attributes::compute_uvs(&mut mesh, attributes::DEFAULT_UV_SCALE);
//! assert!(mesh.has_normals() && mesh.has_uvs());
//!
//! let glb = isomesh::io::gltf::export_glb(&mesh, false).unwrap();
//! assert_eq!(isomesh::io::gltf::import_glb(&glb).unwrap().vertex_count(), mesh.vertex_count());
//! ```

/// Common math types
pub mod math;

/// Traits for defining scalar field sources
pub mod source;

/// Utilities for outputting mesh data in specific formats.
pub mod extractor;

/// Primitives for building distance fields from implicit functions.
pub mod implicit;

/// Sampling sources onto regular grids.
pub mod sampler;

pub mod attributes;

/// Reading and writing meshes in interchange formats.
pub mod io;

mod error;
mod field;
mod marching_cubes;
mod marching_cubes_impl;
mod marching_cubes_tables;
mod mesh;

pub use self::{
    error::{Error, Result},
    field::ScalarField,
    marching_cubes::{extract, MarchingCubes},
    marching_cubes_impl::{
        classify_corners, find_edge_crossings, interpolate_edge, march_cube, polygonise,
    },
    mesh::{Mesh, DEFAULT_COLOR},
    sampler::{extract_source, sample_grid},
};

/// The lookup tables driving the cube evaluator.
pub mod tables {
    pub use crate::marching_cubes_tables::{
        CORNERS, EDGE_CONNECTION, EDGE_TABLE, TRIANGLE_CONNECTION,
    };
}
