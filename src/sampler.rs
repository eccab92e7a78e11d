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
    field::{grid_position, ScalarField},
    marching_cubes::MarchingCubes,
    math::{Bounds, Vec3},
    mesh::Mesh,
    source::Source,
};
use rayon::prelude::*;

/// Sample `source` at every point of a `resolution^3` grid spanning `bounds`.
///
/// Samples are stored x fastest, matching the layout [`ScalarField`]
/// expects. Z layers are evaluated in parallel on the current rayon pool.
pub fn sample_grid<S>(source: &S, resolution: usize, bounds: Bounds) -> ScalarField<'static>
where
    S: Source + Sync,
{
    let layer = resolution * resolution;
    let cell_size = match resolution {
        0 | 1 => Vec3::zero(),
        n => bounds.size() / (n - 1) as f32,
    };

    let mut values = vec![0f32; layer * resolution];
    if layer > 0 {
        values
            .par_chunks_mut(layer)
            .enumerate()
            .for_each(|(z, slice)| {
                for y in 0..resolution {
                    for x in 0..resolution {
                        let p = grid_position(&bounds, cell_size, x, y, z);
                        slice[x + y * resolution] = source.sample(p);
                    }
                }
            });
    }

    log::debug!("sampled {} grid points", values.len());

    ScalarField::from_samples(values, resolution, bounds)
}

/// Sample `source` on a grid and extract the surface at `isolevel`.
///
/// Equivalent to [`sample_grid`] followed by [`extract`](crate::extract).
pub fn extract_source<S>(source: &S, resolution: usize, bounds: Bounds, isolevel: f32) -> Mesh
where
    S: Source + Sync,
{
    MarchingCubes::new(isolevel).extract_source(source, resolution, bounds)
}
