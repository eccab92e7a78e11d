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
use crate::{
    field::ScalarField,
    marching_cubes_impl::polygonise,
    marching_cubes_tables::CORNERS,
    math::{Bounds, Vec3},
    mesh::Mesh,
    sampler::sample_grid,
    source::Source,
};
use rayon::prelude::*;
use std::{ops::Range, time::Instant};

/// Extracts meshes from scalar fields using the marching cubes algorithm.
///
/// The cell layers of the field are split along Z into contiguous slabs, each
/// marched by its own rayon task. The resulting fragments are stitched back
/// together in slab order, so the output does not depend on how many workers
/// ran or in which order they finished.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarchingCubes {
    /// The surface lies where the field equals this value. Samples below it
    /// are inside.
    pub isolevel: f32,
    /// Number of worker threads. `None` uses the current rayon pool.
    pub workers: Option<usize>,
}

impl Default for MarchingCubes {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MarchingCubes {
    /// Create a new MarchingCubes for the given isolevel.
    pub fn new(isolevel: f32) -> Self {
        Self {
            isolevel,
            workers: None,
        }
    }

    /// Run on a dedicated pool of `workers` threads instead of the current
    /// rayon pool.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Extracts a mesh from the given [`ScalarField`].
    ///
    /// Only positions and indices are filled in; see
    /// [`attributes`](crate::attributes) for normals and texture coordinates.
    /// A field without any cells produces an empty mesh.
    pub fn extract(&self, field: &ScalarField) -> Mesh {
        if !field.has_cells() {
            return Mesh::new();
        }

        let layers = field.cells_per_axis();
        let requested = self.workers.unwrap_or_else(rayon::current_num_threads);
        let workers = requested.min(layers).max(1);
        let slabs = partition_layers(layers, workers);

        log::debug!(
            "marching {}^3 cells in {} slabs across {} workers",
            layers,
            slabs.len(),
            workers
        );

        let start = Instant::now();
        let march = || -> Vec<Mesh> {
            slabs
                .par_iter()
                .map(|slab| march_slab(field, self.isolevel, slab.clone()))
                .collect()
        };

        let fragments = match self.workers {
            Some(_) => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(march),
                Err(err) => {
                    log::warn!("falling back to the global thread pool: {}", err);
                    march()
                }
            },
            None => march(),
        };

        let mut mesh = Mesh::new();
        for fragment in fragments {
            mesh.append(fragment);
        }

        log::debug!(
            "extracted {} vertices and {} triangles in {:?}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            start.elapsed()
        );

        mesh
    }

    /// Samples `source` on a `resolution^3` grid spanning `bounds`, then
    /// extracts a mesh from the result.
    pub fn extract_source<S>(&self, source: &S, resolution: usize, bounds: Bounds) -> Mesh
    where
        S: Source + Sync,
    {
        self.extract(&sample_grid(source, resolution, bounds))
    }
}

/// Extracts a mesh from `field` using the current rayon pool.
pub fn extract(field: &ScalarField, isolevel: f32) -> Mesh {
    MarchingCubes::new(isolevel).extract(field)
}

/// Split `layers` cell layers into contiguous slabs of
/// `ceil(layers / workers)` layers each. The last slab may be shorter, and
/// fewer than `workers` slabs are produced when the division leaves some
/// workers without layers.
fn partition_layers(layers: usize, workers: usize) -> Vec<Range<usize>> {
    let per_slab = (layers + workers - 1) / workers;
    (0..layers)
        .step_by(per_slab.max(1))
        .map(|start| start..(start + per_slab).min(layers))
        .collect()
}

fn march_slab(field: &ScalarField, isolevel: f32, layers: Range<usize>) -> Mesh {
    let cells = field.cells_per_axis();
    let mut corners = [Vec3::zero(); 8];
    let mut values = [0f32; 8];
    let mut fragment = Mesh::new();

    for z in layers {
        for y in 0..cells {
            for x in 0..cells {
                for (i, offset) in CORNERS.iter().enumerate() {
                    let (cx, cy, cz) = (x + offset[0], y + offset[1], z + offset[2]);
                    corners[i] = field.position(cx, cy, cz);
                    values[i] = field.value(cx, cy, cz);
                }
                polygonise(&corners, &values, isolevel, &mut fragment);
            }
        }
    }

    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implicit::Sphere;
    use proptest::prelude::*;

    fn sphere_field(resolution: usize, radius: f32) -> ScalarField<'static> {
        sample_grid(&Sphere::new(radius), resolution, Bounds::centered(1.0))
    }

    fn sorted_triangles(mesh: &Mesh) -> Vec<[[u32; 3]; 3]> {
        let key = |i: u32| {
            let p = mesh.positions[i as usize];
            [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
        };
        let mut triangles: Vec<_> = mesh
            .triangles()
            .map(|t| [key(t[0]), key(t[1]), key(t[2])])
            .collect();
        triangles.sort();
        triangles
    }

    #[test]
    fn test_partition_covers_every_layer_once() {
        assert_eq!(partition_layers(10, 3), vec![0..4, 4..8, 8..10]);
        assert_eq!(partition_layers(4, 4), vec![0..1, 1..2, 2..3, 3..4]);
        assert_eq!(partition_layers(5, 1), vec![0..5]);
        // ceil(9 / 4) = 3 leaves the fourth worker idle
        assert_eq!(partition_layers(9, 4), vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn test_uniform_field_has_no_triangles() {
        for &value in &[-1.0, 1.0] {
            let field = ScalarField::from_vec(vec![value; 512], 8, Bounds::centered(1.0)).unwrap();
            let mesh = extract(&field, 0.0);
            assert_eq!(mesh.triangle_count(), 0);
            assert!(mesh.is_empty());
        }
    }

    #[test]
    fn test_degenerate_field_is_empty() {
        let empty = ScalarField::from_vec(vec![], 0, Bounds::centered(1.0)).unwrap();
        let single = ScalarField::from_vec(vec![-1.0], 1, Bounds::centered(1.0)).unwrap();

        assert!(extract(&empty, 0.0).is_empty());
        assert!(MarchingCubes::new(0.0).with_workers(4).extract(&single).is_empty());
    }

    #[test]
    fn test_sphere_vertices_lie_near_radius() {
        let radius = 0.6;
        let field = sphere_field(32, radius);
        let tolerance = field.cell_diagonal();
        let center = field.bounds().center();
        let mesh = extract(&field, 0.0);

        assert!(mesh.triangle_count() > 0);
        assert!(mesh.is_valid());
        for &p in &mesh.positions {
            let distance = (p - center).len();
            assert!(distance >= radius - tolerance && distance <= radius + tolerance);
        }
    }

    #[test]
    fn test_vertices_are_not_shared() {
        let mesh = extract(&sphere_field(12, 0.5), 0.0);
        assert_eq!(mesh.vertex_count(), mesh.indices.len());
        assert!(mesh.indices.iter().enumerate().all(|(i, &v)| i as u32 == v));
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let field = sphere_field(24, 0.7);
        let reference = MarchingCubes::new(0.0).with_workers(1).extract(&field);

        for &workers in &[4, 16] {
            let mesh = MarchingCubes::new(0.0).with_workers(workers).extract(&field);
            assert_eq!(mesh.vertex_count(), reference.vertex_count());
            assert_eq!(mesh.triangle_count(), reference.triangle_count());
            assert_eq!(sorted_triangles(&mesh), sorted_triangles(&reference));
        }
    }

    #[test]
    fn test_more_workers_than_layers() {
        let field = sphere_field(4, 0.8);
        let mesh = MarchingCubes::new(0.0).with_workers(64).extract(&field);
        assert_eq!(mesh, extract(&field, 0.0));
    }

    #[test]
    fn test_extract_source_matches_sampled_field() {
        let sphere = Sphere::new(0.5);
        let bounds = Bounds::centered(1.0);
        let direct = MarchingCubes::new(0.0).extract_source(&sphere, 16, bounds);
        let sampled = extract(&sample_grid(&sphere, 16, bounds), 0.0);
        assert_eq!(direct, sampled);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn worker_count_is_invisible(
            workers in 1usize..12,
            resolution in 2usize..14,
            radius in 0.1f32..1.2,
        ) {
            let field = sphere_field(resolution, radius);
            let serial = MarchingCubes::new(0.0).with_workers(1).extract(&field);
            let parallel = MarchingCubes::new(0.0).with_workers(workers).extract(&field);
            prop_assert_eq!(serial, parallel);
        }
    }
}
