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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use isomesh::{
    attributes::{compute_uvs, DEFAULT_UV_SCALE},
    extractor::IndexedVertices,
    implicit::{Sphere, Torus, Translate, Union},
    io::gltf::export_glb,
    math::{Bounds, Vec3},
    polygonise, sample_grid, tables::CORNERS, MarchingCubes, ScalarField,
};

fn scene() -> Union<Torus, Translate<Sphere>> {
    Union::new(
        Torus::new(0.5, 0.2),
        Translate::new(Sphere::new(0.3), Vec3::new(0.0, 0.4, 0.0)),
    )
}

fn field(resolution: usize) -> ScalarField<'static> {
    sample_grid(&scene(), resolution, Bounds::centered(1.0))
}

fn serial_cells(field: &ScalarField) -> usize {
    let mut vertices = vec![];
    let mut indices = vec![];
    let mut extractor = IndexedVertices::new(&mut vertices, &mut indices);

    let cells = field.cells_per_axis();
    let mut corners = [Vec3::zero(); 8];
    let mut values = [0f32; 8];
    let mut triangles = 0;
    for z in 0..cells {
        for y in 0..cells {
            for x in 0..cells {
                for (i, o) in CORNERS.iter().enumerate() {
                    corners[i] = field.position(x + o[0], y + o[1], z + o[2]);
                    values[i] = field.value(x + o[0], y + o[1], z + o[2]);
                }
                triangles += polygonise(&corners, &values, 0.0, &mut extractor);
            }
        }
    }
    triangles
}

fn extraction_benchmark(c: &mut Criterion) {
    let field = field(128);

    c.bench_function("sample 128^3", |b| {
        b.iter(|| sample_grid(&scene(), 128, Bounds::centered(1.0)))
    });
    c.bench_function("serial cells 128^3", |b| b.iter(|| serial_cells(&field)));

    let mut group = c.benchmark_group("marching cubes 128^3");
    for &workers in &[1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            let extractor = MarchingCubes::new(0.0).with_workers(workers);
            b.iter(|| extractor.extract(&field))
        });
    }
    group.finish();
}

fn attribute_benchmark(c: &mut Criterion) {
    let mesh = MarchingCubes::new(0.0).extract(&field(96));

    c.bench_function("normals and uvs", |b| {
        b.iter(|| {
            let mut mesh = mesh.clone();
            compute_uvs(&mut mesh, DEFAULT_UV_SCALE);
            mesh
        })
    });
    c.bench_function("export glb", |b| b.iter(|| export_glb(&mesh, false)));
}

criterion_group!(benches, extraction_benchmark, attribute_benchmark);
criterion_main!(benches);
