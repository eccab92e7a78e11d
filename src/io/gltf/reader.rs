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
use super::{buffers::resolve_buffers, glb, view::AccessorView};
use crate::{
    error::{Error, Result},
    io::log_failure,
    mesh::Mesh,
};
use gltf_dep::json as gj;
use gj::{
    mesh::{Mode, Semantic},
    validation::Checked,
};
use std::{fs, path::Path};

/// Decode every triangle primitive of a glTF file into a single mesh.
///
/// Accepts binary glTF, or a JSON document whose buffers are embedded as
/// base64 `data:` URIs. Primitives are appended in document order with
/// their indices rebased; attributes present on some primitives but not
/// others are padded.
pub fn import_glb(bytes: &[u8]) -> Result<Mesh> {
    read_mesh(bytes).map_err(log_failure("glTF import"))
}

/// Read and decode the glTF file at `path`.
pub fn import_glb_from_path<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let bytes = fs::read(path)
        .map_err(Error::from)
        .map_err(log_failure("glTF import"))?;
    import_glb(&bytes)
}

fn read_mesh(bytes: &[u8]) -> Result<Mesh> {
    let (root, blob) = if bytes.starts_with(&glb::MAGIC.to_le_bytes()) {
        let glb = gltf_dep::binary::Glb::from_slice(bytes)
            .map_err(|err| Error::Malformed(err.to_string()))?;
        let root: gj::Root = serde_json::from_slice(&glb.json)?;
        (root, glb.bin.map(|bin| bin.into_owned()))
    } else {
        (serde_json::from_slice(bytes)?, None)
    };

    let buffers = resolve_buffers(&root, blob)?;
    let mut mesh = Mesh::new();

    for (mesh_index, gltf_mesh) in root.meshes.iter().enumerate() {
        for (primitive_index, primitive) in gltf_mesh.primitives.iter().enumerate() {
            if primitive.mode != Checked::Valid(Mode::Triangles) {
                log::warn!(
                    "skipping mesh {} primitive {}: not a triangle list",
                    mesh_index,
                    primitive_index
                );
                continue;
            }

            let part =
                read_primitive(&root, primitive, &buffers)?.ok_or(Error::MissingAttribute {
                    mesh: mesh_index,
                    primitive: primitive_index,
                    attribute: "POSITION",
                })?;
            mesh.append(part);
        }
    }

    if mesh.is_empty() {
        return Err(Error::EmptyMesh);
    }

    log::debug!(
        "imported {} vertices and {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Decode one primitive, or `None` if it has no positions.
fn read_primitive(
    root: &gj::Root,
    primitive: &gj::mesh::Primitive,
    buffers: &[Vec<u8>],
) -> Result<Option<Mesh>> {
    let attribute = |semantic: Semantic| {
        primitive
            .attributes
            .get(&Checked::Valid(semantic))
            .copied()
    };
    let view = |index| AccessorView::new(root, index, buffers);

    let positions = match attribute(Semantic::Positions) {
        Some(index) => view(index)?.read_vec3()?,
        None => return Ok(None),
    };
    let vertex_count = positions.len();

    let normals = match attribute(Semantic::Normals) {
        Some(index) => per_vertex(view(index)?, "NORMAL", vertex_count)?.read_vec3()?,
        None => Vec::new(),
    };
    let colors = match attribute(Semantic::Colors(0)) {
        Some(index) => per_vertex(view(index)?, "COLOR_0", vertex_count)?.read_colors()?,
        None => Vec::new(),
    };

    let mut indices = match primitive.indices {
        Some(index) => view(index)?.read_indices()?,
        None => (0..vertex_count as u32).collect(),
    };

    if indices.len() % 3 != 0 {
        return Err(Error::Malformed(format!(
            "{} indices do not form whole triangles",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(Error::Malformed(format!(
            "index {} out of range for {} vertices",
            bad, vertex_count
        )));
    }

    // Files store the front face; meshes store the opposite order
    for triangle in indices.chunks_exact_mut(3) {
        triangle.swap(1, 2);
    }

    Ok(Some(Mesh {
        positions,
        normals,
        colors,
        uvs: Vec::new(),
        indices,
    }))
}

fn per_vertex<'a>(
    view: AccessorView<'a>,
    name: &str,
    vertex_count: usize,
) -> Result<AccessorView<'a>> {
    if view.len() == vertex_count {
        Ok(view)
    } else {
        Err(Error::Malformed(format!(
            "{} has {} elements for {} vertices",
            name,
            view.len(),
            vertex_count
        )))
    }
}
