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
use super::glb;
use crate::{
    error::{Error, Result},
    io::log_failure,
    math::Vec3,
    mesh::Mesh,
};
use gltf_dep::json as gj;
use gj::validation::{Checked, USize64};
use serde_json::json;
use std::{collections::BTreeMap, fs, path::Path};

pub const GENERATOR: &str = concat!("isomesh ", env!("CARGO_PKG_VERSION"));
pub const MATERIAL_NAME: &str = "VertexColorMaterial";

/// Encode `mesh` as a binary glTF file.
///
/// The buffer holds positions, then normals and colors when present (colors
/// only if `include_colors` is set), then the indices in front face order.
pub fn export_glb(mesh: &Mesh, include_colors: bool) -> Result<Vec<u8>> {
    build_glb(mesh, include_colors).map_err(log_failure("glTF export"))
}

/// Encode `mesh` as binary glTF and write it to `path`.
pub fn export_glb_to_path<P: AsRef<Path>>(
    mesh: &Mesh,
    include_colors: bool,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = export_glb(mesh, include_colors)?;
    fs::write(path, &bytes)
        .map_err(Error::from)
        .map_err(log_failure("glTF export"))?;
    log::info!("wrote {} bytes of glTF to {}", bytes.len(), path.display());
    Ok(())
}

fn build_glb(mesh: &Mesh, include_colors: bool) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(Error::EmptyMesh);
    }

    let mut builder = GlbBuilder::default();
    let vertex_count = mesh.vertex_count();
    let mut attributes = BTreeMap::new();

    let (min, max) = match mesh.bounds() {
        Some(b) => (b.min, b.max),
        None => (Vec3::zero(), Vec3::zero()),
    };
    let view = builder.push_view(&vec3_bytes(&mesh.positions), gj::buffer::Target::ArrayBuffer);
    let positions = builder.push_accessor(
        view,
        vertex_count,
        gj::accessor::ComponentType::F32,
        gj::accessor::Type::Vec3,
        Some(json!(min.to_array())),
        Some(json!(max.to_array())),
    );
    attributes.insert(Checked::Valid(gj::mesh::Semantic::Positions), positions);

    if mesh.has_normals() {
        let view = builder.push_view(&vec3_bytes(&mesh.normals), gj::buffer::Target::ArrayBuffer);
        let normals = builder.push_accessor(
            view,
            vertex_count,
            gj::accessor::ComponentType::F32,
            gj::accessor::Type::Vec3,
            None,
            None,
        );
        attributes.insert(Checked::Valid(gj::mesh::Semantic::Normals), normals);
    }

    if include_colors && mesh.has_colors() {
        let mut bytes = Vec::with_capacity(vertex_count * 16);
        for c in &mesh.colors {
            for f in &[c.x, c.y, c.z, 1.0] {
                bytes.extend_from_slice(&f.to_le_bytes());
            }
        }
        let view = builder.push_view(&bytes, gj::buffer::Target::ArrayBuffer);
        let colors = builder.push_accessor(
            view,
            vertex_count,
            gj::accessor::ComponentType::F32,
            gj::accessor::Type::Vec4,
            None,
            None,
        );
        attributes.insert(Checked::Valid(gj::mesh::Semantic::Colors(0)), colors);
    }

    let mut bytes = Vec::with_capacity(mesh.indices.len() * 4);
    for [a, b, c] in mesh.triangles() {
        for i in &[a, c, b] {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
    }
    let view = builder.push_view(&bytes, gj::buffer::Target::ElementArrayBuffer);
    let indices = builder.push_accessor(
        view,
        mesh.triangle_count() * 3,
        gj::accessor::ComponentType::U32,
        gj::accessor::Type::Scalar,
        None,
        None,
    );

    builder.finish_scene(attributes, indices);
    builder.into_glb()
}

fn vec3_bytes(values: &[Vec3]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 12);
    for v in values {
        bytes.extend_from_slice(&v.x.to_le_bytes());
        bytes.extend_from_slice(&v.y.to_le_bytes());
        bytes.extend_from_slice(&v.z.to_le_bytes());
    }
    bytes
}

/// Accumulates the JSON document and the single binary buffer it describes.
#[derive(Default)]
struct GlbBuilder {
    root: gj::Root,
    buffer: Vec<u8>,
}

impl GlbBuilder {
    fn align_buffer(&mut self) {
        let len = self.buffer.len() + glb::padding(self.buffer.len());
        self.buffer.resize(len, 0);
    }

    fn push_view(
        &mut self,
        data: &[u8],
        target: gj::buffer::Target,
    ) -> gj::Index<gj::buffer::View> {
        self.align_buffer();
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(data);

        let index = gj::Index::new(self.root.buffer_views.len() as u32);
        self.root.buffer_views.push(gj::buffer::View {
            buffer: gj::Index::new(0),
            byte_offset: Some(USize64(offset as u64)),
            byte_length: USize64(data.len() as u64),
            byte_stride: None,
            target: Some(Checked::Valid(target)),
            name: None,
            extensions: None,
            extras: gj::Extras::default(),
        });
        index
    }

    fn push_accessor(
        &mut self,
        view: gj::Index<gj::buffer::View>,
        count: usize,
        component_type: gj::accessor::ComponentType,
        type_: gj::accessor::Type,
        min: Option<gj::Value>,
        max: Option<gj::Value>,
    ) -> gj::Index<gj::Accessor> {
        let index = gj::Index::new(self.root.accessors.len() as u32);
        self.root.accessors.push(gj::Accessor {
            buffer_view: Some(view),
            byte_offset: Some(USize64(0)),
            count: USize64(count as u64),
            component_type: Checked::Valid(gj::accessor::GenericComponentType(component_type)),
            type_: Checked::Valid(type_),
            min,
            max,
            normalized: false,
            name: None,
            sparse: None,
            extensions: None,
            extras: gj::Extras::default(),
        });
        index
    }

    fn finish_scene(
        &mut self,
        attributes: BTreeMap<Checked<gj::mesh::Semantic>, gj::Index<gj::Accessor>>,
        indices: gj::Index<gj::Accessor>,
    ) {
        self.root.materials.push(gj::Material {
            name: Some(MATERIAL_NAME.into()),
            double_sided: true,
            pbr_metallic_roughness: gj::material::PbrMetallicRoughness {
                base_color_factor: gj::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
                metallic_factor: gj::material::StrengthFactor(0.0),
                roughness_factor: gj::material::StrengthFactor(0.8),
                ..Default::default()
            },
            ..Default::default()
        });

        self.root.meshes.push(gj::Mesh {
            name: None,
            primitives: vec![gj::mesh::Primitive {
                attributes,
                extensions: None,
                extras: gj::Extras::default(),
                indices: Some(indices),
                material: Some(gj::Index::new(0)),
                mode: Checked::Valid(gj::mesh::Mode::Triangles),
                targets: None,
            }],
            weights: None,
            extensions: None,
            extras: gj::Extras::default(),
        });

        self.root.nodes.push(gj::Node {
            mesh: Some(gj::Index::new(0)),
            ..gj::Node::default()
        });

        self.root.scenes.push(gj::Scene {
            name: None,
            nodes: vec![gj::Index::new(0)],
            extensions: None,
            extras: gj::Extras::default(),
        });
        self.root.scene = Some(gj::Index::new(0));

        self.root.asset = gj::Asset {
            generator: Some(GENERATOR.into()),
            version: "2.0".into(),
            ..Default::default()
        };
    }

    fn into_glb(mut self) -> Result<Vec<u8>> {
        self.align_buffer();
        self.root.buffers.push(gj::Buffer {
            byte_length: USize64(self.buffer.len() as u64),
            name: None,
            uri: None,
            extensions: None,
            extras: gj::Extras::default(),
        });

        let json = serde_json::to_vec(&self.root)?;
        Ok(glb::to_glb(&json, &self.buffer))
    }
}
