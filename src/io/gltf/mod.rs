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

//! Binary glTF 2.0 export and import.
//!
//! The exporter writes one mesh with one triangle primitive, a single vertex
//! color material and a one-node scene. The importer accepts any compliant
//! document whose buffers are embedded, and merges every triangle primitive
//! into one [`Mesh`](crate::Mesh).

mod buffers;
mod glb;
mod reader;
mod view;
mod writer;

pub use self::{
    reader::{import_glb, import_glb_from_path},
    writer::{export_glb, export_glb_to_path, GENERATOR, MATERIAL_NAME},
};

#[cfg(test)]
mod tests {
    use super::{glb::to_glb, *};
    use crate::{
        attributes::compute_normals,
        error::Error,
        implicit::Sphere,
        marching_cubes::extract,
        math::{vec3, Bounds, Vec3},
        mesh::{Mesh, DEFAULT_COLOR},
        sampler::sample_grid,
    };

    fn sphere() -> Mesh {
        let mut mesh = extract(&sample_grid(&Sphere::new(0.5), 10, Bounds::centered(1.0)), 0.0);
        compute_normals(&mut mesh);
        mesh
    }

    /// A glTF JSON document with one embedded buffer holding the triangle
    /// (0,0,0) (1,0,0) (0,1,0), optionally followed by indices.
    fn embedded(base64: &str, byte_length: usize, attributes: &str, indices: &str) -> Vec<u8> {
        format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                "buffers": [{{
                    "byteLength": {},
                    "uri": "data:application/octet-stream;base64,{}"
                }}],
                "bufferViews": [
                    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
                    {{ "buffer": 0, "byteOffset": 36, "byteLength": {} }}
                ],
                "accessors": [
                    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                       "min": [0, 0, 0], "max": [1, 1, 0] }},
                    {{ "bufferView": 1, "componentType": {}, "count": 3, "type": "SCALAR" }}
                ],
                "meshes": [{{ "primitives": [{{ "attributes": {{ {} }} {} }}] }}]
            }}"#,
            byte_length,
            base64,
            byte_length - 36,
            if byte_length - 36 == 8 { 5123 } else { 5121 },
            attributes,
            indices
        )
        .into_bytes()
    }

    fn f32_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes().to_vec()).collect()
    }

    /// A GLB holding the triangle (0,0,0) (1,0,0) (0,1,0) behind accessor 0,
    /// followed by `extra` bytes behind accessor 1.
    fn triangle_glb(extra: &[u8], accessor: &str, primitive: &str) -> Vec<u8> {
        let mut bin = f32_bytes(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        bin.extend_from_slice(extra);
        let json = format!(
            r#"{{
                "asset": {{ "version": "2.0" }},
                "buffers": [{{ "byteLength": {} }}],
                "bufferViews": [
                    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
                    {{ "buffer": 0, "byteOffset": 36, "byteLength": {} }}
                ],
                "accessors": [
                    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3" }},
                    {{ "bufferView": 1, {} }}
                ],
                "meshes": [{{ "primitives": [{}] }}]
            }}"#,
            bin.len(),
            extra.len(),
            accessor,
            primitive
        );
        to_glb(json.as_bytes(), &bin)
    }

    const U16_INDEXED: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA=";
    const U8_INDEXED: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAECAA==";

    #[test]
    fn test_round_trip_preserves_geometry() {
        let mut mesh = sphere();
        mesh.set_uniform_color(vec3(0.2, 0.4, 0.6));

        let imported = import_glb(&export_glb(&mesh, true).unwrap()).unwrap();

        assert_eq!(imported.vertex_count(), mesh.vertex_count());
        assert_eq!(imported.triangle_count(), mesh.triangle_count());
        assert_eq!(imported.positions, mesh.positions);
        assert_eq!(imported.indices, mesh.indices);
        assert_eq!(imported.normals, mesh.normals);
        assert_eq!(imported.colors, mesh.colors);
        assert!(!imported.has_uvs());
    }

    #[test]
    fn test_colors_are_optional() {
        let mut mesh = sphere();
        mesh.set_uniform_color(Vec3::one());

        let imported = import_glb(&export_glb(&mesh, false).unwrap()).unwrap();
        assert!(imported.has_normals());
        assert!(!imported.has_colors());
    }

    #[test]
    fn test_export_writes_front_face_order() {
        let mut mesh = Mesh::new();
        mesh.positions = vec![Vec3::zero(), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)];
        mesh.indices = vec![0, 1, 2];

        let glb = export_glb(&mesh, false).unwrap();
        // The index view is the last twelve bytes of the buffer
        let tail: Vec<u32> = glb[glb.len() - 12..]
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(tail, vec![0, 2, 1]);
    }

    #[test]
    fn test_export_rejects_empty_mesh() {
        assert!(matches!(export_glb(&Mesh::new(), true), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_import_narrow_indices() {
        for &(data, len) in &[(U16_INDEXED, 44), (U8_INDEXED, 40)] {
            let doc = embedded(data, len, r#""POSITION": 0"#, r#", "indices": 1"#);
            let mesh = import_glb(&doc).unwrap();
            assert_eq!(mesh.vertex_count(), 3);
            assert_eq!(mesh.indices, vec![0, 2, 1]);
        }
    }

    #[test]
    fn test_import_unindexed_primitive() {
        let mesh = import_glb(&embedded(U16_INDEXED, 44, r#""POSITION": 0"#, "")).unwrap();
        assert_eq!(mesh.indices, vec![0, 2, 1]);
        assert_eq!(mesh.positions[1], vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_import_requires_positions() {
        match import_glb(&embedded(U16_INDEXED, 44, "", r#", "indices": 1"#)) {
            Err(Error::MissingAttribute {
                mesh,
                primitive,
                attribute,
            }) => {
                assert_eq!((mesh, primitive), (0, 0));
                assert_eq!(attribute, "POSITION");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_import_rejects_out_of_range_accessor() {
        let doc = embedded(U16_INDEXED, 44, r#""POSITION": 7"#, "");
        assert!(matches!(import_glb(&doc), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_import_rejects_truncated_view() {
        // Declares more index bytes than the buffer holds
        let doc = embedded(U16_INDEXED, 44, r#""POSITION": 0"#, r#", "indices": 1"#);
        let doc = String::from_utf8(doc).unwrap().replace(
            r#""byteOffset": 36, "byteLength": 8"#,
            r#""byteOffset": 36, "byteLength": 80"#,
        );
        assert!(matches!(import_glb(doc.as_bytes()), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_import_rejects_malformed_container() {
        let mut glb = export_glb(&sphere(), false).unwrap();
        glb.truncate(glb.len() / 2);
        assert!(matches!(import_glb(&glb), Err(Error::Malformed(_))));

        assert!(matches!(import_glb(b"glTF\x02\0\0\0"), Err(Error::Malformed(_))));
        assert!(matches!(import_glb(b"not a model"), Err(Error::Json(_))));
    }

    #[test]
    fn test_import_merges_strided_primitives() {
        // Interleaved position and normal, stride 24
        let mut bin = Vec::new();
        for p in &[Vec3::zero(), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)] {
            bin.extend(f32_bytes(&[p.x, p.y, p.z, 0.0, 0.0, 1.0]));
        }
        for i in &[0u16, 1, 2, 0] {
            bin.extend_from_slice(&i.to_le_bytes());
        }
        bin.extend(f32_bytes(&[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0]));
        bin.extend(f32_bytes(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]));
        assert_eq!(bin.len(), 152);

        let json = r#"{
            "asset": { "version": "2.0" },
            "buffers": [{ "byteLength": 152 }],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 72, "byteStride": 24 },
                { "buffer": 0, "byteOffset": 72, "byteLength": 6 },
                { "buffer": 0, "byteOffset": 80, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 116, "byteLength": 36 }
            ],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3" },
                {
                    "bufferView": 0, "byteOffset": 12,
                    "componentType": 5126, "count": 3, "type": "VEC3"
                },
                { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" },
                { "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC3" },
                { "bufferView": 3, "componentType": 5126, "count": 3, "type": "VEC3" }
            ],
            "meshes": [
                { "primitives": [
                    { "attributes": { "POSITION": 0, "NORMAL": 1 }, "indices": 2 },
                    { "attributes": { "POSITION": 3 }, "indices": 2, "mode": 1 }
                ] },
                { "primitives": [{ "attributes": { "POSITION": 3, "COLOR_0": 4 } }] }
            ]
        }"#;

        let mesh = import_glb(&to_glb(json.as_bytes(), &bin)).unwrap();

        // The line primitive is skipped
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 2, 1, 3, 5, 4]);
        assert_eq!(mesh.positions[1], vec3(1.0, 0.0, 0.0));
        assert_eq!(mesh.positions[4], vec3(1.0, 0.0, 1.0));

        assert_eq!(mesh.normals.len(), 6);
        assert!(mesh.normals[..3].iter().all(|&n| n == vec3(0.0, 0.0, 1.0)));
        assert_eq!(mesh.normals[4], Vec3::zero());

        assert_eq!(mesh.colors.len(), 6);
        assert_eq!(mesh.colors[0], DEFAULT_COLOR);
        assert_eq!(mesh.colors[3], vec3(1.0, 0.0, 0.0));
        assert_eq!(mesh.colors[5], vec3(0.0, 0.0, 1.0));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_import_float_vec3_colors() {
        let colors = f32_bytes(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let glb = triangle_glb(
            &colors,
            r#""componentType": 5126, "count": 3, "type": "VEC3""#,
            r#"{ "attributes": { "POSITION": 0, "COLOR_0": 1 } }"#,
        );

        let mesh = import_glb(&glb).unwrap();
        assert_eq!(
            mesh.colors,
            vec![vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 1.0)]
        );
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_import_rejects_byte_colors() {
        let glb = triangle_glb(
            &[255; 12],
            r#""componentType": 5121, "normalized": true, "count": 3, "type": "VEC4""#,
            r#"{ "attributes": { "POSITION": 0, "COLOR_0": 1 } }"#,
        );
        assert!(matches!(import_glb(&glb), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_import_rejects_signed_or_vector_indices() {
        let mut indices = Vec::new();
        for i in &[0i16, 1, 2] {
            indices.extend_from_slice(&i.to_le_bytes());
        }
        let primitive = r#"{ "attributes": { "POSITION": 0 }, "indices": 1 }"#;

        let signed = triangle_glb(
            &indices,
            r#""componentType": 5122, "count": 3, "type": "SCALAR""#,
            primitive,
        );
        assert!(matches!(import_glb(&signed), Err(Error::Unsupported(_))));

        let vector = triangle_glb(
            &indices,
            r#""componentType": 5123, "count": 1, "type": "VEC3""#,
            primitive,
        );
        assert!(matches!(import_glb(&vector), Err(Error::Unsupported(_))));
    }
}
