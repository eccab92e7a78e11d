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

//! Mesh interchange: binary glTF in both directions, OBJ out.

pub mod gltf;
pub mod obj;

use crate::{
    error::{Error, Result},
    mesh::Mesh,
};
use std::path::Path;

/// Options for [`export_to_path`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub include_colors: bool,
    /// Only honoured by OBJ; glTF files never carry texture coordinates.
    pub include_uvs: bool,
}

/// Export `mesh` to `path`, as binary glTF when the extension is `.glb` or
/// `.gltf` (in any case) and as OBJ otherwise.
pub fn export_to_path<P: AsRef<Path>>(
    path: P,
    mesh: &Mesh,
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();
    if is_gltf_path(path) {
        gltf::export_glb_to_path(mesh, options.include_colors, path)
    } else {
        let obj = obj::ObjOptions {
            include_colors: options.include_colors,
            include_uvs: options.include_uvs,
        };
        obj::export_obj_to_path(mesh, &obj, path)
    }
}

fn is_gltf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ext.eq_ignore_ascii_case("glb") || ext.eq_ignore_ascii_case("gltf")
        })
}

/// Log an interchange failure before handing it back to the caller.
pub(crate) fn log_failure(context: &'static str) -> impl Fn(Error) -> Error {
    move |err| {
        log::warn!("{} failed: {}", context, err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{implicit::Sphere, marching_cubes::extract, math::Bounds, sampler::sample_grid};
    use std::{fs, path::PathBuf};

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("isomesh-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_extension_dispatch() {
        assert!(is_gltf_path(Path::new("out/model.glb")));
        assert!(is_gltf_path(Path::new("MODEL.GLTF")));
        assert!(!is_gltf_path(Path::new("model.obj")));
        assert!(!is_gltf_path(Path::new("glb")));
    }

    #[test]
    fn test_export_to_path_writes_both_formats() {
        let mesh = extract(&sample_grid(&Sphere::new(0.5), 8, Bounds::centered(1.0)), 0.0);
        let options = ExportOptions::default();

        let glb = scratch("sphere.glb");
        export_to_path(&glb, &mesh, &options).unwrap();
        let imported = gltf::import_glb_from_path(&glb).unwrap();
        assert_eq!(imported.triangle_count(), mesh.triangle_count());

        let obj = scratch("sphere.obj");
        export_to_path(&obj, &mesh, &options).unwrap();
        let text = fs::read_to_string(&obj).unwrap();
        assert!(text.starts_with("# Generated by"));

        fs::remove_file(glb).unwrap();
        fs::remove_file(obj).unwrap();
    }

    #[test]
    fn test_export_to_path_reports_empty_mesh() {
        let path = scratch("empty.obj");
        assert!(matches!(
            export_to_path(&path, &Mesh::new(), &ExportOptions::default()),
            Err(Error::EmptyMesh)
        ));
    }
}
