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

//! Wavefront OBJ export.

use super::{gltf::GENERATOR, log_failure};
use crate::{
    error::{Error, Result},
    mesh::Mesh,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Which optional vertex attributes to write. Normals are always written
/// when the mesh has them.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ObjOptions {
    /// Append `r g b` to each `v` line.
    pub include_colors: bool,
    /// Write `vt` lines and reference them from faces.
    pub include_uvs: bool,
}

/// Write `mesh` as OBJ text.
///
/// Faces are written in front face order with 1-based references. Numbers
/// use Rust's locale-independent float formatting.
pub fn write_obj<W: Write>(mesh: &Mesh, options: &ObjOptions, out: &mut W) -> Result<()> {
    if mesh.is_empty() {
        return Err(Error::EmptyMesh);
    }

    let colors = options.include_colors && mesh.has_colors();
    let uvs = options.include_uvs && mesh.has_uvs();
    let normals = mesh.has_normals();

    writeln!(out, "# Generated by {}", GENERATOR)?;
    writeln!(out, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(out, "# Triangles: {}", mesh.triangle_count())?;
    if colors {
        writeln!(out, "# With vertex colors")?;
    }
    if uvs {
        writeln!(out, "# With UV coordinates")?;
    }
    writeln!(out)?;

    for (i, p) in mesh.positions.iter().enumerate() {
        if colors {
            let c = mesh.colors[i];
            writeln!(out, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.x, c.y, c.z)?;
        } else {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
    }

    if uvs {
        writeln!(out)?;
        for uv in &mesh.uvs {
            writeln!(out, "vt {} {}", uv.x, uv.y)?;
        }
    }

    if normals {
        writeln!(out)?;
        for n in &mesh.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    writeln!(out)?;
    for [a, b, c] in mesh.triangles() {
        write!(out, "f")?;
        for &i in &[a, c, b] {
            let i = i + 1;
            match (uvs, normals) {
                (true, true) => write!(out, " {}/{}/{}", i, i, i)?,
                (false, true) => write!(out, " {}//{}", i, i)?,
                (true, false) => write!(out, " {}/{}", i, i)?,
                (false, false) => write!(out, " {}", i)?,
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Render `mesh` as an OBJ document.
pub fn export_obj(mesh: &Mesh, options: &ObjOptions) -> Result<String> {
    let mut out = Vec::new();
    write_obj(mesh, options, &mut out).map_err(log_failure("OBJ export"))?;
    String::from_utf8(out)
        .map_err(|err| Error::Malformed(err.to_string()))
        .map_err(log_failure("OBJ export"))
}

/// Write `mesh` as OBJ to the file at `path`.
pub fn export_obj_to_path<P: AsRef<Path>>(
    mesh: &Mesh,
    options: &ObjOptions,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let result = if mesh.is_empty() {
        Err(Error::EmptyMesh)
    } else {
        File::create(path).map_err(Error::from).and_then(|file| {
            let mut out = BufWriter::new(file);
            write_obj(mesh, options, &mut out)?;
            out.flush()?;
            Ok(())
        })
    };
    result.map_err(log_failure("OBJ export"))?;
    log::info!("wrote OBJ to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{vec2, vec3, Vec3};

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.positions = vec![Vec3::zero(), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)];
        mesh.indices = vec![0, 1, 2];
        mesh
    }

    fn lines<'a>(text: &'a str, prefix: &'a str) -> Vec<&'a str> {
        text.lines().filter(|l| l.starts_with(prefix)).collect()
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert!(matches!(
            export_obj(&Mesh::new(), &ObjOptions::default()),
            Err(Error::EmptyMesh)
        ));
    }

    #[test]
    fn test_single_triangle() {
        let text = export_obj(&triangle(), &ObjOptions::default()).unwrap();

        assert_eq!(lines(&text, "v ").len(), 3);
        assert_eq!(lines(&text, "f ").len(), 1);
        assert_eq!(lines(&text, "f "), vec!["f 1 3 2"]);
        assert_eq!(lines(&text, "v ")[1], "v 1 0 0");
        assert!(text.starts_with("# Generated by isomesh"));
        assert!(text.contains("# Vertices: 3\n# Triangles: 1\n"));
    }

    #[test]
    fn test_face_formats_follow_attributes() {
        let mut mesh = triangle();
        mesh.normals = vec![vec3(0.0, 0.0, -1.0); 3];
        let text = export_obj(&mesh, &ObjOptions::default()).unwrap();
        assert_eq!(lines(&text, "f "), vec!["f 1//1 3//3 2//2"]);
        assert_eq!(lines(&text, "vn ").len(), 3);

        mesh.uvs = vec![vec2(0.5, 0.25); 3];
        let both = ObjOptions {
            include_colors: false,
            include_uvs: true,
        };
        let text = export_obj(&mesh, &both).unwrap();
        assert_eq!(lines(&text, "f "), vec!["f 1/1/1 3/3/3 2/2/2"]);
        assert_eq!(lines(&text, "vt "), vec!["vt 0.5 0.25"; 3]);

        mesh.normals.clear();
        let text = export_obj(&mesh, &both).unwrap();
        assert_eq!(lines(&text, "f "), vec!["f 1/1 3/3 2/2"]);
    }

    #[test]
    fn test_colors_extend_vertex_lines() {
        let mut mesh = triangle();
        mesh.set_uniform_color(vec3(0.5, 0.25, 1.0));

        let plain = export_obj(&mesh, &ObjOptions::default()).unwrap();
        assert!(!plain.contains("# With vertex colors"));

        let options = ObjOptions {
            include_colors: true,
            include_uvs: false,
        };
        let text = export_obj(&mesh, &options).unwrap();
        assert!(text.contains("# With vertex colors"));
        assert_eq!(lines(&text, "v ")[0], "v 0 0 0 0.5 0.25 1");
    }
}
