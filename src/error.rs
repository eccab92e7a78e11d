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
use thiserror::Error;

/// Errors raised while building fields or moving meshes in and out of
/// interchange formats.
///
/// Extraction itself never fails: degenerate input yields an empty mesh.
#[derive(Debug, Error)]
pub enum Error {
    #[error("mesh has no vertices")]
    EmptyMesh,

    #[error("mesh {mesh} primitive {primitive} has no {attribute} attribute")]
    MissingAttribute {
        mesh: usize,
        primitive: usize,
        attribute: &'static str,
    },

    #[error("scalar field expected {expected} samples, got {actual}")]
    FieldSize { expected: usize, actual: usize },

    #[error("malformed container: {0}")]
    Malformed(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
