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
    error::{Error, Result},
    math::{Bounds, Vec3},
};
use std::borrow::Cow;

/// A cubic grid of scalar samples covering an axis-aligned box.
///
/// Samples are stored flattened with x varying fastest, so the sample at grid
/// point (x, y, z) lives at `x + y * res + z * res * res`. Grid point (0, 0, 0)
/// sits on `bounds.min` and (res-1, res-1, res-1) on `bounds.max`.
///
/// The samples may be borrowed from the caller or owned by the field.
#[derive(Debug, Clone)]
pub struct ScalarField<'a> {
    values: Cow<'a, [f32]>,
    resolution: usize,
    bounds: Bounds,
}

impl<'a> ScalarField<'a> {
    /// Wrap a caller-owned sample array.
    ///
    /// Fails if `values` does not hold exactly `resolution^3` samples.
    pub fn new(values: &'a [f32], resolution: usize, bounds: Bounds) -> Result<Self> {
        Self::from_cow(Cow::Borrowed(values), resolution, bounds)
    }

    /// Take ownership of a sample array.
    pub fn from_vec(values: Vec<f32>, resolution: usize, bounds: Bounds) -> Result<Self> {
        Self::from_cow(Cow::Owned(values), resolution, bounds)
    }

    /// Samples produced inside the crate, already sized to `resolution^3`.
    pub(crate) fn from_samples(
        values: Vec<f32>,
        resolution: usize,
        bounds: Bounds,
    ) -> ScalarField<'static> {
        debug_assert_eq!(values.len(), resolution.pow(3));
        ScalarField {
            values: Cow::Owned(values),
            resolution,
            bounds,
        }
    }

    fn from_cow(values: Cow<'a, [f32]>, resolution: usize, bounds: Bounds) -> Result<Self> {
        let expected = resolution.pow(3);
        if values.len() != expected {
            return Err(Error::FieldSize {
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            values,
            resolution,
            bounds,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Whether the field describes at least one cell.
    pub fn has_cells(&self) -> bool {
        self.resolution >= 2 && !self.values.is_empty()
    }

    /// The number of cells along each axis.
    pub fn cells_per_axis(&self) -> usize {
        self.resolution.saturating_sub(1)
    }

    /// World-space extent of one cell along each axis.
    pub fn cell_size(&self) -> Vec3 {
        match self.cells_per_axis() {
            0 => Vec3::zero(),
            n => self.bounds.size() / n as f32,
        }
    }

    /// Length of the diagonal of one cell.
    pub fn cell_diagonal(&self) -> f32 {
        self.cell_size().len()
    }

    /// The sample at grid point (x, y, z).
    pub fn value(&self, x: usize, y: usize, z: usize) -> f32 {
        self.values[x + self.resolution * (y + self.resolution * z)]
    }

    /// The world-space position of grid point (x, y, z).
    pub fn position(&self, x: usize, y: usize, z: usize) -> Vec3 {
        grid_position(&self.bounds, self.cell_size(), x, y, z)
    }
}

pub(crate) fn grid_position(
    bounds: &Bounds,
    cell_size: Vec3,
    x: usize,
    y: usize,
    z: usize,
) -> Vec3 {
    Vec3::new(
        bounds.min.x + x as f32 * cell_size.x,
        bounds.min.y + y as f32 * cell_size.y,
        bounds.min.z + z as f32 * cell_size.z,
    )
}
