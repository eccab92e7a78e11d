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
use crate::{math::Vec3, source::Source};

/// A torus, or doughnut-shape, lying in the XZ plane around the Y axis.
#[derive(Debug, Copy, Clone)]
pub struct Torus {
    /// The radius from the center point to the middle of the outer ring.
    pub radius: f32,
    /// The radius of the outer ring itself.
    pub tube_radius: f32,
}

impl Torus {
    /// Create a new torus from the primary radius and radius of the outer ring.
    pub fn new(radius: f32, tube_radius: f32) -> Self {
        Self {
            radius,
            tube_radius,
        }
    }
}

impl Source for Torus {
    fn sample(&self, p: Vec3) -> f32 {
        let q = p.xz().len() - self.radius;
        (q * q + p.y * p.y).sqrt() - self.tube_radius
    }
}
