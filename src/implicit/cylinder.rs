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
    math::{vec2, Vec3},
    source::Source,
};

/// A capped cylinder, with its axis along Y.
#[derive(Debug, Copy, Clone)]
pub struct Cylinder {
    /// The radius of the cylinder.
    pub radius: f32,
    /// Half the length of the cylinder, the distance from the center point
    /// to each capped end.
    pub half_length: f32,
}

impl Cylinder {
    /// Create a capped cylinder from the desired radius and half of the desired
    /// length.
    pub fn new(radius: f32, half_length: f32) -> Self {
        Self {
            radius,
            half_length,
        }
    }
}

impl Source for Cylinder {
    fn sample(&self, p: Vec3) -> f32 {
        let q_r = p.xz().len() - self.radius;
        let q_y = p.y.abs() - self.half_length;
        let outside = vec2(q_r.max(0.0), q_y.max(0.0));
        q_r.max(q_y).min(0.0) + outside.len()
    }
}
