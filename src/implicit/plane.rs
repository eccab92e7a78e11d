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

/// A half-space bounded by a plane.
///
/// The field is `dot(normal, p) + offset`, so points on the side the normal
/// faces are outside. It is a true distance only for a unit normal.
#[derive(Debug, Copy, Clone)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }
}

impl Source for Plane {
    fn sample(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.offset
    }
}
