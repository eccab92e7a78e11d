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

/// A sphere centered on the origin.
#[derive(Debug, Copy, Clone)]
pub struct Sphere {
    /// The radius of the sphere.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere from the desired radius.
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Source for Sphere {
    fn sample(&self, p: Vec3) -> f32 {
        p.len() - self.radius
    }
}
