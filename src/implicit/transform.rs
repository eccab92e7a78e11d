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

/// Moves an implicit function by `offset`.
#[derive(Debug, Copy, Clone)]
pub struct Translate<S> {
    pub source: S,
    pub offset: Vec3,
}

impl<S> Translate<S> {
    pub fn new(source: S, offset: Vec3) -> Self {
        Self { source, offset }
    }
}

impl<S: Source> Source for Translate<S> {
    fn sample(&self, p: Vec3) -> f32 {
        self.source.sample(p - self.offset)
    }
}

/// Uniformly scales an implicit function about the origin.
///
/// The result is rescaled too, so a distance field stays a distance field.
#[derive(Debug, Copy, Clone)]
pub struct Scale<S> {
    pub source: S,
    pub factor: f32,
}

impl<S> Scale<S> {
    pub fn new(source: S, factor: f32) -> Self {
        Self { source, factor }
    }
}

impl<S: Source> Source for Scale<S> {
    fn sample(&self, p: Vec3) -> f32 {
        self.source.sample(p / self.factor) * self.factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implicit::Sphere;

    #[test]
    fn test_translate() {
        let moved = Translate::new(Sphere::new(1.0), Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(moved.sample(Vec3::new(2.0, 0.0, 0.0)), -1.0);
        assert_eq!(moved.sample(Vec3::new(3.0, 0.0, 0.0)), 0.0);
        assert_eq!(moved.sample(Vec3::zero()), 1.0);
    }

    #[test]
    fn test_scale() {
        let scaled = Scale::new(Sphere::new(1.0), 2.0);

        assert_eq!(scaled.sample(Vec3::zero()), -2.0);
        assert_eq!(scaled.sample(Vec3::new(0.0, 2.0, 0.0)), 0.0);
        assert_eq!(scaled.sample(Vec3::new(0.0, 0.0, 6.0)), 4.0);
    }
}
