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
use crate::math::Vec3;

/// A source capable of sampling a scalar field at arbitrary points.
pub trait Source {
    /// Samples the field at the given point.
    ///
    /// For signed distance fields this is negative inside the surface, so
    /// the surface is extracted at an isolevel of zero.
    fn sample(&self, p: Vec3) -> f32;
}

impl<F> Source for F
where
    F: Fn(Vec3) -> f32,
{
    fn sample(&self, p: Vec3) -> f32 {
        self(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_twice<S: Source>(source: &S, p: Vec3) -> f32 {
        source.sample(p) + source.sample(p)
    }

    #[test]
    fn test_closures_are_sources() {
        let offset = 2.0;
        let plane = |p: Vec3| p.y - offset;

        assert_eq!(plane.sample(Vec3::new(5.0, 3.0, -1.0)), 1.0);
        assert_eq!(sample_twice(&plane, Vec3::zero()), -4.0);
    }
}
