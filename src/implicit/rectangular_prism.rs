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

/// A rectangular prism, or box.
#[derive(Debug, Copy, Clone)]
pub struct RectangularPrism {
    /// Half the extent of the box, the distance along each axis from the center
    /// point to the surface of the box.
    pub half_extent: Vec3,
}

impl RectangularPrism {
    /// Create a new rectangular prism from half the desired extents.
    pub fn new(half_extent: Vec3) -> Self {
        Self { half_extent }
    }
}

impl Source for RectangularPrism {
    fn sample(&self, p: Vec3) -> f32 {
        let q = p.abs() - self.half_extent;
        q.max(Vec3::zero()).len() + q.max_component().min(0.0)
    }
}

/// A box with its edges and corners rounded off.
///
/// The outer extent matches a [`RectangularPrism`] with the same
/// `half_extent`; the rounding eats into the box rather than growing it.
#[derive(Debug, Copy, Clone)]
pub struct RoundedBox {
    pub half_extent: Vec3,
    pub radius: f32,
}

impl RoundedBox {
    pub fn new(half_extent: Vec3, radius: f32) -> Self {
        Self {
            half_extent,
            radius,
        }
    }
}

impl Source for RoundedBox {
    fn sample(&self, p: Vec3) -> f32 {
        RectangularPrism::new(self.half_extent - self.radius).sample(p) - self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_prism() {
        let prism = RectangularPrism::new(Vec3::new(1.0, 2.0, 4.0));

        assert_eq!(prism.sample(Vec3::zero()), -1.0);
        assert_eq!(prism.sample(Vec3::new(1.0, 2.0, 4.0)), 0.0);
        assert_eq!(prism.sample(Vec3::new(0.0, 0.0, 8.0)), 4.0);
        assert_eq!(prism.sample(Vec3::new(8.0, 0.0, 0.0)), 7.0);
        assert_eq!(prism.sample(Vec3::new(4.0, 6.0, 4.0)), 5.0);
    }

    #[test]
    fn test_rounded_box() {
        let rounded = RoundedBox::new(Vec3::from_scalar(2.0), 0.5);

        assert_eq!(rounded.sample(Vec3::zero()), -2.0);
        assert_eq!(rounded.sample(Vec3::new(2.0, 0.0, 0.0)), 0.0);
        assert_eq!(rounded.sample(Vec3::new(0.0, 5.0, 0.0)), 3.0);

        // The corner is pulled in along the diagonal
        let corner = rounded.sample(Vec3::from_scalar(2.0));
        let sharp = RectangularPrism::new(Vec3::from_scalar(2.0)).sample(Vec3::from_scalar(2.0));
        assert!(corner > sharp);
    }
}
