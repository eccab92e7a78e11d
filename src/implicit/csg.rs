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

/// The CSG union operation. An implicit function that is solid where either of
/// the provided implicit functions is solid.
#[derive(Debug, Copy, Clone)]
pub struct Union<A, B> {
    /// The first implicit function.
    pub a: A,
    /// The second implicit function.
    pub b: B,
}

impl<A, B> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Source, B: Source> Source for Union<A, B> {
    fn sample(&self, p: Vec3) -> f32 {
        self.a.sample(p).min(self.b.sample(p))
    }
}

/// The CSG intersection operation. An implicit function that is solid only
/// where both of the provided implicit functions are solid.
#[derive(Debug, Copy, Clone)]
pub struct Intersection<A, B> {
    /// The first implicit function.
    pub a: A,
    /// The second implicit function.
    pub b: B,
}

impl<A, B> Intersection<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Source, B: Source> Source for Intersection<A, B> {
    fn sample(&self, p: Vec3) -> f32 {
        self.a.sample(p).max(self.b.sample(p))
    }
}

/// The CSG difference operation. Carves the second implicit function out of
/// the first, i.e. the result is solid where the first function is solid,
/// except where the second is solid.
#[derive(Debug, Copy, Clone)]
pub struct Difference<A, B> {
    /// The implicit function to carve from.
    pub a: A,
    /// The implicit function to remove.
    pub b: B,
}

impl<A, B> Difference<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Source, B: Source> Source for Difference<A, B> {
    fn sample(&self, p: Vec3) -> f32 {
        self.a.sample(p).max(-self.b.sample(p))
    }
}

/// A union that blends the two surfaces together where they come within
/// `smoothness` of each other, using a polynomial smooth minimum.
#[derive(Debug, Copy, Clone)]
pub struct SmoothUnion<A, B> {
    pub a: A,
    pub b: B,
    /// Width of the blend region. Zero degenerates to a plain [`Union`].
    pub smoothness: f32,
}

impl<A, B> SmoothUnion<A, B> {
    pub fn new(a: A, b: B, smoothness: f32) -> Self {
        Self { a, b, smoothness }
    }
}

impl<A: Source, B: Source> Source for SmoothUnion<A, B> {
    fn sample(&self, p: Vec3) -> f32 {
        let (a, b) = (self.a.sample(p), self.b.sample(p));
        let k = self.smoothness;
        if k <= 0.0 {
            return a.min(b);
        }
        let h = (k - (a - b).abs()).max(0.0) / k;
        a.min(b) - h * h * k * 0.25
    }
}
