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

//! Signed distance primitives, CSG combinators and transforms.
//!
//! Every type here is a [`Source`](crate::source::Source) returning a signed
//! distance: negative inside, zero on the surface, positive outside. Surfaces
//! are therefore extracted at an isolevel of zero.

mod csg;
mod cylinder;
mod plane;
mod rectangular_prism;
mod sphere;
mod torus;
mod transform;

pub use self::{
    csg::{Difference, Intersection, SmoothUnion, Union},
    cylinder::Cylinder,
    plane::Plane,
    rectangular_prism::{RectangularPrism, RoundedBox},
    sphere::Sphere,
    torus::Torus,
    transform::{Scale, Translate},
};
