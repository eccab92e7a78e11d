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

//! Small fixed-size vectors used for positions, normals, colors and texture
//! coordinates.

/// A 2 dimensional vector, used for texture coordinates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A 3 dimensional vector, used for positions, normals and RGB colors.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

// Plus and multiply operators can't be used as separators in macro repetition,
// so I use a fold operation instead
macro_rules! fold {
    ($op:tt, $x:expr, $y:expr) => {
        $x $op $y
    };
    ($op:tt, $x:expr, $y:expr, $($rest:expr),+) => {
        fold!($op, ($x $op $y), $($rest),*)
    }
}

macro_rules! impl_arithmetic_op {
    ($name:ident, $op_name:ident, $op_small_name:ident, $op:tt { $($field:ident ),+ }) => {
        impl std::ops::$op_name for $name {
            type Output = $name;
            fn $op_small_name(self, other: $name) -> $name {
                $name::new($(self.$field $op other.$field),*)
            }
        }
        impl std::ops::$op_name<f32> for $name {
            type Output = $name;
            fn $op_small_name(self, other: f32) -> $name {
                $name::new($(self.$field $op other),*)
            }
        }
        impl std::ops::$op_name<$name> for f32 {
            type Output = $name;
            fn $op_small_name(self, other: $name) -> $name {
                $name::new($(self $op other.$field),*)
            }
        }
    };
}

macro_rules! impl_arithmetic_assign_op {
    ($name:ident, $op_assign_name:ident, $op_assign_small_name:ident, $op:tt { $($field:ident ),+ }) => {
        impl std::ops::$op_assign_name for $name {
            fn $op_assign_small_name(&mut self, other: $name) {
                $(self.$field $op other.$field);*
            }
        }
        impl std::ops::$op_assign_name<f32> for $name {
            fn $op_assign_small_name(&mut self, other: f32) {
                $(self.$field $op other);*
            }
        }
    };
}

macro_rules! impl_vector {
    ($name:ident, $n:expr, { $($field:ident ),+ }) => {
        impl $name {
            /// Create a vector
            pub fn new($($field : f32),*) -> Self {
                Self { $($field),* }
            }

            /// Create a vector by repeating a single value
            pub fn from_scalar(f: f32) -> Self {
                Self { $($field: f),* }
            }

            /// Create a vector with all coordinates set to zero
            pub fn zero() -> Self {
                Self::from_scalar(0.0)
            }

            /// Create a vector with all coordinates set to one
            pub fn one() -> Self {
                Self::from_scalar(1.0)
            }

            /// Squared Euclidean length of this vector
            pub fn len_sq(&self) -> f32 {
                fold!(+, $(self.$field * self.$field),*)
            }

            /// Euclidean length of this vector
            pub fn len(&self) -> f32 {
                self.len_sq().sqrt()
            }

            /// Normalised copy of this vector, or `None` if the vector is too
            /// short to have a meaningful direction.
            pub fn normalised(&self) -> Option<Self> {
                let l = self.len();
                if l < std::f32::EPSILON {
                    None
                } else {
                    Some(Self {
                        $($field: self.$field / l),*
                    })
                }
            }

            /// Create a new vector by applying the provided function to each
            /// component in this vector
            pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
                $name::new( $(f(self.$field)),* )
            }

            /// Test if every component matches a predicate
            pub fn all<F: Fn(f32) -> bool>(&self, f: F) -> bool {
                fold!(&&, $(f(self.$field)),* )
            }

            /// Componentwise fractional part, `v - floor(v)`.
            ///
            /// Rounding can push `v - floor(v)` up to exactly 1.0 for tiny
            /// negative inputs, so that case folds back to 0.0.
            pub fn fract(&self) -> Self {
                self.map(|f| {
                    let w = f - f.floor();
                    if w >= 1.0 {
                        0.0
                    } else {
                        w
                    }
                })
            }

            /// The components as a fixed-size array.
            pub fn to_array(&self) -> [f32; $n] {
                [$(self.$field),*]
            }
        }

        impl std::default::Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl std::ops::Neg for $name {
            type Output = $name;
            fn neg(self) -> $name {
                $name::new($(-self.$field),*)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), std::ops::Add::add)
            }
        }

        impl From<[f32; $n]> for $name {
            fn from(a: [f32; $n]) -> Self {
                let [$($field),*] = a;
                Self { $($field),* }
            }
        }

        impl std::ops::Index<usize> for $name {
            type Output = f32;
            fn index(&self, index: usize) -> &f32 {
                [$(&self.$field),*][index]
            }
        }

        impl_arithmetic_op!($name, Add, add, + { $($field),* });
        impl_arithmetic_op!($name, Sub, sub, - { $($field),* });
        impl_arithmetic_op!($name, Mul, mul, * { $($field),* });
        impl_arithmetic_op!($name, Div, div, / { $($field),* });
        impl_arithmetic_assign_op!($name, AddAssign, add_assign, += { $($field),* });
        impl_arithmetic_assign_op!($name, SubAssign, sub_assign, -= { $($field),* });
        impl_arithmetic_assign_op!($name, MulAssign, mul_assign, *= { $($field),* });
    };
}

impl_vector!(Vec2, 2, { x, y });
impl_vector!(Vec3, 3, { x, y, z });

impl Vec3 {
    /// Create a vector by taking the absolute value of each component in this
    /// vector
    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    /// Find the maximum value out of all components in this vector
    pub fn max_component(&self) -> f32 {
        self.x.max(self.y.max(self.z))
    }

    /// Find the minimum value out of all components in this vector
    pub fn min_component(&self) -> f32 {
        self.x.min(self.y.min(self.z))
    }

    /// Index of the largest component, with ties resolved in x, y, z order.
    pub fn dominant_axis(&self) -> usize {
        if self.x >= self.y && self.x >= self.z {
            0
        } else if self.y >= self.z {
            1
        } else {
            2
        }
    }

    /// Calculate the dot product of this vector and another
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Compute the cross product of this vector and another
    pub fn cross(&self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Create a vector by taking the min value of each component in this vector
    /// and another
    pub fn min(&self, other: Self) -> Self {
        vec3(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Create a vector by taking the max value of each component in this vector
    /// and another
    pub fn max(&self, other: Self) -> Self {
        vec3(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Create a vector by linearly interpolating between this vector and
    /// another
    pub fn lerp(&self, other: Self, f: f32) -> Self {
        *self + (other - *self) * f
    }

    pub fn yz(&self) -> Vec2 {
        vec2(self.y, self.z)
    }

    pub fn xz(&self) -> Vec2 {
        vec2(self.x, self.z)
    }

    pub fn xy(&self) -> Vec2 {
        vec2(self.x, self.y)
    }
}
