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
    error::{Error, Result},
    math::Vec3,
};
use gltf_dep::json as gj;
use gj::{
    accessor::{ComponentType, Type},
    validation::Checked,
};
use std::convert::TryFrom;

/// A bounds-checked window onto the elements of one accessor.
///
/// Construction resolves the accessor, its buffer view and buffer by index,
/// and checks that every element the accessor claims lies within the view
/// and the view within the buffer. Reads after that cannot go out of range.
pub struct AccessorView<'a> {
    index: usize,
    data: &'a [u8],
    stride: usize,
    count: usize,
    component_type: ComponentType,
    type_: Type,
}

impl<'a> AccessorView<'a> {
    pub fn new(
        root: &gj::Root,
        accessor: gj::Index<gj::Accessor>,
        buffers: &'a [Vec<u8>],
    ) -> Result<Self> {
        let index = accessor.value();
        let malformed = |msg: String| Error::Malformed(format!("accessor {}: {}", index, msg));

        let accessor = root
            .accessors
            .get(index)
            .ok_or_else(|| malformed("out of range".into()))?;
        let component_type = match &accessor.component_type {
            Checked::Valid(t) => t.0,
            Checked::Invalid => return Err(malformed("unknown component type".into())),
        };
        let type_ = match &accessor.type_ {
            Checked::Valid(t) => *t,
            Checked::Invalid => return Err(malformed("unknown element type".into())),
        };

        let view_index = accessor
            .buffer_view
            .ok_or_else(|| malformed("sparse accessors are not supported".into()))?
            .value();
        let view = root
            .buffer_views
            .get(view_index)
            .ok_or_else(|| malformed(format!("buffer view {} out of range", view_index)))?;
        let buffer = buffers
            .get(view.buffer.value())
            .ok_or_else(|| malformed(format!("buffer {} out of range", view.buffer.value())))?;

        let view_start = to_usize(view.byte_offset.map_or(0, |o| o.0));
        let view_end = view_start
            .zip(to_usize(view.byte_length.0))
            .and_then(|(start, len)| start.checked_add(len))
            .filter(|&end| end <= buffer.len())
            .ok_or_else(|| malformed(format!("buffer view {} exceeds its buffer", view_index)))?;

        let element_size = component_type.size() * type_.multiplicity();
        let stride = view.byte_stride.map_or(element_size, |s| s.0);
        if stride < element_size {
            return Err(malformed(format!(
                "stride {} is shorter than an element of {} bytes",
                stride, element_size
            )));
        }

        let count = to_usize(accessor.count.0)
            .ok_or_else(|| malformed("element count does not fit in memory".into()))?;
        let span = match count {
            0 => Some(0),
            n => (n - 1)
                .checked_mul(stride)
                .and_then(|s| s.checked_add(element_size)),
        };
        let start = view_start
            .zip(to_usize(accessor.byte_offset.map_or(0, |o| o.0)))
            .and_then(|(view_start, offset)| view_start.checked_add(offset))
            .zip(span)
            .filter(|&(start, span)| start.checked_add(span).map_or(false, |end| end <= view_end))
            .map(|(start, _)| start)
            .ok_or_else(|| {
                malformed(format!("{} elements exceed buffer view {}", count, view_index))
            })?;

        Ok(Self {
            index,
            data: &buffer[start..view_end],
            stride,
            count,
            component_type,
            type_,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Read a float `VEC3` accessor.
    pub fn read_vec3(&self) -> Result<Vec<Vec3>> {
        match (self.component_type, self.type_) {
            (ComponentType::F32, Type::Vec3) => Ok(self.read_xyz()),
            _ => Err(self.unsupported("float VEC3")),
        }
    }

    /// Read a float `VEC3` or `VEC4` color accessor, dropping alpha.
    pub fn read_colors(&self) -> Result<Vec<Vec3>> {
        match (self.component_type, self.type_) {
            (ComponentType::F32, Type::Vec3) | (ComponentType::F32, Type::Vec4) => {
                Ok(self.read_xyz())
            }
            _ => Err(self.unsupported("float VEC3 or VEC4")),
        }
    }

    /// Read an unsigned scalar index accessor, widening to u32.
    pub fn read_indices(&self) -> Result<Vec<u32>> {
        if self.type_ != Type::Scalar {
            return Err(self.unsupported("SCALAR indices"));
        }

        let read: fn(&[u8]) -> u32 = match self.component_type {
            ComponentType::U8 => |b| u32::from(b[0]),
            ComponentType::U16 => |b| u32::from(u16::from_le_bytes([b[0], b[1]])),
            ComponentType::U32 => |b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            _ => return Err(self.unsupported("unsigned integer indices")),
        };

        Ok((0..self.count)
            .map(|i| read(&self.data[i * self.stride..]))
            .collect())
    }

    fn read_xyz(&self) -> Vec<Vec3> {
        (0..self.count)
            .map(|i| Vec3::new(self.f32_at(i, 0), self.f32_at(i, 1), self.f32_at(i, 2)))
            .collect()
    }

    fn f32_at(&self, element: usize, component: usize) -> f32 {
        let o = element * self.stride + component * 4;
        f32::from_le_bytes([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    fn unsupported(&self, expected: &str) -> Error {
        Error::Unsupported(format!(
            "accessor {} is {:?} {:?}, expected {}",
            self.index, self.component_type, self.type_, expected
        ))
    }
}

fn to_usize(value: u64) -> Option<usize> {
    usize::try_from(value).ok()
}
