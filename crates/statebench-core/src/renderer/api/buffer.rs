// Copyright 2025 eraflo
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

//! Defines data structures related to GPU buffer resources.

use std::borrow::Cow;
use std::mem;

use crate::math::Vec3;

/// Describes what a buffer will be bound as.
///
/// The benchmark only ever needs the two bindings of indexed drawing. The
/// device uses this to pick the binding target (`ARRAY_BUFFER` or
/// `ELEMENT_ARRAY_BUFFER` on OpenGL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// The buffer holds vertex data.
    Vertex,
    /// The buffer holds 16-bit indices.
    Index,
}

/// A descriptor used to create a [`BufferId`].
#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    /// An optional debug label for the buffer.
    pub label: Option<Cow<'a, str>>,
    /// How the buffer will be bound.
    pub usage: BufferUsage,
}

/// An opaque handle to a GPU buffer resource.
///
/// This ID is returned by [`GraphicsDevice::create_buffer_with_data`] and is used
/// to reference the buffer in all subsequent operations.
///
/// [`GraphicsDevice::create_buffer_with_data`]: crate::renderer::GraphicsDevice::create_buffer_with_data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// The format of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Two 32-bit floats.
    Float32x2,
    /// Three 32-bit floats.
    Float32x3,
    /// Four 32-bit floats.
    Float32x4,
}

impl VertexFormat {
    /// Number of float components in the attribute.
    pub const fn components(self) -> u32 {
        match self {
            VertexFormat::Float32x2 => 2,
            VertexFormat::Float32x3 => 3,
            VertexFormat::Float32x4 => 4,
        }
    }
}

/// Describes a single vertex attribute within a vertex buffer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttributeDescriptor {
    /// The input location of this attribute in the vertex shader.
    pub shader_location: u32,
    /// The format of the attribute's data.
    pub format: VertexFormat,
    /// The byte offset of this attribute from the start of the vertex.
    pub offset: u64,
}

/// Describes the memory layout of a vertex buffer holding a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// The byte distance between consecutive vertices.
    pub array_stride: u64,
    /// The attribute fetched from every vertex.
    pub attribute: VertexAttributeDescriptor,
}

impl VertexBufferLayout {
    /// The layout of the benchmark scene: one [`Vec3`] position at location 0.
    pub const POSITION_ONLY: Self = Self {
        array_stride: mem::size_of::<Vec3>() as u64,
        attribute: VertexAttributeDescriptor {
            shader_location: 0,
            format: VertexFormat::Float32x3,
            offset: 0,
        },
    };
}
