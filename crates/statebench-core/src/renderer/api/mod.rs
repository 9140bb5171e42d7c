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

//! Data structures shared between the render backend and the devices.

pub mod adapter;
pub mod buffer;
pub mod draw;
pub mod pipeline;
pub mod policy;
pub mod shader;
pub mod stats;

pub use self::adapter::{GraphicsBackendType, RendererAdapterInfo};
pub use self::buffer::{
    BufferDescriptor, BufferId, BufferUsage, VertexAttributeDescriptor, VertexBufferLayout,
    VertexFormat,
};
pub use self::draw::DrawCall;
pub use self::pipeline::{PipelineSlot, PipelineState, RenderToggles};
pub use self::policy::ChangeStatePolicy;
pub use self::shader::{AttributeBinding, ProgramDescriptor, ProgramId, UniformLocation};
pub use self::stats::FrameStats;
