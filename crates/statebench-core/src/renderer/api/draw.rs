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

//! Precomputed draw-call descriptors.

use super::buffer::BufferId;
use super::pipeline::{PipelineSlot, PipelineState};

/// Everything needed to issue one batch of a frame.
///
/// The list of descriptors is rebuilt from scratch every time the render
/// backend is reconfigured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// The slot this call belongs to.
    pub slot: PipelineSlot,
    /// The vertex buffer of the slot.
    pub vertex_buffer: BufferId,
    /// The index buffer of the slot.
    pub index_buffer: BufferId,
    /// Number of indices drawn, three per triangle.
    pub index_count: u32,
    /// The pipeline state of the slot.
    pub state: PipelineState,
}

impl DrawCall {
    /// Number of triangles submitted by this call.
    #[inline]
    pub const fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}
