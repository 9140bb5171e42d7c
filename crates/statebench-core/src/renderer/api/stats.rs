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

//! Per-frame counters of the render backend.

/// What a single `draw()` submitted to the device.
///
/// These are counts of commands issued, not timings: they let a run confirm
/// that each policy really elides what it claims to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// A sequential counter of drawn frames since the last reconfiguration.
    pub frame_number: u64,
    /// The number of draw submissions.
    pub draw_calls: u32,
    /// The number of triangles submitted.
    pub triangles: u64,
    /// Program binds, including the frame prologue bind.
    pub program_binds: u32,
    /// Vertex and index buffer binds.
    pub buffer_binds: u32,
    /// Color and matrix uniform uploads.
    pub uniform_updates: u32,
    /// Depth-write, depth-test and blending toggle updates.
    pub toggle_updates: u32,
}

impl FrameStats {
    /// Total number of state-changing commands issued.
    #[inline]
    pub const fn state_changes(&self) -> u32 {
        self.program_binds + self.buffer_binds + self.uniform_updates + self.toggle_updates
    }
}
