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

//! Explicit model of the device's current bindings.

use statebench_core::renderer::{
    BufferId, FrameStats, GraphicsDevice, PipelineState, ProgramId, RenderToggles,
    VertexBufferLayout,
};

/// What the render backend last bound on the device.
///
/// Every state-changing command goes through this struct, so what the device
/// currently holds never depends on implicit driver state, and the counters
/// of [`FrameStats`] are updated in exactly one place. `None` means nothing
/// has been bound yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundState {
    /// The current program.
    pub program: Option<ProgramId>,
    /// The current vertex buffer.
    pub vertex_buffer: Option<BufferId>,
    /// The current index buffer.
    pub index_buffer: Option<BufferId>,
    /// The last render toggles applied.
    pub toggles: Option<RenderToggles>,
}

impl BoundState {
    /// Binds `program` unless it is already current.
    ///
    /// ## Returns
    /// `true` if a bind was issued.
    pub fn bind_program<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        program: ProgramId,
        stats: &mut FrameStats,
    ) -> bool {
        if self.program == Some(program) {
            return false;
        }
        device.use_program(program);
        self.program = Some(program);
        stats.program_binds += 1;
        true
    }

    /// Binds `program` whether or not it is already current.
    pub fn force_program<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        program: ProgramId,
        stats: &mut FrameStats,
    ) {
        device.use_program(program);
        self.program = Some(program);
        stats.program_binds += 1;
    }

    /// Binds a vertex/index buffer pair, re-specifying the vertex layout.
    pub fn bind_buffers<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        vertex_buffer: BufferId,
        index_buffer: BufferId,
        stats: &mut FrameStats,
    ) {
        device.bind_vertex_buffer(vertex_buffer, &VertexBufferLayout::POSITION_ONLY);
        device.bind_index_buffer(index_buffer);
        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
        stats.buffer_binds += 2;
    }

    /// Uploads a state's color and transform to the current program.
    pub fn upload_uniforms<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        state: &PipelineState,
        stats: &mut FrameStats,
    ) {
        device.set_uniform_color(state.color_location, state.color);
        device.set_uniform_matrix(state.matrix_location, &state.transform);
        stats.uniform_updates += 2;
    }

    /// Applies depth write, depth test and blending, in that order.
    pub fn apply_toggles<D: GraphicsDevice>(
        &mut self,
        device: &mut D,
        toggles: RenderToggles,
        stats: &mut FrameStats,
    ) {
        device.set_depth_write(toggles.depth_write);
        device.set_depth_test(toggles.depth_test);
        device.set_blending(toggles.alpha_blending);
        self.toggles = Some(toggles);
        stats.toggle_updates += 3;
    }

    /// Forgets about buffers that are about to be destroyed.
    pub fn release_buffers(&mut self) {
        self.vertex_buffer = None;
        self.index_buffer = None;
    }
}
