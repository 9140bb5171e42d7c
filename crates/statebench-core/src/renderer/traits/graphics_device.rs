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

use crate::math::{LinearRgba, Mat4};
use crate::renderer::api::*;
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// The immediate-mode command surface the render backend drives.
///
/// Every method maps to one (or a fixed handful of) driver calls, so that the
/// number of commands a policy issues is exactly the number of state changes
/// it pays for. Implementations must not cache or elide anything on their
/// own: deciding what to re-apply is the render backend's job.
///
/// A device is bound to the thread its context is current on, hence `&mut self`
/// and no `Send`/`Sync` bound.
pub trait GraphicsDevice: Debug + 'static {
    /// Compiles both stages of a program and links them.
    /// ## Errors
    /// * `ResourceError::Shader` - If a stage fails to compile or the program fails to link.
    fn create_program(&mut self, descriptor: &ProgramDescriptor) -> Result<ProgramId, ResourceError>;

    /// Releases a program.
    fn destroy_program(&mut self, id: ProgramId) -> Result<(), ResourceError>;

    /// Looks up an active uniform of a linked program.
    /// ## Errors
    /// * `ResourceError::UniformNotFound` - If the program has no active uniform with that name.
    fn uniform_location(
        &mut self,
        program: ProgramId,
        name: &str,
    ) -> Result<UniformLocation, ResourceError>;

    /// Creates a GPU buffer and fills it with `data`.
    /// ## Arguments
    /// * `descriptor` - The buffer's label and binding.
    /// * `data` - The initial contents.
    fn create_buffer_with_data(
        &mut self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError>;

    /// Releases a GPU buffer.
    fn destroy_buffer(&mut self, id: BufferId) -> Result<(), ResourceError>;

    /// Makes `program` the current program.
    fn use_program(&mut self, program: ProgramId);

    /// Binds a vertex buffer and (re)specifies the attribute layout that reads from it.
    fn bind_vertex_buffer(&mut self, buffer: BufferId, layout: &VertexBufferLayout);

    /// Binds an index buffer of 16-bit indices.
    fn bind_index_buffer(&mut self, buffer: BufferId);

    /// Uploads a color to a `vec4` uniform of the current program.
    fn set_uniform_color(&mut self, location: UniformLocation, color: LinearRgba);

    /// Uploads a column-major matrix to a `mat4` uniform of the current program.
    fn set_uniform_matrix(&mut self, location: UniformLocation, matrix: &Mat4);

    /// Enables or disables depth writes.
    fn set_depth_write(&mut self, enabled: bool);

    /// Enables or disables the depth test.
    fn set_depth_test(&mut self, enabled: bool);

    /// Enables or disables alpha blending.
    fn set_blending(&mut self, enabled: bool);

    /// Sets the viewport to `(0, 0, width, height)`.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clears the color target.
    fn clear_color(&mut self, color: LinearRgba);

    /// Draws `index_count` indices from the bound index buffer as a triangle list.
    fn draw_indexed(&mut self, index_count: u32);

    /// Blocks until every previously submitted command has completed.
    fn finish(&mut self);

    /// Get the adapter information of the device.
    fn adapter_info(&self) -> RendererAdapterInfo;
}
