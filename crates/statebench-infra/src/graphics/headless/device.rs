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

//! A headless [`GraphicsDevice`] that records or counts every command.
//!
//! It validates handles the way a real driver would (destroyed or unknown
//! ids are errors) and resolves uniform names from the `uniform` declarations
//! of the program sources, so the render backend runs against it unchanged.

use statebench_core::{
    math::{LinearRgba, Mat4},
    renderer::{
        BufferDescriptor, BufferId, BufferUsage, GraphicsBackendType, GraphicsDevice,
        ProgramDescriptor, ProgramId, RendererAdapterInfo, ResourceError, ShaderError,
        UniformLocation, VertexBufferLayout,
    },
};

/// One command issued to a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// A program was compiled and linked.
    CreateProgram {
        /// The new handle.
        id: ProgramId,
        /// The descriptor label.
        label: String,
    },
    /// A program was released.
    DestroyProgram(ProgramId),
    /// A buffer was created and filled.
    CreateBuffer {
        /// The new handle.
        id: BufferId,
        /// Its binding.
        usage: BufferUsage,
        /// Size of the initial data in bytes.
        size: usize,
    },
    /// A buffer was released.
    DestroyBuffer(BufferId),
    /// `use_program`.
    UseProgram(ProgramId),
    /// `bind_vertex_buffer`.
    BindVertexBuffer(BufferId),
    /// `bind_index_buffer`.
    BindIndexBuffer(BufferId),
    /// `set_uniform_color`.
    SetUniformColor(UniformLocation, LinearRgba),
    /// `set_uniform_matrix`.
    SetUniformMatrix(UniformLocation, Mat4),
    /// `set_depth_write`.
    SetDepthWrite(bool),
    /// `set_depth_test`.
    SetDepthTest(bool),
    /// `set_blending`.
    SetBlending(bool),
    /// `set_viewport`.
    SetViewport {
        /// Viewport width.
        width: u32,
        /// Viewport height.
        height: u32,
    },
    /// `clear_color`.
    ClearColor(LinearRgba),
    /// `draw_indexed`.
    DrawIndexed(u32),
    /// `finish`.
    Finish,
}

/// Running totals of the commands a [`RecordingDevice`] received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandCounts {
    /// `use_program` calls.
    pub program_binds: u64,
    /// Vertex and index buffer binds.
    pub buffer_binds: u64,
    /// Color and matrix uniform uploads.
    pub uniform_updates: u64,
    /// Depth-write, depth-test and blending updates.
    pub toggle_updates: u64,
    /// Draw submissions.
    pub draws: u64,
    /// Indices submitted across all draws.
    pub indices: u64,
    /// Color clears.
    pub clears: u64,
    /// Viewport updates.
    pub viewports: u64,
    /// Pipeline drains.
    pub finishes: u64,
}

#[derive(Debug)]
struct ProgramEntry {
    uniforms: Vec<String>,
}

#[derive(Debug)]
struct BufferEntry {
    usage: BufferUsage,
    data: Vec<u8>,
}

/// A device without a GPU.
///
/// In recording mode every command is appended to a log that tests can
/// inspect; in counting mode only [`CommandCounts`] are kept, so long runs
/// stay cheap.
#[derive(Debug)]
pub struct RecordingDevice {
    record: bool,
    fail_compilation: bool,
    commands: Vec<DeviceCommand>,
    counts: CommandCounts,
    programs: Vec<Option<ProgramEntry>>,
    buffers: Vec<Option<BufferEntry>>,
    uniforms: Vec<(ProgramId, String)>,
}

impl RecordingDevice {
    /// Creates a device that logs every command.
    pub fn new() -> Self {
        Self {
            record: true,
            fail_compilation: false,
            commands: Vec::new(),
            counts: CommandCounts::default(),
            programs: Vec::new(),
            buffers: Vec::new(),
            uniforms: Vec::new(),
        }
    }

    /// Creates a device that only counts commands.
    pub fn counting() -> Self {
        Self {
            record: false,
            ..Self::new()
        }
    }

    /// Makes every subsequent program creation fail with a compilation error.
    pub fn with_failing_compilation(mut self) -> Self {
        self.fail_compilation = true;
        self
    }

    /// The recorded commands, oldest first. Empty in counting mode.
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The running command totals.
    pub fn counts(&self) -> CommandCounts {
        self.counts
    }

    /// Resets the running command totals.
    pub fn reset_counts(&mut self) {
        self.counts = CommandCounts::default();
    }

    /// Number of programs not yet destroyed.
    pub fn live_programs(&self) -> usize {
        self.programs.iter().flatten().count()
    }

    /// Number of buffers not yet destroyed.
    pub fn live_buffers(&self) -> usize {
        self.buffers.iter().flatten().count()
    }

    /// The contents of a live buffer.
    pub fn buffer_data(&self, id: BufferId) -> Option<&[u8]> {
        self.buffers
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|entry| entry.data.as_slice())
    }

    /// The binding of a live buffer.
    pub fn buffer_usage(&self, id: BufferId) -> Option<BufferUsage> {
        self.buffers
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|entry| entry.usage)
    }

    fn push(&mut self, command: DeviceCommand) {
        if self.record {
            self.commands.push(command);
        }
    }

    fn program_entry(&self, id: ProgramId) -> Result<&ProgramEntry, ResourceError> {
        self.programs
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(ResourceError::InvalidProgram(id))
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

/// Names declared with `uniform <type> <name>;` in a GLSL source.
fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let declaration = line.trim().strip_prefix("uniform ")?;
        let name = declaration.trim_end_matches(';').split_whitespace().last()?;
        Some(name.to_string())
    })
}

impl GraphicsDevice for RecordingDevice {
    fn create_program(&mut self, descriptor: &ProgramDescriptor) -> Result<ProgramId, ResourceError> {
        if self.fail_compilation {
            return Err(ShaderError::CompilationError {
                label: descriptor.label.to_string(),
                stage: "vertex",
                details: "compilation disabled on this device".to_string(),
            }
            .into());
        }

        let uniforms = declared_uniforms(descriptor.vertex_source)
            .chain(declared_uniforms(descriptor.fragment_source))
            .collect();
        let id = ProgramId(self.programs.len());
        self.programs.push(Some(ProgramEntry { uniforms }));
        self.push(DeviceCommand::CreateProgram {
            id,
            label: descriptor.label.to_string(),
        });
        Ok(id)
    }

    fn destroy_program(&mut self, id: ProgramId) -> Result<(), ResourceError> {
        match self.programs.get_mut(id.0).and_then(Option::take) {
            Some(_) => {
                self.push(DeviceCommand::DestroyProgram(id));
                Ok(())
            }
            None => Err(ResourceError::InvalidProgram(id)),
        }
    }

    fn uniform_location(
        &mut self,
        program: ProgramId,
        name: &str,
    ) -> Result<UniformLocation, ResourceError> {
        let entry = self.program_entry(program)?;
        if !entry.uniforms.iter().any(|uniform| uniform == name) {
            return Err(ResourceError::UniformNotFound {
                program,
                name: name.to_string(),
            });
        }
        let location = UniformLocation(self.uniforms.len());
        self.uniforms.push((program, name.to_string()));
        Ok(location)
    }

    fn create_buffer_with_data(
        &mut self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let id = BufferId(self.buffers.len());
        self.buffers.push(Some(BufferEntry {
            usage: descriptor.usage,
            data: data.to_vec(),
        }));
        self.push(DeviceCommand::CreateBuffer {
            id,
            usage: descriptor.usage,
            size: data.len(),
        });
        Ok(id)
    }

    fn destroy_buffer(&mut self, id: BufferId) -> Result<(), ResourceError> {
        match self.buffers.get_mut(id.0).and_then(Option::take) {
            Some(_) => {
                self.push(DeviceCommand::DestroyBuffer(id));
                Ok(())
            }
            None => Err(ResourceError::InvalidBuffer(id)),
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        self.counts.program_binds += 1;
        self.push(DeviceCommand::UseProgram(program));
    }

    fn bind_vertex_buffer(&mut self, buffer: BufferId, _layout: &VertexBufferLayout) {
        self.counts.buffer_binds += 1;
        self.push(DeviceCommand::BindVertexBuffer(buffer));
    }

    fn bind_index_buffer(&mut self, buffer: BufferId) {
        self.counts.buffer_binds += 1;
        self.push(DeviceCommand::BindIndexBuffer(buffer));
    }

    fn set_uniform_color(&mut self, location: UniformLocation, color: LinearRgba) {
        self.counts.uniform_updates += 1;
        self.push(DeviceCommand::SetUniformColor(location, color));
    }

    fn set_uniform_matrix(&mut self, location: UniformLocation, matrix: &Mat4) {
        self.counts.uniform_updates += 1;
        self.push(DeviceCommand::SetUniformMatrix(location, *matrix));
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.counts.toggle_updates += 1;
        self.push(DeviceCommand::SetDepthWrite(enabled));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.counts.toggle_updates += 1;
        self.push(DeviceCommand::SetDepthTest(enabled));
    }

    fn set_blending(&mut self, enabled: bool) {
        self.counts.toggle_updates += 1;
        self.push(DeviceCommand::SetBlending(enabled));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.counts.viewports += 1;
        self.push(DeviceCommand::SetViewport { width, height });
    }

    fn clear_color(&mut self, color: LinearRgba) {
        self.counts.clears += 1;
        self.push(DeviceCommand::ClearColor(color));
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.counts.draws += 1;
        self.counts.indices += u64::from(index_count);
        self.push(DeviceCommand::DrawIndexed(index_count));
    }

    fn finish(&mut self) {
        self.counts.finishes += 1;
        self.push(DeviceCommand::Finish);
    }

    fn adapter_info(&self) -> RendererAdapterInfo {
        RendererAdapterInfo {
            name: "Recording device".to_string(),
            vendor: "statebench".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend_type: GraphicsBackendType::Headless,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statebench_core::renderer::api::shader::{COLOR_UNIFORM, MATRIX_UNIFORM};

    #[test]
    fn resolves_declared_uniforms_only() {
        let mut device = RecordingDevice::new();
        let program = device
            .create_program(&ProgramDescriptor::flat_color("test"))
            .unwrap();

        let color = device.uniform_location(program, COLOR_UNIFORM).unwrap();
        let matrix = device.uniform_location(program, MATRIX_UNIFORM).unwrap();
        assert_ne!(color, matrix);

        let err = device.uniform_location(program, "g_missing").unwrap_err();
        assert!(matches!(err, ResourceError::UniformNotFound { .. }));
    }

    #[test]
    fn destroyed_handles_are_invalid() {
        let mut device = RecordingDevice::new();
        let buffer = device
            .create_buffer_with_data(
                &BufferDescriptor {
                    label: None,
                    usage: BufferUsage::Index,
                },
                &[1, 2, 3, 4],
            )
            .unwrap();
        assert_eq!(device.buffer_data(buffer), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(device.buffer_usage(buffer), Some(BufferUsage::Index));

        device.destroy_buffer(buffer).unwrap();
        assert_eq!(device.live_buffers(), 0);
        assert!(matches!(
            device.destroy_buffer(buffer),
            Err(ResourceError::InvalidBuffer(id)) if id == buffer
        ));
        assert!(matches!(
            device.destroy_program(ProgramId(0)),
            Err(ResourceError::InvalidProgram(_))
        ));
    }

    #[test]
    fn failing_compilation_surfaces_a_shader_error() {
        let mut device = RecordingDevice::new().with_failing_compilation();
        let err = device
            .create_program(&ProgramDescriptor::flat_color("Slot A"))
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Shader(ShaderError::CompilationError { .. })
        ));
        assert_eq!(device.live_programs(), 0);
    }

    #[test]
    fn counting_mode_keeps_no_log() {
        let mut device = RecordingDevice::counting();
        device.draw_indexed(30);
        device.draw_indexed(30);
        device.set_depth_test(true);
        device.finish();

        assert!(device.commands().is_empty());
        let counts = device.counts();
        assert_eq!(counts.draws, 2);
        assert_eq!(counts.indices, 60);
        assert_eq!(counts.toggle_updates, 1);
        assert_eq!(counts.finishes, 1);

        device.reset_counts();
        assert_eq!(device.counts(), CommandCounts::default());
    }

    #[test]
    fn recording_mode_logs_in_order() {
        let mut device = RecordingDevice::new();
        device.set_viewport(640, 480);
        device.clear_color(LinearRgba::GREEN);
        device.draw_indexed(3);

        assert_eq!(
            device.take_commands(),
            vec![
                DeviceCommand::SetViewport {
                    width: 640,
                    height: 480
                },
                DeviceCommand::ClearColor(LinearRgba::GREEN),
                DeviceCommand::DrawIndexed(3),
            ]
        );
        assert!(device.commands().is_empty());
        assert_eq!(device.adapter_info().backend_type, GraphicsBackendType::Headless);
    }
}
