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

use glow::HasContext;
use statebench_core::{
    math::{LinearRgba, Mat4},
    renderer::{
        BufferDescriptor, BufferId, BufferUsage, GraphicsBackendType, GraphicsDevice,
        ProgramDescriptor, ProgramId, RendererAdapterInfo, ResourceError, ShaderError,
        UniformLocation, VertexBufferLayout,
    },
};
use std::fmt;

type GlProgram = <glow::Context as HasContext>::Program;
type GlShader = <glow::Context as HasContext>::Shader;
type GlBuffer = <glow::Context as HasContext>::Buffer;
type GlUniformLocation = <glow::Context as HasContext>::UniformLocation;
type GlVertexArray = <glow::Context as HasContext>::VertexArray;

#[derive(Debug)]
struct GlBufferEntry {
    buffer: GlBuffer,
    target: u32,
}

const fn buffer_target(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Vertex => glow::ARRAY_BUFFER,
        BufferUsage::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

/// A [`GraphicsDevice`] over an OpenGL 3.3 compatibility or OpenGL ES 2+ context.
///
/// Handles are indices into dense slabs of native objects, so every lookup
/// on the draw path is a bounds-checked index. Commands map one-to-one onto
/// GL calls; nothing is cached or elided here.
///
/// The context must be current on the calling thread for the whole lifetime
/// of the device.
pub struct GlowDevice {
    gl: glow::Context,
    vertex_array: Option<GlVertexArray>,
    programs: Vec<Option<GlProgram>>,
    buffers: Vec<Option<GlBufferEntry>>,
    uniforms: Vec<GlUniformLocation>,
    adapter_info: RendererAdapterInfo,
}

impl fmt::Debug for GlowDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowDevice")
            .field("adapter", &self.adapter_info)
            .field("programs", &self.programs.iter().flatten().count())
            .field("buffers", &self.buffers.iter().flatten().count())
            .finish()
    }
}

impl GlowDevice {
    /// Wraps a loaded context.
    ///
    /// On contexts that have them (desktop GL, GLES 3), a single vertex array
    /// object is created and kept bound: the benchmark re-specifies the
    /// attribute pointer whenever it binds a vertex buffer, so one VAO
    /// behaves like the GLES 2 default attribute state.
    ///
    /// ## Errors
    /// * `ResourceError::BackendError` - If the vertex array object cannot be created.
    pub fn new(gl: glow::Context) -> Result<Self, ResourceError> {
        let version = gl.version();
        let backend_type = if version.is_embedded {
            GraphicsBackendType::OpenGLES
        } else {
            GraphicsBackendType::OpenGL
        };
        let supports_vertex_arrays = !version.is_embedded || version.major >= 3;

        // SAFETY: the caller guarantees the context is current on this thread.
        let (adapter_info, vertex_array) = unsafe {
            let adapter_info = RendererAdapterInfo {
                name: gl.get_parameter_string(glow::RENDERER),
                vendor: gl.get_parameter_string(glow::VENDOR),
                version: gl.get_parameter_string(glow::VERSION),
                backend_type,
            };
            let vertex_array = if supports_vertex_arrays {
                let vao = gl
                    .create_vertex_array()
                    .map_err(ResourceError::BackendError)?;
                gl.bind_vertex_array(Some(vao));
                Some(vao)
            } else {
                None
            };
            (adapter_info, vertex_array)
        };

        log::info!("OpenGL device created: {adapter_info}");

        Ok(Self {
            gl,
            vertex_array,
            programs: Vec::new(),
            buffers: Vec::new(),
            uniforms: Vec::new(),
            adapter_info,
        })
    }

    fn program(&self, id: ProgramId) -> Option<GlProgram> {
        self.programs.get(id.0).copied().flatten()
    }

    fn buffer(&self, id: BufferId) -> Option<&GlBufferEntry> {
        self.buffers.get(id.0).and_then(Option::as_ref)
    }

    fn compile_stage(
        &self,
        label: &str,
        stage: &'static str,
        kind: u32,
        source: &str,
    ) -> Result<GlShader, ResourceError> {
        // SAFETY: the context is current; the shader is deleted on failure.
        unsafe {
            let shader = self
                .gl
                .create_shader(kind)
                .map_err(ResourceError::BackendError)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let details = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(ShaderError::CompilationError {
                    label: label.to_string(),
                    stage,
                    details,
                }
                .into());
            }
            Ok(shader)
        }
    }
}

impl GraphicsDevice for GlowDevice {
    fn create_program(&mut self, descriptor: &ProgramDescriptor) -> Result<ProgramId, ResourceError> {
        let vertex = self.compile_stage(
            descriptor.label,
            "vertex",
            glow::VERTEX_SHADER,
            descriptor.vertex_source,
        )?;
        let fragment = match self.compile_stage(
            descriptor.label,
            "fragment",
            glow::FRAGMENT_SHADER,
            descriptor.fragment_source,
        ) {
            Ok(shader) => shader,
            Err(err) => {
                // SAFETY: the vertex shader was created above on this context.
                unsafe { self.gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        // SAFETY: the context is current; both shaders are released before returning.
        let linked = unsafe {
            let program = self.gl.create_program().map_err(ResourceError::BackendError);
            match program {
                Ok(program) => {
                    self.gl.attach_shader(program, vertex);
                    self.gl.attach_shader(program, fragment);
                    for binding in descriptor.attribute_bindings {
                        self.gl
                            .bind_attrib_location(program, binding.location, binding.name);
                    }
                    self.gl.link_program(program);
                    self.gl.detach_shader(program, vertex);
                    self.gl.detach_shader(program, fragment);

                    if self.gl.get_program_link_status(program) {
                        Ok(program)
                    } else {
                        let details = self.gl.get_program_info_log(program);
                        self.gl.delete_program(program);
                        Err(ShaderError::LinkError {
                            label: descriptor.label.to_string(),
                            details,
                        }
                        .into())
                    }
                }
                Err(err) => Err(err),
            }
        };
        // SAFETY: shaders are no longer needed once the program is linked.
        unsafe {
            self.gl.delete_shader(vertex);
            self.gl.delete_shader(fragment);
        }

        let id = ProgramId(self.programs.len());
        self.programs.push(Some(linked?));
        log::debug!("Linked program '{}' as {id:?}", descriptor.label);
        Ok(id)
    }

    fn destroy_program(&mut self, id: ProgramId) -> Result<(), ResourceError> {
        let program = self
            .programs
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(ResourceError::InvalidProgram(id))?;
        // SAFETY: the handle was created on this context and is removed from the slab.
        unsafe { self.gl.delete_program(program) };
        Ok(())
    }

    fn uniform_location(
        &mut self,
        program: ProgramId,
        name: &str,
    ) -> Result<UniformLocation, ResourceError> {
        let native = self
            .program(program)
            .ok_or(ResourceError::InvalidProgram(program))?;
        // SAFETY: the program is live on this context.
        let location = unsafe { self.gl.get_uniform_location(native, name) }.ok_or_else(|| {
            ResourceError::UniformNotFound {
                program,
                name: name.to_string(),
            }
        })?;
        let id = UniformLocation(self.uniforms.len());
        self.uniforms.push(location);
        Ok(id)
    }

    fn create_buffer_with_data(
        &mut self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let target = buffer_target(descriptor.usage);
        // SAFETY: the context is current; the new buffer is bound to upload its data.
        let buffer = unsafe {
            let buffer = self
                .gl
                .create_buffer()
                .map_err(ResourceError::BackendError)?;
            self.gl.bind_buffer(target, Some(buffer));
            self.gl.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
            buffer
        };
        let id = BufferId(self.buffers.len());
        self.buffers.push(Some(GlBufferEntry { buffer, target }));
        log::trace!(
            "Created buffer {id:?} ({:?}, {} bytes)",
            descriptor.label,
            data.len()
        );
        Ok(id)
    }

    fn destroy_buffer(&mut self, id: BufferId) -> Result<(), ResourceError> {
        let entry = self
            .buffers
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(ResourceError::InvalidBuffer(id))?;
        // SAFETY: the handle was created on this context and is removed from the slab.
        unsafe { self.gl.delete_buffer(entry.buffer) };
        Ok(())
    }

    fn use_program(&mut self, program: ProgramId) {
        match self.program(program) {
            // SAFETY: the program is live on this context.
            Some(native) => unsafe { self.gl.use_program(Some(native)) },
            None => log::error!("use_program called with {program:?}, which is not live"),
        }
    }

    fn bind_vertex_buffer(&mut self, buffer: BufferId, layout: &VertexBufferLayout) {
        let Some(entry) = self.buffer(buffer) else {
            log::error!("bind_vertex_buffer called with {buffer:?}, which is not live");
            return;
        };
        let components = layout.attribute.format.components() as i32;
        let location = layout.attribute.shader_location;
        // SAFETY: the buffer is live; the attribute reads inside its bounds.
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(entry.buffer));
            self.gl.enable_vertex_attrib_array(location);
            self.gl.vertex_attrib_pointer_f32(
                location,
                components,
                glow::FLOAT,
                false,
                layout.array_stride as i32,
                layout.attribute.offset as i32,
            );
        }
    }

    fn bind_index_buffer(&mut self, buffer: BufferId) {
        match self.buffer(buffer) {
            // SAFETY: the buffer is live on this context.
            Some(entry) => unsafe { self.gl.bind_buffer(entry.target, Some(entry.buffer)) },
            None => log::error!("bind_index_buffer called with {buffer:?}, which is not live"),
        }
    }

    fn set_uniform_color(&mut self, location: UniformLocation, color: LinearRgba) {
        if let Some(native) = self.uniforms.get(location.0) {
            // SAFETY: the location was queried on this context.
            unsafe {
                self.gl
                    .uniform_4_f32(Some(native), color.r, color.g, color.b, color.a)
            };
        }
    }

    fn set_uniform_matrix(&mut self, location: UniformLocation, matrix: &Mat4) {
        if let Some(native) = self.uniforms.get(location.0) {
            // SAFETY: the location was queried on this context.
            unsafe {
                self.gl
                    .uniform_matrix_4_f32_slice(Some(native), false, &matrix.to_cols_array())
            };
        }
    }

    fn set_depth_write(&mut self, enabled: bool) {
        // SAFETY: plain state call on the current context.
        unsafe { self.gl.depth_mask(enabled) };
    }

    fn set_depth_test(&mut self, enabled: bool) {
        // SAFETY: plain state call on the current context.
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn set_blending(&mut self, enabled: bool) {
        // SAFETY: plain state call on the current context.
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        // SAFETY: plain state call on the current context.
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
    }

    fn clear_color(&mut self, color: LinearRgba) {
        // SAFETY: clears the default framebuffer of the current context.
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_indexed(&mut self, index_count: u32) {
        // SAFETY: an index buffer is bound; the count is bounded by the backend.
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_SHORT, 0)
        };
    }

    fn finish(&mut self) {
        // SAFETY: blocks on the current context.
        unsafe { self.gl.finish() };
    }

    fn adapter_info(&self) -> RendererAdapterInfo {
        self.adapter_info.clone()
    }
}

impl Drop for GlowDevice {
    fn drop(&mut self) {
        // SAFETY: every remaining handle was created on this context.
        unsafe {
            for program in self.programs.drain(..).flatten() {
                self.gl.delete_program(program);
            }
            for entry in self.buffers.drain(..).flatten() {
                self.gl.delete_buffer(entry.buffer);
            }
            if let Some(vao) = self.vertex_array.take() {
                self.gl.delete_vertex_array(vao);
            }
        }
    }
}
