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

//! The render backend: two pipeline-state slots, their buffers, and the
//! policy-gated draw loop.
//!
//! The backend is a lane in the sense of the hot path: once configured, a
//! `draw()` is a linear walk over a precomputed list of [`DrawCall`]s with a
//! couple of branches on the active [`ChangeStatePolicy`] and no allocation.

use super::BoundState;
use crate::scene_lane::{SceneBuilder, SceneGeometry};
use statebench_core::{
    math::{LinearRgba, Mat4},
    renderer::{
        api::shader::{COLOR_UNIFORM, MATRIX_UNIFORM},
        BufferDescriptor, BufferId, BufferUsage, ChangeStatePolicy, DrawCall, FrameStats,
        GraphicsDevice, PipelineSlot, PipelineState, ProgramDescriptor, ProgramId, RenderError,
        ResourceError, UniformLocation,
    },
};

/// The vertex and index buffer of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotBuffers {
    vertex: BufferId,
    index: BufferId,
}

/// Owns the GPU resources of the benchmark scene and submits it every frame
/// under the active [`ChangeStatePolicy`].
///
/// Slot A and slot B each hold one program (created at construction) and one
/// buffer pair (created by [`RenderBackend::configure`]). Dropping the
/// backend releases all of them.
#[derive(Debug)]
pub struct RenderBackend<D: GraphicsDevice> {
    device: D,
    width: u32,
    height: u32,
    scene: SceneBuilder,
    states: [PipelineState; 2],
    buffers: Option<[SlotBuffers; 2]>,
    draw_calls: Vec<DrawCall>,
    policy: ChangeStatePolicy,
    bound: BoundState,
    frame_number: u64,
    last_frame_stats: FrameStats,
}

impl<D: GraphicsDevice> RenderBackend<D> {
    /// Creates the backend and the programs of both slots.
    ///
    /// Each program gets the identity transform and a red color uploaded, the
    /// way a freshly linked program is initialised before any draw.
    ///
    /// ## Arguments
    /// * `device` - The device every command is issued to.
    /// * `width`, `height` - The size of the drawing surface, used as viewport.
    /// * `seed` - Seed of the random geometry and clear colors.
    ///
    /// ## Errors
    /// Returns a [`RenderError::ResourceError`] if a program fails to compile,
    /// link, or lacks one of its uniforms. Nothing created so far is leaked.
    pub fn new(mut device: D, width: u32, height: u32, seed: u64) -> Result<Self, RenderError> {
        let mut bound = BoundState::default();
        let mut scratch = FrameStats::default();

        let state_a = create_slot_state(&mut device, PipelineSlot::A, &mut bound, &mut scratch)?;
        let state_b =
            match create_slot_state(&mut device, PipelineSlot::B, &mut bound, &mut scratch) {
                Ok(state) => state,
                Err(err) => {
                    if let Err(destroy_err) = device.destroy_program(state_a.program) {
                        log::warn!("Failed to release slot A program: {destroy_err}");
                    }
                    return Err(err);
                }
            };

        log::debug!(
            "Render backend ready on '{}' ({width}x{height})",
            device.adapter_info().name
        );

        Ok(Self {
            device,
            width,
            height,
            scene: SceneBuilder::new(seed),
            states: [state_a, state_b],
            buffers: None,
            draw_calls: Vec::new(),
            policy: ChangeStatePolicy::DontChange,
            bound,
            frame_number: 0,
            last_frame_stats: FrameStats::default(),
        })
    }

    /// Rebuilds the scene for one sweep point.
    ///
    /// Generates a fresh batch of `triangles_per_batch` random triangles,
    /// uploads it into the buffer pairs of both slots (replacing the previous
    /// ones) and rebuilds the draw-call list with
    /// `total_triangle_budget / triangles_per_batch` entries alternating
    /// between the slots. Slot B's buffers are left bound.
    ///
    /// A budget smaller than one batch yields an empty draw list; `draw()`
    /// then only clears.
    ///
    /// ## Errors
    /// * `RenderError::InvalidConfiguration` - If `triangles_per_batch` is zero
    ///   or its index count does not fit a draw call.
    /// * `RenderError::ResourceError` - If a buffer cannot be created or released.
    pub fn configure(
        &mut self,
        triangles_per_batch: u32,
        total_triangle_budget: u32,
        policy: ChangeStatePolicy,
    ) -> Result<(), RenderError> {
        if triangles_per_batch == 0 {
            return Err(RenderError::InvalidConfiguration(
                "triangles per batch must be non-zero".to_string(),
            ));
        }
        let index_count = triangles_per_batch
            .checked_mul(3)
            .filter(|&count| count <= i32::MAX as u32)
            .ok_or_else(|| {
                RenderError::InvalidConfiguration(format!(
                    "{triangles_per_batch} triangles per batch exceed the index count limit"
                ))
            })?;

        self.policy = policy;
        self.draw_calls.clear();
        self.release_buffers()?;

        let geometry = self.scene.build(triangles_per_batch);
        let slot_a = upload_slot(&mut self.device, PipelineSlot::A, &geometry)?;
        let slot_b = match upload_slot(&mut self.device, PipelineSlot::B, &geometry) {
            Ok(buffers) => buffers,
            Err(err) => {
                destroy_slot(&mut self.device, slot_a);
                return Err(err);
            }
        };
        let buffers = [slot_a, slot_b];
        self.buffers = Some(buffers);

        let mut scratch = FrameStats::default();
        self.bound
            .bind_buffers(&mut self.device, slot_b.vertex, slot_b.index, &mut scratch);

        let batch_count = total_triangle_budget / triangles_per_batch;
        self.draw_calls.reserve(batch_count as usize);
        for position in 0..batch_count as usize {
            let slot = PipelineSlot::for_draw_index(position);
            let pair = buffers[slot.index()];
            self.draw_calls.push(DrawCall {
                slot,
                vertex_buffer: pair.vertex,
                index_buffer: pair.index,
                index_count,
                state: self.states[slot.index()],
            });
        }

        self.frame_number = 0;
        self.last_frame_stats = FrameStats::default();

        log::debug!(
            "Configured {batch_count} batches of {triangles_per_batch} triangles under {policy}"
        );
        Ok(())
    }

    /// Draws one frame.
    ///
    /// Sets the viewport to the surface size, clears to a fresh random color,
    /// binds slot A's program, then walks the draw-call list re-applying what
    /// the active policy asks for before each unconditional draw submission.
    pub fn draw(&mut self) {
        let mut stats = FrameStats {
            frame_number: self.frame_number,
            ..FrameStats::default()
        };

        self.device.set_viewport(self.width, self.height);
        let clear = self.scene.next_clear_color();
        self.device.clear_color(clear);

        let prologue_program = self.states[PipelineSlot::A.index()].program;
        self.bound
            .force_program(&mut self.device, prologue_program, &mut stats);

        let changes_program = self.policy.changes_program();
        let changes_resources = self.policy.changes_resources();

        for call in &self.draw_calls {
            if changes_program {
                self.bound
                    .bind_program(&mut self.device, call.state.program, &mut stats);
            }
            if changes_resources {
                self.bound.bind_buffers(
                    &mut self.device,
                    call.vertex_buffer,
                    call.index_buffer,
                    &mut stats,
                );
                self.bound
                    .upload_uniforms(&mut self.device, &call.state, &mut stats);
                self.bound
                    .apply_toggles(&mut self.device, call.state.toggles, &mut stats);
            }
            self.device.draw_indexed(call.index_count);
            stats.draw_calls += 1;
            stats.triangles += u64::from(call.triangle_count());
        }

        self.frame_number += 1;
        self.last_frame_stats = stats;
    }

    /// Blocks until the device has completed every submitted command.
    pub fn finish(&mut self) {
        self.device.finish();
    }

    /// The draw calls of the current configuration, in submission order.
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// The active policy.
    pub fn policy(&self) -> ChangeStatePolicy {
        self.policy
    }

    /// The pipeline state of a slot.
    pub fn pipeline_state(&self, slot: PipelineSlot) -> &PipelineState {
        &self.states[slot.index()]
    }

    /// What is currently bound on the device.
    pub fn bound_state(&self) -> &BoundState {
        &self.bound
    }

    /// Counters of the last drawn frame.
    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_frame_stats
    }

    /// The size of the drawing surface.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The underlying device, mutably.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Destroys every buffer of both slots, even past a failure.
    ///
    /// Returns the first error; later ones are only logged.
    fn release_buffers(&mut self) -> Result<(), ResourceError> {
        let Some(pairs) = self.buffers.take() else {
            return Ok(());
        };
        self.bound.release_buffers();

        let mut first_error = None;
        for id in pairs.into_iter().flat_map(|pair| [pair.vertex, pair.index]) {
            if let Err(err) = self.device.destroy_buffer(id) {
                log::warn!("Failed to release buffer {id:?}: {err}");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl<D: GraphicsDevice> Drop for RenderBackend<D> {
    fn drop(&mut self) {
        if let Err(err) = self.release_buffers() {
            log::warn!("Failed to release benchmark buffers: {err}");
        }
        for state in &self.states {
            if let Err(err) = self.device.destroy_program(state.program) {
                log::warn!("Failed to release program {:?}: {err}", state.program);
            }
        }
    }
}

fn slot_label(slot: PipelineSlot) -> &'static str {
    match slot {
        PipelineSlot::A => "Slot A",
        PipelineSlot::B => "Slot B",
    }
}

fn create_slot_state<D: GraphicsDevice>(
    device: &mut D,
    slot: PipelineSlot,
    bound: &mut BoundState,
    stats: &mut FrameStats,
) -> Result<PipelineState, RenderError> {
    let program = device.create_program(&ProgramDescriptor::flat_color(slot_label(slot)))?;

    let (color_location, matrix_location) = match lookup_uniforms(device, program) {
        Ok(locations) => locations,
        Err(err) => {
            if let Err(destroy_err) = device.destroy_program(program) {
                log::warn!("Failed to release {} program: {destroy_err}", slot_label(slot));
            }
            return Err(err.into());
        }
    };

    bound.force_program(device, program, stats);
    device.set_uniform_matrix(matrix_location, &Mat4::IDENTITY);
    device.set_uniform_color(color_location, LinearRgba::RED);

    log::debug!("Created {} program {program:?}", slot_label(slot));
    Ok(slot.pipeline_state(program, color_location, matrix_location))
}

fn lookup_uniforms<D: GraphicsDevice>(
    device: &mut D,
    program: ProgramId,
) -> Result<(UniformLocation, UniformLocation), ResourceError> {
    let color = device.uniform_location(program, COLOR_UNIFORM)?;
    let matrix = device.uniform_location(program, MATRIX_UNIFORM)?;
    Ok((color, matrix))
}

fn upload_slot<D: GraphicsDevice>(
    device: &mut D,
    slot: PipelineSlot,
    geometry: &SceneGeometry,
) -> Result<SlotBuffers, RenderError> {
    let label = slot_label(slot);
    let vertex = device.create_buffer_with_data(
        &BufferDescriptor {
            label: Some(format!("{label} vertices").into()),
            usage: BufferUsage::Vertex,
        },
        geometry.vertex_bytes(),
    )?;
    let index = match device.create_buffer_with_data(
        &BufferDescriptor {
            label: Some(format!("{label} indices").into()),
            usage: BufferUsage::Index,
        },
        geometry.index_bytes(),
    ) {
        Ok(index) => index,
        Err(err) => {
            if let Err(destroy_err) = device.destroy_buffer(vertex) {
                log::warn!("Failed to release {label} vertex buffer: {destroy_err}");
            }
            return Err(err.into());
        }
    };
    log::debug!(
        "Uploaded {label} geometry: {} bytes of vertices, {} bytes of indices",
        geometry.vertex_bytes().len(),
        geometry.index_bytes().len()
    );
    Ok(SlotBuffers { vertex, index })
}

fn destroy_slot<D: GraphicsDevice>(device: &mut D, buffers: SlotBuffers) {
    for id in [buffers.vertex, buffers.index] {
        if let Err(err) = device.destroy_buffer(id) {
            log::warn!("Failed to release buffer {id:?}: {err}");
        }
    }
}
