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

//! Pipeline states and the two slots the benchmark alternates between.

use super::shader::{ProgramId, UniformLocation};
use crate::math::{LinearRgba, Mat4, Vec3};

/// The three boolean render toggles re-applied by the state-changing policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderToggles {
    /// If `true`, alpha blending is enabled.
    pub alpha_blending: bool,
    /// If `true`, fragments are depth tested.
    pub depth_test: bool,
    /// If `true`, depth values are written to the depth buffer.
    pub depth_write: bool,
}

impl RenderToggles {
    /// Every toggle enabled.
    pub const ALL_ON: Self = Self {
        alpha_blending: true,
        depth_test: true,
        depth_write: true,
    };
    /// Every toggle disabled.
    pub const ALL_OFF: Self = Self {
        alpha_blending: false,
        depth_test: false,
        depth_write: false,
    };
}

/// The bundle of shader program, uniform values and render toggles active for
/// a draw call.
///
/// Created once per slot when the render backend is built and never mutated
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    /// The program this state draws with.
    pub program: ProgramId,
    /// Location of the color uniform inside `program`.
    pub color_location: UniformLocation,
    /// Location of the transform uniform inside `program`.
    pub matrix_location: UniformLocation,
    /// The flat color uploaded before drawing.
    pub color: LinearRgba,
    /// The transform uploaded before drawing: identity plus a translation.
    pub transform: Mat4,
    /// Blending and depth toggles.
    pub toggles: RenderToggles,
}

/// One of the two alternating pipeline-state slots.
///
/// Each slot owns one program and one vertex/index buffer pair. Draw calls
/// alternate between the slots by the parity of their position in the frame:
/// even positions use [`PipelineSlot::B`], odd positions [`PipelineSlot::A`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineSlot {
    /// Program 0, buffer pair 0, every toggle on, shifted right.
    A,
    /// Program 1, buffer pair 1, every toggle off, shifted left.
    B,
}

impl PipelineSlot {
    /// Both slots, in storage order.
    pub const ALL: [PipelineSlot; 2] = [PipelineSlot::A, PipelineSlot::B];

    /// Returns the slot used by the draw call at `position` within a frame.
    #[inline]
    pub const fn for_draw_index(position: usize) -> Self {
        if position % 2 == 1 {
            PipelineSlot::A
        } else {
            PipelineSlot::B
        }
    }

    /// Index of the slot's program and buffer pair.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PipelineSlot::A => 0,
            PipelineSlot::B => 1,
        }
    }

    /// The color drawn by this slot.
    pub const fn color(self) -> LinearRgba {
        match self {
            PipelineSlot::A => LinearRgba::MAGENTA,
            PipelineSlot::B => LinearRgba::GREEN,
        }
    }

    /// The translation applied by this slot's transform.
    pub const fn translation(self) -> Vec3 {
        match self {
            PipelineSlot::A => Vec3::new(0.5, 0.0, 0.0),
            PipelineSlot::B => Vec3::new(-0.5, 0.0, 0.0),
        }
    }

    /// The render toggles of this slot.
    pub const fn toggles(self) -> RenderToggles {
        match self {
            PipelineSlot::A => RenderToggles::ALL_ON,
            PipelineSlot::B => RenderToggles::ALL_OFF,
        }
    }

    /// Builds this slot's pipeline state around a linked program.
    pub fn pipeline_state(
        self,
        program: ProgramId,
        color_location: UniformLocation,
        matrix_location: UniformLocation,
    ) -> PipelineState {
        PipelineState {
            program,
            color_location,
            matrix_location,
            color: self.color(),
            transform: Mat4::from_translation(self.translation()),
            toggles: self.toggles(),
        }
    }
}
