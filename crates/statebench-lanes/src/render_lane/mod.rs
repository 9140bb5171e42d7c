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

//! Rendering lane - hot path for draw submission

mod backend;
mod bound_state;

pub use backend::*;
pub use bound_state::*;

#[cfg(test)]
mod tests {
    use super::*;
    use statebench_core::{
        math::{LinearRgba, Mat4, Vec3},
        renderer::{
            BufferId, BufferUsage, ChangeStatePolicy, GraphicsDevice, PipelineSlot, ProgramId,
            RenderError, RenderToggles, ResourceError, ShaderError, UniformLocation,
        },
    };
    use statebench_infra::{DeviceCommand, RecordingDevice};

    const WIDTH: u32 = 640;
    const HEIGHT: u32 = 480;

    fn backend() -> RenderBackend<RecordingDevice> {
        let mut backend = RenderBackend::new(RecordingDevice::new(), WIDTH, HEIGHT, 1).unwrap();
        backend.device_mut().take_commands();
        backend
    }

    /// Commands issued by one `draw()`, minus the clear color which is random.
    fn draw_commands(backend: &mut RenderBackend<RecordingDevice>) -> Vec<DeviceCommand> {
        backend.device_mut().take_commands();
        backend.draw();
        let mut commands = backend.device_mut().take_commands();
        assert_eq!(
            commands[0],
            DeviceCommand::SetViewport {
                width: WIDTH,
                height: HEIGHT
            }
        );
        assert!(matches!(commands[1], DeviceCommand::ClearColor(c) if c.a == 0.0));
        commands.drain(..2);
        commands
    }

    #[test]
    fn construction_initialises_both_programs() {
        let backend = RenderBackend::new(RecordingDevice::new(), WIDTH, HEIGHT, 1).unwrap();
        let commands = backend.device().commands();

        // Slot A is created first: color at location 0, matrix at 1.
        let expected_a = [
            DeviceCommand::CreateProgram {
                id: ProgramId(0),
                label: "Slot A".to_string(),
            },
            DeviceCommand::UseProgram(ProgramId(0)),
            DeviceCommand::SetUniformMatrix(UniformLocation(1), Mat4::IDENTITY),
            DeviceCommand::SetUniformColor(UniformLocation(0), LinearRgba::RED),
        ];
        assert_eq!(&commands[..4], &expected_a);
        assert_eq!(
            commands[5],
            DeviceCommand::UseProgram(ProgramId(1)),
            "slot B's program is created second and left current"
        );
        assert_eq!(backend.bound_state().program, Some(ProgramId(1)));

        let a = backend.pipeline_state(PipelineSlot::A);
        assert_eq!(a.program, ProgramId(0));
        assert_eq!(a.color, LinearRgba::MAGENTA);
        assert_eq!(a.toggles, RenderToggles::ALL_ON);
        assert!(a.transform.translation().approx_eq(Vec3::new(0.5, 0.0, 0.0)));

        let b = backend.pipeline_state(PipelineSlot::B);
        assert_eq!(b.program, ProgramId(1));
        assert_eq!(b.color, LinearRgba::GREEN);
        assert_eq!(b.toggles, RenderToggles::ALL_OFF);
        assert!(b.transform.translation().approx_eq(Vec3::new(-0.5, 0.0, 0.0)));
    }

    #[test]
    fn failed_compilation_is_fatal() {
        let result = RenderBackend::new(
            RecordingDevice::new().with_failing_compilation(),
            WIDTH,
            HEIGHT,
            1,
        );
        assert!(matches!(
            result,
            Err(RenderError::ResourceError(ResourceError::Shader(
                ShaderError::CompilationError { .. }
            )))
        ));
    }

    #[test]
    fn configure_builds_budget_over_batch_draw_calls() {
        let mut backend = backend();
        backend
            .configure(30, 1000, ChangeStatePolicy::Change)
            .unwrap();

        let calls = backend.draw_calls();
        assert_eq!(calls.len(), 33);
        for (position, call) in calls.iter().enumerate() {
            let expected = if position % 2 == 0 {
                PipelineSlot::B
            } else {
                PipelineSlot::A
            };
            assert_eq!(call.slot, expected);
            assert_eq!(call.index_count, 90);
            assert_eq!(call.triangle_count(), 30);
            assert_eq!(call.state, *backend.pipeline_state(expected));
        }
        assert_ne!(calls[0].vertex_buffer, calls[1].vertex_buffer);
        assert_ne!(calls[0].index_buffer, calls[1].index_buffer);
        assert_eq!(backend.policy(), ChangeStatePolicy::Change);
    }

    #[test]
    fn configure_uploads_both_slots_and_leaves_slot_b_bound() {
        let mut backend = backend();
        backend
            .configure(10, 100, ChangeStatePolicy::DontChange)
            .unwrap();

        let commands = backend.device_mut().take_commands();
        assert_eq!(
            commands,
            vec![
                DeviceCommand::CreateBuffer {
                    id: BufferId(0),
                    usage: BufferUsage::Vertex,
                    size: 20 * 12,
                },
                DeviceCommand::CreateBuffer {
                    id: BufferId(1),
                    usage: BufferUsage::Index,
                    size: 30 * 2,
                },
                DeviceCommand::CreateBuffer {
                    id: BufferId(2),
                    usage: BufferUsage::Vertex,
                    size: 20 * 12,
                },
                DeviceCommand::CreateBuffer {
                    id: BufferId(3),
                    usage: BufferUsage::Index,
                    size: 30 * 2,
                },
                DeviceCommand::BindVertexBuffer(BufferId(2)),
                DeviceCommand::BindIndexBuffer(BufferId(3)),
            ]
        );

        let device = backend.device();
        assert_eq!(
            device.buffer_data(BufferId(1)),
            device.buffer_data(BufferId(3)),
            "both slots draw the same geometry"
        );
        assert_eq!(backend.bound_state().vertex_buffer, Some(BufferId(2)));
        assert_eq!(backend.bound_state().index_buffer, Some(BufferId(3)));
    }

    #[test]
    fn reconfigure_replaces_previous_buffers() {
        let mut backend = backend();
        backend
            .configure(10, 100, ChangeStatePolicy::DontChange)
            .unwrap();
        backend
            .configure(50, 100, ChangeStatePolicy::Change)
            .unwrap();

        let destroyed: Vec<_> = backend
            .device()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::DestroyBuffer(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(
            destroyed,
            vec![BufferId(0), BufferId(1), BufferId(2), BufferId(3)]
        );
        assert_eq!(backend.device().live_buffers(), 4);
        assert_eq!(backend.draw_calls().len(), 2);
        assert_eq!(backend.draw_calls()[0].vertex_buffer, BufferId(6));
    }

    #[test]
    fn failed_release_still_destroys_the_other_buffers() {
        let mut backend = backend();
        backend.configure(30, 100, ChangeStatePolicy::Change).unwrap();
        // Slot A's vertex buffer disappears behind the backend's back.
        backend.device_mut().destroy_buffer(BufferId(0)).unwrap();
        backend.device_mut().take_commands();

        let err = backend
            .configure(30, 100, ChangeStatePolicy::Change)
            .unwrap_err();

        assert!(matches!(
            err,
            RenderError::ResourceError(ResourceError::InvalidBuffer(BufferId(0)))
        ));
        let destroyed: Vec<BufferId> = backend
            .device()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DeviceCommand::DestroyBuffer(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(destroyed, vec![BufferId(1), BufferId(2), BufferId(3)]);
        assert_eq!(backend.device().live_buffers(), 0);
        assert!(backend.draw_calls().is_empty());
    }

    #[test]
    fn zero_triangles_per_batch_is_rejected() {
        let mut backend = backend();
        let err = backend
            .configure(0, 1000, ChangeStatePolicy::Change)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfiguration(_)));
    }

    #[test]
    fn batch_larger_than_budget_only_clears() {
        let mut backend = backend();
        backend
            .configure(2000, 1000, ChangeStatePolicy::Change)
            .unwrap();
        assert!(backend.draw_calls().is_empty());

        let commands = draw_commands(&mut backend);
        assert_eq!(commands, vec![DeviceCommand::UseProgram(ProgramId(0))]);
        assert_eq!(backend.last_frame_stats().draw_calls, 0);
    }

    #[test]
    fn change_applies_everything_per_call() {
        let mut backend = backend();
        backend.configure(10, 20, ChangeStatePolicy::Change).unwrap();
        let commands = draw_commands(&mut backend);

        let b = *backend.pipeline_state(PipelineSlot::B);
        let a = *backend.pipeline_state(PipelineSlot::A);
        assert_eq!(
            commands,
            vec![
                DeviceCommand::UseProgram(ProgramId(0)),
                // Call 0: slot B.
                DeviceCommand::UseProgram(ProgramId(1)),
                DeviceCommand::BindVertexBuffer(BufferId(2)),
                DeviceCommand::BindIndexBuffer(BufferId(3)),
                DeviceCommand::SetUniformColor(b.color_location, LinearRgba::GREEN),
                DeviceCommand::SetUniformMatrix(b.matrix_location, b.transform),
                DeviceCommand::SetDepthWrite(false),
                DeviceCommand::SetDepthTest(false),
                DeviceCommand::SetBlending(false),
                DeviceCommand::DrawIndexed(30),
                // Call 1: slot A.
                DeviceCommand::UseProgram(ProgramId(0)),
                DeviceCommand::BindVertexBuffer(BufferId(0)),
                DeviceCommand::BindIndexBuffer(BufferId(1)),
                DeviceCommand::SetUniformColor(a.color_location, LinearRgba::MAGENTA),
                DeviceCommand::SetUniformMatrix(a.matrix_location, a.transform),
                DeviceCommand::SetDepthWrite(true),
                DeviceCommand::SetDepthTest(true),
                DeviceCommand::SetBlending(true),
                DeviceCommand::DrawIndexed(30),
            ]
        );
    }

    #[test]
    fn dont_change_only_draws() {
        let mut backend = backend();
        backend
            .configure(10, 40, ChangeStatePolicy::DontChange)
            .unwrap();
        let commands = draw_commands(&mut backend);
        assert_eq!(
            commands,
            vec![
                DeviceCommand::UseProgram(ProgramId(0)),
                DeviceCommand::DrawIndexed(30),
                DeviceCommand::DrawIndexed(30),
                DeviceCommand::DrawIndexed(30),
                DeviceCommand::DrawIndexed(30),
            ]
        );
    }

    #[test]
    fn change_only_program_rebinds_programs_and_nothing_else() {
        let mut backend = backend();
        backend
            .configure(10, 30, ChangeStatePolicy::ChangeOnlyProgram)
            .unwrap();
        let commands = draw_commands(&mut backend);
        assert_eq!(
            commands,
            vec![
                DeviceCommand::UseProgram(ProgramId(0)),
                DeviceCommand::UseProgram(ProgramId(1)),
                DeviceCommand::DrawIndexed(30),
                DeviceCommand::UseProgram(ProgramId(0)),
                DeviceCommand::DrawIndexed(30),
                DeviceCommand::UseProgram(ProgramId(1)),
                DeviceCommand::DrawIndexed(30),
            ]
        );
    }

    #[test]
    fn dont_change_program_keeps_the_prologue_program() {
        let mut backend = backend();
        backend
            .configure(10, 40, ChangeStatePolicy::DontChangeProgram)
            .unwrap();
        let commands = draw_commands(&mut backend);

        let program_binds = commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::UseProgram(_)))
            .count();
        assert_eq!(program_binds, 1);
        assert_eq!(commands.len(), 1 + 4 * 8);
        assert_eq!(backend.bound_state().program, Some(ProgramId(0)));
        assert_eq!(backend.bound_state().toggles, Some(RenderToggles::ALL_ON));
    }

    #[test]
    fn frame_stats_reflect_the_policy() {
        let mut backend = backend();
        let mut per_policy = Vec::new();
        for policy in ChangeStatePolicy::ALL {
            backend.configure(10, 100, policy).unwrap();
            backend.draw();
            backend.draw();
            per_policy.push(backend.last_frame_stats());
        }

        for stats in &per_policy {
            assert_eq!(stats.frame_number, 1);
            assert_eq!(stats.draw_calls, 10);
            assert_eq!(stats.triangles, 100);
        }
        let changes: Vec<_> = per_policy
            .iter()
            .map(|s| (s.program_binds, s.buffer_binds, s.uniform_updates, s.toggle_updates))
            .collect();
        assert_eq!(
            changes,
            vec![(1, 0, 0, 0), (11, 0, 0, 0), (1, 20, 20, 30), (11, 20, 20, 30)]
        );
        assert!(per_policy
            .windows(2)
            .all(|w| w[0].state_changes() < w[1].state_changes()));
    }

    #[test]
    fn frame_counter_restarts_on_configure() {
        let mut backend = backend();
        backend.configure(10, 10, ChangeStatePolicy::Change).unwrap();
        backend.draw();
        backend.draw();
        backend.draw();
        assert_eq!(backend.last_frame_stats().frame_number, 2);

        backend.configure(10, 10, ChangeStatePolicy::Change).unwrap();
        assert_eq!(backend.last_frame_stats().frame_number, 0);
        backend.draw();
        assert_eq!(backend.last_frame_stats().frame_number, 0);
    }

    #[test]
    fn finish_drains_the_device() {
        let mut backend = backend();
        backend.finish();
        assert_eq!(backend.device().counts().finishes, 1);
        assert_eq!(backend.surface_size(), (WIDTH, HEIGHT));
    }

    #[test]
    fn same_seed_draws_the_same_clear_colors() {
        let clears = |seed| {
            let mut backend =
                RenderBackend::new(RecordingDevice::new(), WIDTH, HEIGHT, seed).unwrap();
            backend.configure(10, 10, ChangeStatePolicy::DontChange).unwrap();
            backend.device_mut().take_commands();
            for _ in 0..5 {
                backend.draw();
            }
            backend
                .device_mut()
                .take_commands()
                .into_iter()
                .filter(|c| matches!(c, DeviceCommand::ClearColor(_)))
                .collect::<Vec<_>>()
        };
        assert_eq!(clears(5), clears(5));
        assert_eq!(clears(5).len(), 5);
    }
}
