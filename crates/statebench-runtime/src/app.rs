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

//! The windowed run, driven by the `winit` event loop.

use crate::cli::Args;
use anyhow::{anyhow, Context, Result};
use statebench_agents::collect_statistics;
use statebench_core::BenchConfig;
use statebench_infra::{GlWindowBuilder, GlowDevice};
use std::path::PathBuf;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

/// Runs the whole benchmark once the event loop hands out a window, then exits.
///
/// The sweeps block the event loop; the window is not redrawn or resized
/// while they run.
pub struct BenchmarkApp {
    args: Args,
    config: BenchConfig,
    result: Option<Result<PathBuf>>,
}

impl BenchmarkApp {
    pub fn new(args: Args, config: BenchConfig) -> Self {
        Self {
            args,
            config,
            result: None,
        }
    }

    /// The report path, or the error that ended the run.
    pub fn into_result(self) -> Result<PathBuf> {
        self.result
            .unwrap_or_else(|| Err(anyhow!("The event loop exited before the benchmark ran")))
    }

    fn run(&self, event_loop: &ActiveEventLoop) -> Result<PathBuf> {
        let (window, gl) = GlWindowBuilder::new()
            .with_title("Statebench")
            .with_dimensions(self.args.width, self.args.height)
            .with_vsync(!self.args.no_vsync)
            .build(event_loop)?;

        // The compositor may not grant the requested size.
        let (width, height) = window.inner_size();
        if (width, height) != (self.args.width, self.args.height) {
            log::warn!(
                "Requested a {}x{} surface, got {width}x{height}",
                self.args.width,
                self.args.height
            );
        }

        let device = GlowDevice::new(gl).context("Failed to initialize the GL device")?;
        // The device is consumed and dropped here, while its context is still alive.
        collect_statistics(
            device,
            || window.present(),
            width,
            height,
            &self.args.output,
            &self.config,
        )
    }
}

impl ApplicationHandler for BenchmarkApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.result.is_some() {
            return;
        }

        log::info!("Application resumed. Starting the benchmark...");
        let result = self.run(event_loop);
        if let Err(err) = &result {
            log::error!("Benchmark failed: {err:#}");
        }
        self.result = Some(result);
        event_loop.exit();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            log::info!("Shutdown requested, exiting event loop...");
            event_loop.exit();
        }
    }
}
