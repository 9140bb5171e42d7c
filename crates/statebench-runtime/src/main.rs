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

// Statebench
// Measures how GPU throughput degrades with the kind of state changed between draw calls.

mod app;
mod cli;

use anyhow::{Context, Result};
use app::BenchmarkApp;
use clap::Parser;
use cli::Args;
use statebench_agents::collect_statistics;
use statebench_infra::RecordingDevice;
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.bench_config()?;

    if args.headless {
        log::info!("Running headless: no GPU work is submitted");
        let path = collect_statistics(
            RecordingDevice::counting(),
            || Ok(()),
            args.width,
            args.height,
            &args.output,
            &config,
        )?;
        log::info!("Statistics saved to '{}'", path.display());
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create the event loop")?;
    let mut app = BenchmarkApp::new(args, config);
    event_loop.run_app(&mut app)?;

    let path = app.into_result()?;
    log::info!("Statistics saved to '{}'", path.display());
    Ok(())
}
