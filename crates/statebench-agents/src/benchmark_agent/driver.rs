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

use super::throughput::{million_triangles_per_sec, thousand_batches_per_sec};
use anyhow::Context;
use statebench_core::{
    BatchThroughput, BenchConfig, ChangeStatePolicy, Clock, GraphicsDevice, MonotonicClock,
    Statistics, TriangleThroughput,
};
use statebench_io::ReportWriter;
use statebench_lanes::RenderBackend;
use std::path::PathBuf;

/// Sweeps a [`RenderBackend`] over every policy and sweep point of a
/// [`BenchConfig`], timing each point with a [`Clock`].
#[derive(Debug)]
pub struct BenchmarkDriver<C: Clock> {
    clock: C,
    config: BenchConfig,
}

impl<C: Clock> BenchmarkDriver<C> {
    /// Creates a driver for an already validated configuration.
    pub fn new(clock: C, config: BenchConfig) -> Self {
        Self { clock, config }
    }

    /// The configuration the driver sweeps.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Runs both sweeps for every policy.
    ///
    /// ## Arguments
    /// * `backend` - The render backend, already created on the drawing surface.
    /// * `present` - Called exactly once per sweep point, after the last frame
    ///   and its drain, before the timer stops.
    ///
    /// ## Returns
    /// One entry per (policy, sweep point) pair of both tables.
    pub fn run<D, P>(
        &self,
        backend: &mut RenderBackend<D>,
        present: &mut P,
    ) -> anyhow::Result<Statistics>
    where
        D: GraphicsDevice,
        P: FnMut() -> anyhow::Result<()>,
    {
        let mut statistics = Statistics::new(
            self.config.triangle_points.clone(),
            self.config.batch_points.clone(),
        );

        for policy in ChangeStatePolicy::ALL {
            log::info!("Sweeping policy {policy}");
            for &triangles_per_batch in &self.config.triangle_points {
                let entry =
                    self.measure_triangle_point(backend, present, policy, triangles_per_batch)?;
                statistics.triangles.push(policy, entry);
            }
            for &triangles_per_batch in &self.config.batch_points {
                let entry =
                    self.measure_batch_point(backend, present, policy, triangles_per_batch)?;
                statistics.batches.push(policy, entry);
            }
        }

        Ok(statistics)
    }

    /// Measures one point of the triangle sweep: a fixed triangle budget per
    /// frame split into batches of `triangles_per_batch`.
    ///
    /// The device is drained before the timer starts.
    pub fn measure_triangle_point<D, P>(
        &self,
        backend: &mut RenderBackend<D>,
        present: &mut P,
        policy: ChangeStatePolicy,
        triangles_per_batch: u32,
    ) -> anyhow::Result<TriangleThroughput>
    where
        D: GraphicsDevice,
        P: FnMut() -> anyhow::Result<()>,
    {
        let budget = self.config.frame_triangle_budget;
        backend
            .configure(triangles_per_batch, budget, policy)
            .with_context(|| {
                format!("Failed to configure {triangles_per_batch} triangles per batch under {policy}")
            })?;

        backend.finish();
        let elapsed_ns = self.time_frames(backend, present)?;

        let draw_call_count = budget / triangles_per_batch;
        let million_triangles_per_sec = million_triangles_per_sec(
            draw_call_count,
            triangles_per_batch,
            self.config.frame_count,
            elapsed_ns,
        );

        log::info!(
            "[{policy}] {triangles_per_batch} tri/batch x {draw_call_count} batches: {million_triangles_per_sec:.3} Mtri/s"
        );
        log::debug!("[{policy}] last frame: {:?}", backend.last_frame_stats());

        Ok(TriangleThroughput {
            triangles_per_batch,
            draw_call_count,
            million_triangles_per_sec,
        })
    }

    /// Measures one point of the batch sweep: a fixed number of batches per
    /// frame, each of `triangles_per_batch` triangles.
    ///
    /// The device is drained before the timer starts only when
    /// [`BenchConfig::drain_before_batch_sweep`] is set.
    pub fn measure_batch_point<D, P>(
        &self,
        backend: &mut RenderBackend<D>,
        present: &mut P,
        policy: ChangeStatePolicy,
        triangles_per_batch: u32,
    ) -> anyhow::Result<BatchThroughput>
    where
        D: GraphicsDevice,
        P: FnMut() -> anyhow::Result<()>,
    {
        let batch_budget = self.config.frame_batch_budget;
        let budget = triangles_per_batch
            .checked_mul(batch_budget)
            .with_context(|| {
                format!("{batch_budget} batches of {triangles_per_batch} triangles overflow the frame budget")
            })?;
        backend
            .configure(triangles_per_batch, budget, policy)
            .with_context(|| {
                format!("Failed to configure {batch_budget} batches of {triangles_per_batch} triangles under {policy}")
            })?;

        if self.config.drain_before_batch_sweep {
            backend.finish();
        }
        let elapsed_ns = self.time_frames(backend, present)?;

        let thousand_batches_per_sec =
            thousand_batches_per_sec(self.config.frame_count, batch_budget, elapsed_ns);

        log::info!(
            "[{policy}] {batch_budget} batches x {triangles_per_batch} tri/batch: {thousand_batches_per_sec:.3} kbatch/s"
        );
        log::debug!("[{policy}] last frame: {:?}", backend.last_frame_stats());

        Ok(BatchThroughput {
            triangles_per_batch,
            thousand_batches_per_sec,
        })
    }

    /// Draws and drains `frame_count` frames, presents once, and returns the
    /// elapsed nanoseconds.
    fn time_frames<D, P>(&self, backend: &mut RenderBackend<D>, present: &mut P) -> anyhow::Result<u64>
    where
        D: GraphicsDevice,
        P: FnMut() -> anyhow::Result<()>,
    {
        let start = self.clock.now_ns();
        for _ in 0..self.config.frame_count {
            backend.draw();
            // Per-frame drain so vsync cannot pile frames up.
            backend.finish();
        }
        present().context("Present failed")?;
        Ok(self.clock.elapsed_ns(start))
    }
}

/// Runs the whole benchmark on `device` and writes the report.
///
/// The report file `<output_prefix>statistics.txt` is created before any
/// measurement so that an unusable path fails immediately.
///
/// ## Arguments
/// * `device` - The device to measure, its context current on this thread.
/// * `present` - Presents the drawing surface; called once per sweep point.
/// * `width`, `height` - The drawing surface size.
/// * `output_prefix` - Directory (with trailing separator) or file-name prefix.
/// * `config` - The run configuration; validated here.
///
/// ## Returns
/// The path of the written report.
pub fn collect_statistics<D, P>(
    device: D,
    present: P,
    width: u32,
    height: u32,
    output_prefix: &str,
    config: &BenchConfig,
) -> anyhow::Result<PathBuf>
where
    D: GraphicsDevice,
    P: FnMut() -> anyhow::Result<()>,
{
    collect_statistics_with_clock(
        MonotonicClock::new(),
        device,
        present,
        width,
        height,
        output_prefix,
        config,
    )
}

/// [`collect_statistics`] with an explicit time source.
pub fn collect_statistics_with_clock<C, D, P>(
    clock: C,
    device: D,
    mut present: P,
    width: u32,
    height: u32,
    output_prefix: &str,
    config: &BenchConfig,
) -> anyhow::Result<PathBuf>
where
    C: Clock,
    D: GraphicsDevice,
    P: FnMut() -> anyhow::Result<()>,
{
    config.validate().context("Invalid benchmark configuration")?;
    let writer = ReportWriter::create(output_prefix).context("Failed to open the report file")?;

    log::info!("Benchmarking on {}", device.adapter_info());
    log::info!(
        "Profile {:?}: {} frames per point, {} triangles per frame, {} batches per frame",
        config.profile,
        config.frame_count,
        config.frame_triangle_budget,
        config.frame_batch_budget
    );
    if config.drain_before_batch_sweep {
        log::warn!("Draining before the batch sweep: results are not comparable with undrained runs");
    }

    let mut backend = RenderBackend::new(device, width, height, config.seed)
        .context("Failed to create the render backend")?;
    let driver = BenchmarkDriver::new(clock, config.clone());
    let statistics = driver.run(&mut backend, &mut present)?;

    let path = writer
        .write(&statistics)
        .context("Failed to write the report")?;
    Ok(path)
}
