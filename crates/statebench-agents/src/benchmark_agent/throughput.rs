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

//! Conversion of timed frame runs into throughput figures.

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Elapsed time in seconds, clamped to at least one nanosecond so that a
/// throughput is always finite.
pub fn elapsed_seconds(elapsed_ns: u64) -> f64 {
    elapsed_ns.max(1) as f64 / NANOS_PER_SEC
}

/// Millions of triangles drawn over a run of `frame_count` frames of
/// `batch_count` batches.
pub fn million_triangles(batch_count: u32, triangles_per_batch: u32, frame_count: u32) -> f64 {
    (f64::from(batch_count) * f64::from(triangles_per_batch)) / 1_000_000.0 * f64::from(frame_count)
}

/// Millions of triangles per second of a triangle-sweep run.
pub fn million_triangles_per_sec(
    batch_count: u32,
    triangles_per_batch: u32,
    frame_count: u32,
    elapsed_ns: u64,
) -> f64 {
    million_triangles(batch_count, triangles_per_batch, frame_count) / elapsed_seconds(elapsed_ns)
}

/// Thousands of batches per second of a batch-sweep run.
pub fn thousand_batches_per_sec(frame_count: u32, frame_batch_budget: u32, elapsed_ns: u64) -> f64 {
    (f64::from(frame_count) / 1000.0 * f64::from(frame_batch_budget)) / elapsed_seconds(elapsed_ns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_thousand_batches_of_ten() {
        assert_eq!(million_triangles(100_000, 10, 1000), 1000.0);
        assert_eq!(million_triangles_per_sec(100_000, 10, 1000, 2_000_000_000), 500.0);
        assert_eq!(million_triangles_per_sec(100_000, 10, 1000, 1_000_000_000), 1000.0);
    }

    #[test]
    fn thousand_frames_of_the_desktop_batch_budget() {
        assert_eq!(thousand_batches_per_sec(1000, 4000, 1_000_000_000), 4000.0);
        assert_eq!(thousand_batches_per_sec(1000, 500, 4_000_000_000), 125.0);
    }

    #[test]
    fn zero_elapsed_time_stays_finite() {
        let value = million_triangles_per_sec(1, 1, 1, 0);
        assert!(value.is_finite());
        assert_eq!(value, 1e-6 / 1e-9);
        assert!(thousand_batches_per_sec(1000, 4000, 0).is_finite());
    }

    #[test]
    fn empty_run_measures_nothing() {
        assert_eq!(million_triangles_per_sec(0, 2000, 1000, 10), 0.0);
    }
}
