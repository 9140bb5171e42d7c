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

//! The monotonic nanosecond time source used to delimit timing windows.

use std::time::Instant;

/// A monotonic time source with nanosecond resolution.
///
/// Readings never decrease within a process. The absolute value carries no
/// meaning; only differences between two readings do.
pub trait Clock {
    /// Returns the current reading in nanoseconds.
    fn now_ns(&self) -> u64;

    /// Returns the number of nanoseconds elapsed since `start_ns`, saturating at zero.
    #[inline]
    fn elapsed_ns(&self, start_ns: u64) -> u64 {
        self.now_ns().saturating_sub(start_ns)
    }
}

/// A [`Clock`] backed by the platform's monotonic high-resolution counter.
///
/// Readings are nanoseconds since the clock was created, so a `u64` does not
/// wrap for roughly 584 years.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a new clock whose zero is "now".
    #[inline]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}
