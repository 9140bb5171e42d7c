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

//! Acts as the **[A]gent** of the benchmark.
//!
//! For every [`ChangeStatePolicy`], in declaration order, the driver runs two
//! sweeps over the render backend:
//! - the triangle sweep keeps the triangles per frame fixed and varies the
//!   batch size, measuring millions of triangles per second;
//! - the batch sweep keeps the batches per frame fixed and varies the batch
//!   size, measuring thousands of batches per second.
//!
//! Each sweep point is timed over a fixed number of frames, each followed by
//! a device drain, with a single present at the end of the run.
//!
//! [`ChangeStatePolicy`]: statebench_core::ChangeStatePolicy

mod driver;
pub mod throughput;

pub use driver::*;
