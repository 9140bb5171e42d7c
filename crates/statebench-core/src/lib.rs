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

//! # Statebench Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! shared by every part of the state-change benchmark: the math primitives
//! uploaded to the GPU, the [`Clock`] used to delimit timing windows, the
//! backend-agnostic renderer vocabulary (including the [`GraphicsDevice`]
//! seam and the [`ChangeStatePolicy`] knob), the run configuration and the
//! result tables handed to the report writer.

#![warn(missing_docs)]

pub mod config;
pub mod math;
pub mod renderer;
pub mod statistics;
pub mod utils;

pub use config::{BenchConfig, ConfigError, TargetProfile};
pub use renderer::{ChangeStatePolicy, GraphicsDevice};
pub use statistics::{BatchThroughput, PolicyTable, Statistics, Throughput, TriangleThroughput};
pub use utils::clock::{Clock, MonotonicClock};
