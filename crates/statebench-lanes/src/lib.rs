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

//! # Statebench Lanes
//!
//! The hot path of the benchmark: generating the drawable scene and
//! submitting it to a [`GraphicsDevice`] under a [`ChangeStatePolicy`].
//!
//! [`GraphicsDevice`]: statebench_core::GraphicsDevice
//! [`ChangeStatePolicy`]: statebench_core::ChangeStatePolicy

pub mod render_lane;
pub mod scene_lane;

pub use render_lane::{BoundState, RenderBackend};
pub use scene_lane::{SceneBuilder, SceneGeometry};
