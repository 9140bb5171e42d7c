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

//! Provides the public, backend-agnostic rendering contracts of the benchmark.
//!
//! This module defines the "common language" shared by the render backend and
//! the concrete devices. It contains the abstract [`GraphicsDevice`] trait, the
//! data structures describing pipeline states and draw calls, and the error
//! types of the rendering path.
//!
//! This module defines the 'what' of rendering, while the 'how' is handled by a
//! concrete device in the `statebench-infra` crate (an OpenGL device built on
//! `glow`, or a headless recording device) which implements these traits. The
//! render backend in `statebench-lanes` drives the trait without knowing which
//! device sits behind it.

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::{RenderError, ResourceError, ShaderError};
pub use self::traits::GraphicsDevice;
