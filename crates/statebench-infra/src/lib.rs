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

//! # Statebench Infra
//!
//! Concrete implementations of the [`GraphicsDevice`] contract and of the
//! platform shim the benchmark runs in.
//!
//! - [`graphics::gl::GlowDevice`] drives a real OpenGL or OpenGL ES context.
//! - [`graphics::headless::RecordingDevice`] records or counts commands
//!   without a GPU.
//! - `platform::window::GlWindow` (feature `platform`) opens a window with a
//!   current GL context and presents frames.
//!
//! [`GraphicsDevice`]: statebench_core::GraphicsDevice

#![warn(missing_docs)]

pub mod graphics;
#[cfg(feature = "platform")]
pub mod platform;

pub use graphics::gl::GlowDevice;
pub use graphics::headless::{CommandCounts, DeviceCommand, RecordingDevice};
#[cfg(feature = "platform")]
pub use platform::window::{GlWindow, GlWindowBuilder};
