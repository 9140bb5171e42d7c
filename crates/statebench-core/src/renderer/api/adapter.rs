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

//! Describes the device a benchmark run executes on.

use std::fmt;

/// A backend-agnostic representation of a graphics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsBackendType {
    /// Desktop OpenGL.
    OpenGL,
    /// OpenGL ES.
    OpenGLES,
    /// No GPU at all; commands are recorded or counted in memory.
    Headless,
    /// An unknown or unsupported backend.
    #[default]
    Unknown,
}

/// Information about the device, logged once at the start of a run so that
/// a report can be traced back to the hardware that produced it.
#[derive(Debug, Clone, Default)]
pub struct RendererAdapterInfo {
    /// The renderer string reported by the driver.
    pub name: String,
    /// The vendor string reported by the driver.
    pub vendor: String,
    /// The API version string reported by the driver.
    pub version: String,
    /// The graphics API in use.
    pub backend_type: GraphicsBackendType,
}

impl fmt::Display for RendererAdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {:?} {})",
            self.name, self.vendor, self.backend_type, self.version
        )
    }
}
