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

//! Defines the hierarchy of error types for the rendering path.
//!
//! Resource creation failures are always surfaced: a program that failed to
//! compile or link never turns into a zero handle that is drawn with anyway.

use crate::renderer::api::{BufferId, ProgramId};
use std::fmt;

/// An error related to the compilation or linking of a shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    CompilationError {
        /// A descriptive label for the program.
        label: String,
        /// Which stage failed (`vertex` or `fragment`).
        stage: &'static str,
        /// The compiler's info log.
        details: String,
    },
    /// The stages compiled but the program failed to link.
    LinkError {
        /// A descriptive label for the program.
        label: String,
        /// The linker's info log.
        details: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::CompilationError {
                label,
                stage,
                details,
            } => {
                write!(
                    f,
                    "Shader compilation failed for '{label}' ({stage} stage): {details}"
                )
            }
            ShaderError::LinkError { label, details } => {
                write!(f, "Program link failed for '{label}': {details}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to the creation or use of a GPU resource.
#[derive(Debug)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// A uniform the pipeline state needs is not active in the program.
    UniformNotFound {
        /// The program that was queried.
        program: ProgramId,
        /// The uniform name.
        name: String,
    },
    /// The program handle does not refer to a live program.
    InvalidProgram(ProgramId),
    /// The buffer handle does not refer to a live buffer.
    InvalidBuffer(BufferId),
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::UniformNotFound { program, name } => {
                write!(f, "Uniform '{name}' not found in program {program:?}")
            }
            ResourceError::InvalidProgram(id) => write!(f, "Invalid program handle: {id:?}"),
            ResourceError::InvalidBuffer(id) => write!(f, "Invalid buffer handle: {id:?}"),
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

/// A high-level error of the render backend.
#[derive(Debug)]
pub enum RenderError {
    /// The requested configuration cannot be drawn (e.g. zero triangles per batch).
    InvalidConfiguration(String),
    /// An error occurred while managing a GPU resource.
    ResourceError(ResourceError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidConfiguration(msg) => {
                write!(f, "Invalid render backend configuration: {msg}")
            }
            RenderError::ResourceError(err) => {
                write!(f, "Graphics resource operation failed: {err}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::ResourceError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::ResourceError(err)
    }
}

impl From<ShaderError> for RenderError {
    fn from(err: ShaderError) -> Self {
        RenderError::ResourceError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn shader_error_display() {
        let err = ShaderError::CompilationError {
            label: "Slot A".to_string(),
            stage: "vertex",
            details: "0:3: syntax error".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Shader compilation failed for 'Slot A' (vertex stage): 0:3: syntax error"
        );

        let err_link = ShaderError::LinkError {
            label: "Slot B".to_string(),
            details: "varying mismatch".to_string(),
        };
        assert_eq!(
            format!("{err_link}"),
            "Program link failed for 'Slot B': varying mismatch"
        );
    }

    #[test]
    fn render_error_wraps_shader_error_twice() {
        let shader_err = ShaderError::LinkError {
            label: "Slot A".to_string(),
            details: "boom".to_string(),
        };
        let render_err: RenderError = shader_err.into();
        assert_eq!(
            format!("{render_err}"),
            "Graphics resource operation failed: Shader resource error: Program link failed for 'Slot A': boom"
        );
        assert!(render_err.source().is_some());
        assert!(render_err.source().unwrap().source().is_some());
    }

    #[test]
    fn uniform_not_found_names_the_uniform() {
        let err = ResourceError::UniformNotFound {
            program: ProgramId(3),
            name: "g_color".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Uniform 'g_color' not found in program ProgramId(3)"
        );
        assert!(err.source().is_none());
    }
}
