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

//! Shader programs and their uniform slots.

/// An opaque handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub usize);

/// An opaque handle to a uniform inside a specific program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub usize);

/// Binds a vertex attribute name to a fixed location before linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding<'a> {
    /// The attribute location.
    pub location: u32,
    /// The attribute name as declared in the vertex shader.
    pub name: &'a str,
}

/// A descriptor used to compile and link a [`ProgramId`].
#[derive(Debug, Clone, Copy)]
pub struct ProgramDescriptor<'a> {
    /// A debug label, reported in compile/link errors.
    pub label: &'a str,
    /// GLSL source of the vertex stage.
    pub vertex_source: &'a str,
    /// GLSL source of the fragment stage.
    pub fragment_source: &'a str,
    /// Attribute locations to bind before linking.
    pub attribute_bindings: &'a [AttributeBinding<'a>],
}

/// Name of the transform uniform of the flat-color program.
pub const MATRIX_UNIFORM: &str = "g_matrix";
/// Name of the color uniform of the flat-color program.
pub const COLOR_UNIFORM: &str = "g_color";

/// Vertex stage of the flat-color program. Written in the GLSL subset accepted
/// by both GLES2 and desktop compatibility contexts.
pub const FLAT_COLOR_VERTEX_SRC: &str = r#"
uniform mat4 g_matrix;
attribute vec4 vPosition;
void main()
{
    gl_Position = g_matrix * vPosition;
}
"#;

/// Fragment stage of the flat-color program.
pub const FLAT_COLOR_FRAGMENT_SRC: &str = r#"
#ifdef GL_ES
precision mediump float;
#endif
uniform vec4 g_color;
void main()
{
    gl_FragColor = g_color;
}
"#;

const FLAT_COLOR_ATTRIBUTES: &[AttributeBinding<'static>] = &[AttributeBinding {
    location: 0,
    name: "vPosition",
}];

impl ProgramDescriptor<'static> {
    /// The program every pipeline state of the benchmark uses: transforms a
    /// position by `g_matrix` and fills with `g_color`.
    pub const fn flat_color(label: &'static str) -> Self {
        Self {
            label,
            vertex_source: FLAT_COLOR_VERTEX_SRC,
            fragment_source: FLAT_COLOR_FRAGMENT_SRC,
            attribute_bindings: FLAT_COLOR_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_color_program_declares_its_uniforms() {
        let desc = ProgramDescriptor::flat_color("test");
        assert!(desc.vertex_source.contains(MATRIX_UNIFORM));
        assert!(desc.fragment_source.contains(COLOR_UNIFORM));
        assert_eq!(desc.attribute_bindings.len(), 1);
        assert_eq!(desc.attribute_bindings[0].location, 0);
        assert!(desc.vertex_source.contains(desc.attribute_bindings[0].name));
    }
}
