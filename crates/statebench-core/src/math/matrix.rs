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

//! Defines the `Mat4` type.

use super::{Vec3, Vec4};

/// A 4x4 column-major matrix, used as the per-state transform uniform.
///
/// The memory layout is column-major, which is what `glUniformMatrix4fv`
/// expects with `transpose = false`: the translation lives in elements
/// 12, 13 and 14 of [`Mat4::to_cols_array`].
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a translation matrix.
    ///
    /// # Arguments
    ///
    /// * `v`: The translation vector to apply.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self {
            cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::from_vec3(v, 1.0)],
        }
    }

    /// Returns the translation part of the matrix.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        let c = self.cols[3];
        Vec3::new(c.x, c.y, c.z)
    }

    /// Flattens the matrix into 16 floats in column-major order.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        let [c0, c1, c2, c3] = self.cols;
        [
            c0.x, c0.y, c0.z, c0.w, c1.x, c1.y, c1.z, c1.w, c2.x, c2.y, c2.z, c2.w, c3.x, c3.y,
            c3.z, c3.w,
        ]
    }
}

impl Default for Mat4 {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_ones_on_the_diagonal() {
        let m = Mat4::default().to_cols_array();
        for (i, value) in m.iter().enumerate() {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(*value, expected, "element {i}");
        }
    }

    #[test]
    fn translation_is_stored_in_the_last_column() {
        let m = Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0));
        let flat = m.to_cols_array();
        assert_eq!(flat[12], 0.5);
        assert_eq!(flat[13], 0.0);
        assert_eq!(flat[14], 0.0);
        assert_eq!(flat[15], 1.0);
        assert!(m.translation().approx_eq(Vec3::new(0.5, 0.0, 0.0)));
    }
}
