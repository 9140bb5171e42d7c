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

//! Provides 3D and 4D vector types.

use super::EPSILON;
// --- Vec3 ---

/// A 3-dimensional vector with `f32` components.
///
/// Also the vertex format of the benchmark scene: one tightly packed position
/// per vertex, 12 bytes each.
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Checks if two vectors are approximately equal within [`EPSILON`].
    #[inline]
    pub fn approx_eq(&self, other: Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }
}

// --- Vec4 ---

/// A 4-dimensional vector with `f32` components, used as a matrix column.
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vec4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The w component of the vector.
    pub w: f32,
}

impl Vec4 {
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive W-axis.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new `Vec4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a `Vec4` from a `Vec3` and a `w` component.
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vec3>(), 12);
        let verts = [Vec3::new(1.0, 2.0, 3.0), Vec3::X];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 24);
    }

    #[test]
    fn approx_eq_tolerates_rounding() {
        let v = Vec3::new(0.1 + 0.2, 0.3, 0.0);
        assert!(v.approx_eq(Vec3::new(0.3, 0.3, 0.0)));
        assert!(!v.approx_eq(Vec3::new(0.3, 0.3, 0.001)));
    }

    #[test]
    fn from_vec3_keeps_components() {
        let v = Vec4::from_vec3(Vec3::new(1.0, 2.0, 3.0), 4.0);
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0, 4.0));
    }
}
