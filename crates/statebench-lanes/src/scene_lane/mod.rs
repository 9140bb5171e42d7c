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

//! Drawable-scene generation.
//!
//! The scene is a fixed 5x4 grid of vertices on the `z = 0` plane and a batch
//! of randomly indexed triangles over it. Triangles are degenerate on purpose:
//! each one repeats its first index, so the rasterizer sees worst-case
//! submission cost for essentially no fill.

use rand::{rngs::StdRng, Rng, SeedableRng};
use statebench_core::math::{LinearRgba, Vec3};

/// Number of grid columns (along x).
pub const GRID_COLUMNS: usize = 5;
/// Number of grid rows (along y).
pub const GRID_ROWS: usize = 4;
/// Number of vertices in the grid.
pub const VERTEX_COUNT: usize = GRID_COLUMNS * GRID_ROWS;

/// Generates the vertex grid spanning `[-1, 1]` on both axes.
///
/// Vertices are emitted column by column: x is the outer loop, y the inner one.
pub fn generate_vertices() -> Vec<Vec3> {
    let x_step = 2.0 / (GRID_COLUMNS - 1) as f32;
    let y_step = 2.0 / (GRID_ROWS - 1) as f32;

    let mut vertices = Vec::with_capacity(VERTEX_COUNT);
    for column in 0..GRID_COLUMNS {
        for row in 0..GRID_ROWS {
            vertices.push(Vec3::new(
                -1.0 + column as f32 * x_step,
                -1.0 + row as f32 * y_step,
                0.0,
            ));
        }
    }
    vertices
}

/// Generates `triangle_count` triangles of 16-bit indices below `vertex_count`.
///
/// Each triangle is `[a, a, b]` with `a` and `b` drawn uniformly.
pub fn generate_indices<R: Rng + ?Sized>(
    rng: &mut R,
    vertex_count: u16,
    triangle_count: u32,
) -> Vec<u16> {
    let mut indices = Vec::with_capacity(triangle_count as usize * 3);
    for _ in 0..triangle_count {
        let first = rng.gen_range(0..vertex_count);
        indices.push(first);
        indices.push(first);
        indices.push(rng.gen_range(0..vertex_count));
    }
    indices
}

/// CPU-side geometry of one batch, ready to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    /// The vertex grid.
    pub vertices: Vec<Vec3>,
    /// Three indices per triangle.
    pub indices: Vec<u16>,
}

impl SceneGeometry {
    /// The vertex data as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index data as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of indices per batch.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Produces the per-configuration geometry and the per-frame clear colors
/// from a single seeded random stream.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    rng: StdRng,
}

impl SceneBuilder {
    /// Creates a builder whose output is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds the grid and a fresh random batch of `triangles_per_batch` triangles.
    pub fn build(&mut self, triangles_per_batch: u32) -> SceneGeometry {
        let vertices = generate_vertices();
        let indices = generate_indices(&mut self.rng, vertices.len() as u16, triangles_per_batch);
        SceneGeometry { vertices, indices }
    }

    /// Draws the next clear color: each channel is `k / 255` with `k` in
    /// `0..255`, alpha is zero.
    pub fn next_clear_color(&mut self) -> LinearRgba {
        let mut channel = || self.rng.gen_range(0u8..255) as f32 / 255.0;
        let r = channel();
        let g = channel();
        let b = channel();
        LinearRgba::new(r, g, b, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_column_major_and_spans_clip_space() {
        let vertices = generate_vertices();
        assert_eq!(vertices.len(), 20);
        assert!(vertices[0].approx_eq(Vec3::new(-1.0, -1.0, 0.0)));
        assert!(vertices[1].approx_eq(Vec3::new(-1.0, -1.0 + 2.0 / 3.0, 0.0)));
        assert!(vertices[3].approx_eq(Vec3::new(-1.0, 1.0, 0.0)));
        assert!(vertices[4].approx_eq(Vec3::new(-0.5, -1.0, 0.0)));
        assert!(vertices[19].approx_eq(Vec3::new(1.0, 1.0, 0.0)));
        assert!(vertices.iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn indices_repeat_the_first_vertex() {
        let mut rng = StdRng::seed_from_u64(7);
        let indices = generate_indices(&mut rng, 20, 500);
        assert_eq!(indices.len(), 1500);
        for triangle in indices.chunks_exact(3) {
            assert_eq!(triangle[0], triangle[1]);
        }
        assert!(indices.iter().all(|&i| i < 20));
    }

    #[test]
    fn zero_triangles_gives_no_indices() {
        let mut builder = SceneBuilder::new(1);
        let geometry = builder.build(0);
        assert!(geometry.indices.is_empty());
        assert_eq!(geometry.vertices.len(), VERTEX_COUNT);
    }

    #[test]
    fn same_seed_same_scene() {
        let a = SceneBuilder::new(42).build(100);
        let b = SceneBuilder::new(42).build(100);
        assert_eq!(a, b);
    }

    #[test]
    fn byte_views_match_element_sizes() {
        let geometry = SceneBuilder::new(3).build(10);
        assert_eq!(geometry.vertex_bytes().len(), VERTEX_COUNT * 12);
        assert_eq!(geometry.index_bytes().len(), 30 * 2);
        assert_eq!(geometry.index_count(), 30);
    }

    #[test]
    fn clear_color_is_transparent_and_normalized() {
        let mut builder = SceneBuilder::new(9);
        for _ in 0..100 {
            let color = builder.next_clear_color();
            assert_eq!(color.a, 0.0);
            for c in [color.r, color.g, color.b] {
                assert!((0.0..1.0).contains(&c));
            }
        }
    }
}
