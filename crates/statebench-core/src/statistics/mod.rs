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

//! Result tables of a benchmark run.
//!
//! Results are stored per [`ChangeStatePolicy`] in a fixed four-slot table,
//! each slot an ordered sequence aligned by position with its sweep-point
//! list. Column order is always the policy declaration order.

use crate::renderer::ChangeStatePolicy;

/// Anything that reports a single throughput figure for one sweep point.
pub trait Throughput {
    /// The sweep point the entry was measured at.
    fn triangles_per_batch(&self) -> u32;
    /// The measured throughput, in the unit of its sweep.
    fn value(&self) -> f64;
}

/// One point of the triangle-throughput sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleThroughput {
    /// Triangles per batch.
    pub triangles_per_batch: u32,
    /// Batches drawn per frame.
    pub draw_call_count: u32,
    /// Millions of triangles per second.
    pub million_triangles_per_sec: f64,
}

impl Throughput for TriangleThroughput {
    fn triangles_per_batch(&self) -> u32 {
        self.triangles_per_batch
    }

    fn value(&self) -> f64 {
        self.million_triangles_per_sec
    }
}

/// One point of the batch-throughput sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchThroughput {
    /// Triangles per batch.
    pub triangles_per_batch: u32,
    /// Thousands of batches per second.
    pub thousand_batches_per_sec: f64,
}

impl Throughput for BatchThroughput {
    fn triangles_per_batch(&self) -> u32 {
        self.triangles_per_batch
    }

    fn value(&self) -> f64 {
        self.thousand_batches_per_sec
    }
}

/// A write-once table with one ordered column per [`ChangeStatePolicy`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable<T> {
    columns: [Vec<T>; ChangeStatePolicy::COUNT],
}

impl<T> PolicyTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            columns: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Appends the next entry of a policy's column.
    pub fn push(&mut self, policy: ChangeStatePolicy, entry: T) {
        self.columns[policy.index()].push(entry);
    }

    /// All entries measured for a policy, in sweep order.
    pub fn column(&self, policy: ChangeStatePolicy) -> &[T] {
        &self.columns[policy.index()]
    }

    /// The entry of a policy at a given row, if it was measured.
    pub fn get(&self, policy: ChangeStatePolicy, row: usize) -> Option<&T> {
        self.columns[policy.index()].get(row)
    }

    /// Whether every column holds exactly `rows` entries.
    pub fn is_complete(&self, rows: usize) -> bool {
        self.columns.iter().all(|column| column.len() == rows)
    }
}

impl<T> Default for PolicyTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a run measured, plus the sweep points the rows are aligned to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    /// Sweep points of the triangle-throughput table.
    pub triangle_points: Vec<u32>,
    /// Sweep points of the batch-throughput table.
    pub batch_points: Vec<u32>,
    /// Millions of triangles per second, per policy and triangle point.
    pub triangles: PolicyTable<TriangleThroughput>,
    /// Thousands of batches per second, per policy and batch point.
    pub batches: PolicyTable<BatchThroughput>,
}

impl Statistics {
    /// Creates empty tables for the given sweep points.
    pub fn new(triangle_points: Vec<u32>, batch_points: Vec<u32>) -> Self {
        Self {
            triangle_points,
            batch_points,
            triangles: PolicyTable::new(),
            batches: PolicyTable::new(),
        }
    }

    /// Whether every (policy, sweep point) pair of both tables has an entry.
    pub fn is_complete(&self) -> bool {
        self.triangles.is_complete(self.triangle_points.len())
            && self.batches.is_complete(self.batch_points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_policy_not_insertion_order() {
        let mut table = PolicyTable::new();
        for policy in ChangeStatePolicy::ALL.iter().rev() {
            table.push(*policy, policy.index() as f64);
        }
        for policy in ChangeStatePolicy::ALL {
            assert_eq!(table.column(policy), &[policy.index() as f64]);
        }
        assert_eq!(table.get(ChangeStatePolicy::Change, 0), Some(&3.0));
        assert_eq!(table.get(ChangeStatePolicy::Change, 1), None);
    }

    #[test]
    fn statistics_completeness() {
        let mut stats = Statistics::new(vec![10], vec![]);
        assert!(!stats.is_complete());

        for policy in ChangeStatePolicy::ALL {
            stats.triangles.push(
                policy,
                TriangleThroughput {
                    triangles_per_batch: 10,
                    draw_call_count: 5,
                    million_triangles_per_sec: 1.0,
                },
            );
        }
        assert!(stats.is_complete());

        stats.triangles.push(
            ChangeStatePolicy::DontChange,
            TriangleThroughput {
                triangles_per_batch: 10,
                draw_call_count: 5,
                million_triangles_per_sec: 1.0,
            },
        );
        assert!(!stats.is_complete());
    }

    #[test]
    fn throughput_accessors() {
        let tri = TriangleThroughput {
            triangles_per_batch: 30,
            draw_call_count: 33333,
            million_triangles_per_sec: 12.5,
        };
        let batch = BatchThroughput {
            triangles_per_batch: 50,
            thousand_batches_per_sec: 7.25,
        };
        assert_eq!(tri.triangles_per_batch(), 30);
        assert_eq!(tri.value(), 12.5);
        assert_eq!(batch.triangles_per_batch(), 50);
        assert_eq!(batch.value(), 7.25);
    }
}
