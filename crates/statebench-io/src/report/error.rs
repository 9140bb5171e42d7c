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

use statebench_core::ChangeStatePolicy;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing the report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report file could not be created or written.
    #[error("Failed to write report '{}': {source}", path.display())]
    Io {
        /// The report path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A (policy, sweep point) pair was never measured.
    #[error("{section}: no {policy} entry for row {row} ({triangles_per_batch} triangles per batch)")]
    MissingEntry {
        /// The report section.
        section: &'static str,
        /// The policy whose column is short.
        policy: ChangeStatePolicy,
        /// The row index.
        row: usize,
        /// The sweep point of the row.
        triangles_per_batch: u32,
    },

    /// A column holds an entry measured at another sweep point than its row.
    #[error("{section}: {policy} entry at row {row} was measured at {found} triangles per batch, expected {expected}")]
    Misaligned {
        /// The report section.
        section: &'static str,
        /// The policy whose column is misaligned.
        policy: ChangeStatePolicy,
        /// The row index.
        row: usize,
        /// The sweep point of the row.
        expected: u32,
        /// The sweep point of the entry.
        found: u32,
    },

    /// A column holds more entries than there are sweep points.
    #[error("{section}: {policy} has {found} entries for {expected} sweep points")]
    ExtraEntries {
        /// The report section.
        section: &'static str,
        /// The policy whose column is long.
        policy: ChangeStatePolicy,
        /// Number of sweep points.
        expected: usize,
        /// Number of entries.
        found: usize,
    },
}
