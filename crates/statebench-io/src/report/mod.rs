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

//! The flat text report.
//!
//! The report holds two sections, triangle throughput then batch throughput.
//! Each is a header line, a column line, and one row per sweep point:
//!
//! ```text
//! Tri_per_sec_statistics
//! Tri_per_batch No_state_change Change_only_program No_program_change Change_state
//! 10 12.5 11.25 9.75 8.5
//! ```
//!
//! Values are space separated, unquoted, and use Rust's shortest round-trip
//! float formatting (`1.0` prints as `1`). Columns always follow the
//! [`ChangeStatePolicy`] declaration order.

mod error;

pub use self::error::ReportError;

use statebench_core::{ChangeStatePolicy, PolicyTable, Statistics, Throughput};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The file name appended to the output prefix.
pub const REPORT_FILE_NAME: &str = "statistics.txt";

/// Header line of the triangle-throughput section.
pub const TRIANGLE_SECTION: &str = "Tri_per_sec_statistics";
/// Header line of the batch-throughput section.
pub const BATCH_SECTION: &str = "Batch_per_sec_statistics";
/// Header of the sweep-point column.
pub const POINT_COLUMN: &str = "Tri_per_batch";

/// The report path for an output prefix.
///
/// The prefix is a directory (with its trailing separator) or a file-name
/// prefix: the file name is appended as is, without inserting a separator.
pub fn report_path(output_prefix: &str) -> PathBuf {
    PathBuf::from(format!("{output_prefix}{REPORT_FILE_NAME}"))
}

fn column_line() -> String {
    let mut line = String::from(POINT_COLUMN);
    for policy in ChangeStatePolicy::ALL {
        line.push(' ');
        line.push_str(policy.report_label());
    }
    line
}

fn render_section<T: Throughput>(
    out: &mut String,
    section: &'static str,
    points: &[u32],
    table: &PolicyTable<T>,
) -> Result<(), ReportError> {
    for policy in ChangeStatePolicy::ALL {
        let found = table.column(policy).len();
        if found > points.len() {
            return Err(ReportError::ExtraEntries {
                section,
                policy,
                expected: points.len(),
                found,
            });
        }
    }

    out.push_str(section);
    out.push('\n');
    out.push_str(&column_line());
    out.push('\n');

    for (row, &point) in points.iter().enumerate() {
        out.push_str(&point.to_string());
        for policy in ChangeStatePolicy::ALL {
            let entry = table
                .get(policy, row)
                .ok_or(ReportError::MissingEntry {
                    section,
                    policy,
                    row,
                    triangles_per_batch: point,
                })?;
            if entry.triangles_per_batch() != point {
                return Err(ReportError::Misaligned {
                    section,
                    policy,
                    row,
                    expected: point,
                    found: entry.triangles_per_batch(),
                });
            }
            out.push(' ');
            out.push_str(&entry.value().to_string());
        }
        out.push('\n');
    }
    Ok(())
}

/// Renders both sections of the report.
///
/// ## Errors
/// Fails, without producing partial output, if any (policy, sweep point)
/// cell of either table is missing, misaligned, or in excess.
pub fn render_report(statistics: &Statistics) -> Result<String, ReportError> {
    let mut out = String::new();
    render_section(
        &mut out,
        TRIANGLE_SECTION,
        &statistics.triangle_points,
        &statistics.triangles,
    )?;
    render_section(
        &mut out,
        BATCH_SECTION,
        &statistics.batch_points,
        &statistics.batches,
    )?;
    Ok(out)
}

/// A report file, created up front so that an unusable output path fails
/// before any measurement is taken.
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
    file: BufWriter<File>,
}

impl ReportWriter {
    /// Creates (or truncates) `<output_prefix>statistics.txt`.
    ///
    /// ## Errors
    /// * `ReportError::Io` - If the file cannot be created.
    pub fn create(output_prefix: &str) -> Result<Self, ReportError> {
        let path = report_path(output_prefix);
        let file = File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("Opened report file '{}'", path.display());
        Ok(Self {
            path,
            file: BufWriter::new(file),
        })
    }

    /// The path of the report file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates and writes the results, then closes the file.
    ///
    /// ## Returns
    /// The path of the written report.
    ///
    /// ## Errors
    /// * `ReportError::MissingEntry`, `Misaligned`, `ExtraEntries` - If the
    ///   tables are incomplete. Nothing is written in that case.
    /// * `ReportError::Io` - If writing fails.
    pub fn write(mut self, statistics: &Statistics) -> Result<PathBuf, ReportError> {
        let report = render_report(statistics)?;
        let result = self
            .file
            .write_all(report.as_bytes())
            .and_then(|()| self.file.flush());
        match result {
            Ok(()) => {
                log::info!("Report written to '{}'", self.path.display());
                Ok(self.path)
            }
            Err(source) => Err(ReportError::Io {
                path: self.path,
                source,
            }),
        }
    }
}
