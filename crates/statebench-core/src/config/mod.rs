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

//! Benchmark run configuration.
//!
//! A run is fully described by a [`BenchConfig`]: how many frames each sweep
//! point is timed over, the per-frame work budgets, the two sweep-point lists
//! and the seed of the random geometry. Defaults come from a [`TargetProfile`];
//! a JSON file may override any subset of the fields.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Number of frames timed per sweep point.
pub const DEFAULT_FRAME_COUNT: u32 = 1000;

/// Default seed of the index generator and of the clear colors.
pub const DEFAULT_SEED: u64 = 1;

/// Triangles-per-batch points of the batch-throughput sweep.
pub const DEFAULT_BATCH_POINTS: [u32; 11] =
    [10, 50, 100, 250, 500, 1000, 2000, 3000, 4000, 5000, 10000];

/// Triangles-per-batch points of the triangle-throughput sweep. The frame
/// triangle budget itself is appended as the last point (a single batch per frame).
const TRIANGLE_POINTS_BELOW_BUDGET: [u32; 27] = [
    10, 30, 50, 70, 90, 110, 130, 150, 170, 190, 300, 500, 700, 900, 1100, 1300, 1500, 5000,
    10000, 20000, 30000, 40000, 50000, 60000, 70000, 80000, 90000,
];

/// The class of hardware a run targets. Constrained targets get budgets ten
/// (triangles) and eight (batches) times smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetProfile {
    /// Desktop-class GPUs.
    #[default]
    Desktop,
    /// Mobile and other constrained GPUs.
    Constrained,
}

impl TargetProfile {
    /// Triangles submitted per frame by the triangle-throughput sweep.
    pub const fn frame_triangle_budget(self) -> u32 {
        match self {
            TargetProfile::Desktop => 1_000_000,
            TargetProfile::Constrained => 100_000,
        }
    }

    /// Batches submitted per frame by the batch-throughput sweep.
    pub const fn frame_batch_budget(self) -> u32 {
        match self {
            TargetProfile::Desktop => 4000,
            TargetProfile::Constrained => 500,
        }
    }
}

/// The triangle-throughput sweep points for a given frame triangle budget.
pub fn default_triangle_points(frame_triangle_budget: u32) -> Vec<u32> {
    let mut points = TRIANGLE_POINTS_BELOW_BUDGET.to_vec();
    points.push(frame_triangle_budget);
    points
}

/// An error found while loading or validating a [`BenchConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(serde_json::Error),
    /// A field holds a value the benchmark cannot run with.
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "Failed to parse benchmark config: {err}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid benchmark config field '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Complete configuration of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// The profile the budgets were derived from.
    pub profile: TargetProfile,
    /// Frames timed per sweep point.
    pub frame_count: u32,
    /// Triangles per frame in the triangle-throughput sweep.
    pub frame_triangle_budget: u32,
    /// Batches per frame in the batch-throughput sweep.
    pub frame_batch_budget: u32,
    /// Triangles-per-batch points of the triangle-throughput sweep, ascending.
    pub triangle_points: Vec<u32>,
    /// Triangles-per-batch points of the batch-throughput sweep, ascending.
    pub batch_points: Vec<u32>,
    /// Seed of the random indices and clear colors.
    pub seed: u64,
    /// Drain the GPU before timing each batch-throughput point, as the
    /// triangle sweep always does. Off by default so results stay comparable
    /// with historical data.
    pub drain_before_batch_sweep: bool,
}

/// The on-disk form: every field optional, missing ones fall back to the profile.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BenchConfigOverrides {
    profile: Option<TargetProfile>,
    frame_count: Option<u32>,
    frame_triangle_budget: Option<u32>,
    frame_batch_budget: Option<u32>,
    triangle_points: Option<Vec<u32>>,
    batch_points: Option<Vec<u32>>,
    seed: Option<u64>,
    drain_before_batch_sweep: Option<bool>,
}

impl BenchConfigOverrides {
    fn resolve(self) -> BenchConfig {
        let profile = self.profile.unwrap_or_default();
        let frame_triangle_budget = self
            .frame_triangle_budget
            .unwrap_or(profile.frame_triangle_budget());
        BenchConfig {
            profile,
            frame_count: self.frame_count.unwrap_or(DEFAULT_FRAME_COUNT),
            frame_triangle_budget,
            frame_batch_budget: self
                .frame_batch_budget
                .unwrap_or(profile.frame_batch_budget()),
            triangle_points: self
                .triangle_points
                .unwrap_or_else(|| default_triangle_points(frame_triangle_budget)),
            batch_points: self
                .batch_points
                .unwrap_or_else(|| DEFAULT_BATCH_POINTS.to_vec()),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            drain_before_batch_sweep: self.drain_before_batch_sweep.unwrap_or(false),
        }
    }
}

impl BenchConfig {
    /// The default configuration of a profile.
    pub fn for_profile(profile: TargetProfile) -> Self {
        BenchConfigOverrides {
            profile: Some(profile),
            ..Default::default()
        }
        .resolve()
    }

    /// Load a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: BenchConfigOverrides = serde_json::from_str(json)?;
        let config = overrides.resolve();
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read benchmark config '{}'", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Failed to load benchmark config '{}'", path.display()))?;
        log::info!("Loaded benchmark config from '{}'", path.display());
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write benchmark config '{}'", path.display()))?;
        Ok(())
    }

    /// Checks that every field describes a runnable benchmark.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.frame_count == 0 {
            return Err(invalid("frame_count", "must be at least 1"));
        }
        if self.frame_triangle_budget == 0 {
            return Err(invalid("frame_triangle_budget", "must be at least 1"));
        }
        if self.frame_batch_budget == 0 {
            return Err(invalid("frame_batch_budget", "must be at least 1"));
        }
        for (field, points) in [
            ("triangle_points", &self.triangle_points),
            ("batch_points", &self.batch_points),
        ] {
            if points.is_empty() {
                return Err(invalid(field, "must list at least one point"));
            }
            if points.contains(&0) {
                return Err(invalid(field, "triangles per batch must be non-zero"));
            }
            // Three indices per triangle must fit in a signed 32-bit draw count.
            if let Some(&too_large) = points.iter().find(|&&p| p > i32::MAX as u32 / 3) {
                return Err(invalid(field, format!("{too_large} triangles per batch is too large")));
            }
        }
        if let Some(&largest) = self.batch_points.iter().max() {
            if largest.checked_mul(self.frame_batch_budget).is_none() {
                return Err(invalid(
                    "frame_batch_budget",
                    format!("{largest} x {} triangles overflows", self.frame_batch_budget),
                ));
            }
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::for_profile(TargetProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_defaults() {
        let config = BenchConfig::default();
        assert_eq!(config.profile, TargetProfile::Desktop);
        assert_eq!(config.frame_count, 1000);
        assert_eq!(config.frame_triangle_budget, 1_000_000);
        assert_eq!(config.frame_batch_budget, 4000);
        assert_eq!(config.triangle_points.len(), 28);
        assert_eq!(config.triangle_points.first(), Some(&10));
        assert_eq!(config.triangle_points.last(), Some(&1_000_000));
        assert_eq!(config.batch_points, DEFAULT_BATCH_POINTS.to_vec());
        assert!(!config.drain_before_batch_sweep);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn constrained_profile_shrinks_budgets() {
        let config = BenchConfig::for_profile(TargetProfile::Constrained);
        assert_eq!(config.frame_triangle_budget, 100_000);
        assert_eq!(config.frame_batch_budget, 500);
        assert_eq!(config.triangle_points.last(), Some(&100_000));
    }

    #[test]
    fn sweep_points_are_ascending() {
        let config = BenchConfig::default();
        assert!(config.triangle_points.windows(2).all(|w| w[0] < w[1]));
        assert!(config.batch_points.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn partial_json_falls_back_to_profile() {
        let json = r#"
        {
            "profile": "constrained",
            "frame_count": 10,
            "batch_points": [10, 20]
        }"#;
        let config = BenchConfig::from_json(json).unwrap();
        assert_eq!(config.profile, TargetProfile::Constrained);
        assert_eq!(config.frame_count, 10);
        assert_eq!(config.frame_batch_budget, 500);
        assert_eq!(config.batch_points, vec![10, 20]);
        assert_eq!(config.triangle_points.last(), Some(&100_000));
    }

    #[test]
    fn overridden_budget_moves_last_triangle_point() {
        let config = BenchConfig::from_json(r#"{ "frame_triangle_budget": 200000 }"#).unwrap();
        assert_eq!(config.triangle_points.last(), Some(&200_000));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = BenchConfig::from_json(r#"{ "frames": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_points_are_rejected() {
        let err = BenchConfig::from_json(r#"{ "triangle_points": [10, 0] }"#).unwrap_err();
        assert!(err.to_string().contains("triangle_points"));

        let err = BenchConfig::from_json(r#"{ "batch_points": [] }"#).unwrap_err();
        assert!(err.to_string().contains("batch_points"));

        let err = BenchConfig::from_json(r#"{ "frame_count": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("frame_count"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        let mut config = BenchConfig::for_profile(TargetProfile::Constrained);
        config.drain_before_batch_sweep = true;
        config.to_file(&path).unwrap();
        let loaded = BenchConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = BenchConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
