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

//! Command-line arguments.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use statebench_core::{BenchConfig, TargetProfile};
use std::path::PathBuf;

/// Hardware class selecting the default budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// 1,000,000 triangles and 4,000 batches per frame.
    Desktop,
    /// 100,000 triangles and 500 batches per frame.
    Constrained,
}

impl From<Profile> for TargetProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Desktop => TargetProfile::Desktop,
            Profile::Constrained => TargetProfile::Constrained,
        }
    }
}

/// Draw-call state-change benchmark
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Prefix of the report path: a directory with its trailing separator, or a file-name prefix
    #[arg(short, long, default_value = "")]
    pub output: String,

    /// JSON configuration file; unset fields fall back to the profile defaults
    #[arg(short, long, conflicts_with = "profile")]
    pub config: Option<PathBuf>,

    /// Default budgets to use when no configuration file is given
    #[arg(short, long, value_enum, default_value_t = Profile::Desktop)]
    pub profile: Profile,

    /// Window width in pixels
    #[arg(long, default_value_t = 1980)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    /// Do not wait for vertical blank when presenting
    #[arg(long)]
    pub no_vsync: bool,

    /// Count commands on a recording device instead of opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    /// The run configuration named by the arguments.
    pub fn bench_config(&self) -> Result<BenchConfig> {
        match &self.config {
            Some(path) => BenchConfig::from_file(path),
            None => Ok(BenchConfig::for_profile(self.profile.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["statebench"]);
        assert_eq!(args.output, "");
        assert_eq!((args.width, args.height), (1980, 1080));
        assert!(!args.no_vsync);
        assert!(!args.headless);
        assert_eq!(args.bench_config().unwrap(), BenchConfig::default());
    }

    #[test]
    fn constrained_profile() {
        let args = Args::parse_from(["statebench", "--profile", "constrained", "-o", "out/"]);
        assert_eq!(args.output, "out/");
        let config = args.bench_config().unwrap();
        assert_eq!(config.profile, TargetProfile::Constrained);
        assert_eq!(config.frame_batch_budget, 500);
    }

    #[test]
    fn config_and_profile_conflict() {
        let result = Args::try_parse_from([
            "statebench",
            "--config",
            "bench.json",
            "--profile",
            "desktop",
        ]);
        assert!(result.is_err());
    }
}
