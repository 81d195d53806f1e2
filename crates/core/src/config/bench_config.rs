// SPDX-FileCopyrightText: 2026 sim-bench developers
// SPDX-License-Identifier: GPL-3.0-or-later

// crates/core/src/config/bench_config.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default repetition count when the `run` section omits it.
pub const DEFAULT_REPETITIONS: u32 = 10;
/// Default per-run step count when the `run` section omits it.
pub const DEFAULT_NUM_STEPS: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchConfig {
    pub target: Target,      // which simulator binary to launch
    pub sweep: Sweep,        // input folder + ordered input file names
    pub run: Option<Run>,    // repetitions/num_steps/mode, all defaulted
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: Option<String>,
    pub bin_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweep {
    pub input_folder: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Run {
    pub repetitions: Option<u32>,
    pub num_steps: Option<u32>,
    pub mode: Option<RunMode>,
}

/// What the per-input clock measures.
///
/// `LaunchOverhead` keeps the historical behavior of the launcher scripts:
/// the clock stops as soon as the last spawn request has been issued, so the
/// measurement covers process-creation cost only. `WaitAll` stops the clock
/// after every child has exited, measuring actual simulation runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    LaunchOverhead,
    WaitAll,
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::LaunchOverhead
    }
}

impl BenchConfig {
    /// Parse a sweep config from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse sweep JSON config: {}", e))
    }

    /// Parse a sweep config from a YAML string by converting to JSON first
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse YAML: {}", e))?;

        let json_str = serde_json::to_string(&yaml_value)
            .map_err(|e| anyhow::anyhow!("Failed to convert YAML to JSON: {}", e))?;

        Self::from_json(&json_str)
    }

    /// Load a BenchConfig from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        Self::from_yaml(&text)
    }

    /// Display name for the target, falling back to the binary path
    pub fn target_name(&self) -> &str {
        self.target
            .name
            .as_deref()
            .unwrap_or(self.target.bin_path.as_str())
    }

    pub fn repetitions(&self) -> u32 {
        self.run
            .as_ref()
            .and_then(|r| r.repetitions)
            .unwrap_or(DEFAULT_REPETITIONS)
    }

    pub fn num_steps(&self) -> u32 {
        self.run
            .as_ref()
            .and_then(|r| r.num_steps)
            .unwrap_or(DEFAULT_NUM_STEPS)
    }

    pub fn mode(&self) -> RunMode {
        self.run
            .as_ref()
            .and_then(|r| r.mode)
            .unwrap_or_default()
    }

    /// Input paths in configuration order, input_folder joined with each name
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.sweep
            .inputs
            .iter()
            .map(|name| Path::new(&self.sweep.input_folder).join(name))
            .collect()
    }

    /// Convert to a fully-resolved SweepPlan
    pub fn to_plan(&self) -> Result<crate::plan::SweepPlan> {
        crate::plan::SweepPlan::from_config(self)
    }
}
