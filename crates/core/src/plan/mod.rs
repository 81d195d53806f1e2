// crates/core/src/plan/mod.rs
use crate::config::{BenchConfig, RunMode};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Fully-resolved sweep parameters, with every default applied and every
/// invariant checked. The runner only ever sees one of these.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub target_name: String,
    pub bin_path: PathBuf,
    pub input_folder: PathBuf,
    pub inputs: Vec<String>,
    pub repetitions: u32,
    pub num_steps: u32,
    pub mode: RunMode,
}

impl SweepPlan {
    pub fn from_config(cfg: &BenchConfig) -> Result<Self> {
        if cfg.target.bin_path.is_empty() {
            bail!("target.bin_path must not be empty");
        }
        if cfg.sweep.inputs.is_empty() {
            bail!("sweep.inputs must name at least one input file");
        }
        // Zero repetitions or steps would make the per-iteration metric a
        // division by zero.
        let repetitions = cfg.repetitions();
        if repetitions == 0 {
            bail!("run.repetitions must be positive");
        }
        let num_steps = cfg.num_steps();
        if num_steps == 0 {
            bail!("run.num_steps must be positive");
        }

        Ok(Self {
            target_name: cfg.target_name().to_string(),
            bin_path: PathBuf::from(&cfg.target.bin_path),
            input_folder: PathBuf::from(&cfg.sweep.input_folder),
            inputs: cfg.sweep.inputs.clone(),
            repetitions,
            num_steps,
            mode: cfg.mode(),
        })
    }

    /// Input paths in sweep order
    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.inputs
            .iter()
            .map(|name| self.input_folder.join(name))
            .collect()
    }

    /// Argument vector spawned for one input, as displayed and as executed
    pub fn argv(&self, input_path: &Path) -> Vec<String> {
        vec![
            self.bin_path.display().to_string(),
            input_path.display().to_string(),
            self.num_steps.to_string(),
        ]
    }

    /// Launch requests the whole sweep will issue
    pub fn total_launches(&self) -> u64 {
        self.inputs.len() as u64 * self.repetitions as u64
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            target_name: "simulator".to_string(),
            bin_path: PathBuf::from("./simulator"),
            input_folder: PathBuf::from("./maps"),
            inputs: Vec::new(),
            repetitions: 10,
            num_steps: 10_000,
            mode: RunMode::LaunchOverhead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;

    fn sample_config() -> BenchConfig {
        BenchConfig {
            target: Target {
                name: Some("evacuation".to_string()),
                bin_path: "./evacuation".to_string(),
            },
            sweep: Sweep {
                input_folder: "./maps".to_string(),
                inputs: vec!["a.csv".to_string(), "b.csv".to_string()],
            },
            run: Some(Run {
                repetitions: Some(2),
                num_steps: Some(5),
                mode: Some(RunMode::WaitAll),
            }),
        }
    }

    #[test]
    fn test_plan_from_config() {
        let plan = SweepPlan::from_config(&sample_config()).unwrap();

        assert_eq!(plan.target_name, "evacuation");
        assert_eq!(plan.bin_path, PathBuf::from("./evacuation"));
        assert_eq!(plan.inputs, vec!["a.csv", "b.csv"]);
        assert_eq!(plan.repetitions, 2);
        assert_eq!(plan.num_steps, 5);
        assert_eq!(plan.mode, RunMode::WaitAll);
        assert_eq!(plan.total_launches(), 4);
    }

    #[test]
    fn test_plan_applies_defaults() {
        let mut cfg = sample_config();
        cfg.run = None;
        let plan = SweepPlan::from_config(&cfg).unwrap();

        assert_eq!(plan.repetitions, DEFAULT_REPETITIONS);
        assert_eq!(plan.num_steps, DEFAULT_NUM_STEPS);
        assert_eq!(plan.mode, RunMode::LaunchOverhead);
    }

    #[test]
    fn test_plan_rejects_zero_repetitions() {
        let mut cfg = sample_config();
        cfg.run = Some(Run {
            repetitions: Some(0),
            ..Default::default()
        });
        let err = SweepPlan::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("repetitions"));
    }

    #[test]
    fn test_plan_rejects_zero_steps() {
        let mut cfg = sample_config();
        cfg.run = Some(Run {
            num_steps: Some(0),
            ..Default::default()
        });
        let err = SweepPlan::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("num_steps"));
    }

    #[test]
    fn test_plan_rejects_empty_inputs() {
        let mut cfg = sample_config();
        cfg.sweep.inputs.clear();
        assert!(SweepPlan::from_config(&cfg).is_err());
    }

    #[test]
    fn test_input_paths_join_folder_in_order() {
        let plan = SweepPlan::from_config(&sample_config()).unwrap();
        let paths = plan.input_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], PathBuf::from("./maps/a.csv"));
        assert_eq!(paths[1], PathBuf::from("./maps/b.csv"));
    }

    #[test]
    fn test_argv_matches_process_contract() {
        let plan = SweepPlan::from_config(&sample_config()).unwrap();
        let argv = plan.argv(&plan.input_paths()[0]);
        assert_eq!(argv, vec!["./evacuation", "./maps/a.csv", "5"]);
    }
}
