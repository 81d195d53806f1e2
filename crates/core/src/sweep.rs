use anyhow::{Context, Result};
use chrono::Utc;
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::config::{BenchConfig, RunMode};
use crate::metrics::{Metrics, SweepRecord};
use crate::plan::SweepPlan;

/// Main sweep execution engine
pub struct SweepRunner {
    plan: SweepPlan,
    metrics: Metrics,
}

impl SweepRunner {
    pub fn new(config: BenchConfig) -> Result<Self> {
        Ok(Self::from_plan(config.to_plan()?))
    }

    pub fn from_plan(plan: SweepPlan) -> Self {
        Self {
            plan,
            metrics: Metrics::new(),
        }
    }

    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    pub fn get_metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Execute the full sweep: one timed launch burst per configured input.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Starting sweep for {}: {} inputs, {} repetitions, {} steps, mode {:?}",
            self.plan.target_name,
            self.plan.inputs.len(),
            self.plan.repetitions,
            self.plan.num_steps,
            self.plan.mode,
        );

        let start = Instant::now();

        // Exactly once per invocation, before any launch.
        ensure_executable(&self.plan.bin_path)?;

        let inputs: Vec<(String, PathBuf)> = self
            .plan
            .inputs
            .iter()
            .cloned()
            .zip(self.plan.input_paths())
            .collect();

        for (input_name, input_path) in &inputs {
            self.run_input(input_name, input_path).await?;
        }

        let total_time = start.elapsed();
        info!("Sweep completed in {:?}", total_time);
        self.metrics.record_total_time(total_time);

        Ok(())
    }

    async fn run_input(&mut self, input_name: &str, input_path: &Path) -> Result<()> {
        let argv = self.plan.argv(input_path);
        let started_at = Utc::now();
        let start = Instant::now();

        println!("{:?}", argv);

        let mut children: Vec<Child> = Vec::with_capacity(self.plan.repetitions as usize);
        for rep in 0..self.plan.repetitions {
            let child = Command::new(&self.plan.bin_path)
                .arg(input_path)
                .arg(self.plan.num_steps.to_string())
                .spawn()
                .with_context(|| {
                    format!(
                        "failed to launch repetition {} of {} for input {}",
                        rep, self.plan.target_name, input_name
                    )
                })?;
            children.push(child);
        }

        if self.plan.mode == RunMode::WaitAll {
            let statuses = join_all(children.iter_mut().map(|child| child.wait())).await;
            for (rep, status) in statuses.into_iter().enumerate() {
                let status = status.with_context(|| {
                    format!(
                        "failed waiting on repetition {} for input {}",
                        rep, input_name
                    )
                })?;
                if !status.success() {
                    warn!(
                        "repetition {} for input {} exited with {}",
                        rep, input_name, status
                    );
                }
            }
        }

        let elapsed = start.elapsed();
        let finished_at = Utc::now();
        let launched = children.len() as u32;

        // In launch-overhead mode the handles drop unwaited: the runtime
        // reaps children that exit while the driver is alive, and any still
        // running when it exits continue on their own.
        drop(children);

        let record = SweepRecord {
            input: input_name.to_string(),
            started_at,
            finished_at,
            elapsed,
            launched,
            repetitions: self.plan.repetitions,
            num_steps: self.plan.num_steps,
        };

        println!(
            "input: {}, rep: {}, iterations: {}",
            input_name, self.plan.repetitions, self.plan.num_steps
        );
        println!("1 iteration time: {}", record.per_iteration_time());
        println!("Total time:  {}", elapsed.as_secs_f64());
        println!("---");

        self.metrics.record_sweep(record);
        Ok(())
    }
}

/// The simulator binaries ship without execute bits set; grant rwxr-xr-x
/// before the first launch.
fn ensure_executable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("target executable not found: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = metadata.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to make {} executable", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = metadata;

    Ok(())
}
