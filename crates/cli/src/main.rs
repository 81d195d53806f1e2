// SPDX-FileCopyrightText: 2026 sim-bench developers
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sim_bench_core::config::{self, BenchConfig, Run, RunMode};
use sim_bench_core::SweepRunner;
use tracing::info;

/// sim-bench – benchmark launcher for the precompiled simulation binaries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a benchmark sweep from a YAML config file
    Run {
        /// Path to a sweep YAML config file
        #[arg(short, long)]
        config: std::path::PathBuf,

        /// If set, dump the parsed config back to stdout instead of running
        #[arg(long)]
        pretty: bool,

        /// Timing mode override (launch-overhead, wait-all)
        #[arg(long)]
        mode: Option<String>,
    },
    /// Validate a sweep config without running it
    Validate {
        /// Path to a sweep YAML config file
        #[arg(short, long)]
        config: std::path::PathBuf,

        /// Convert YAML to JSON and print it
        #[arg(long)]
        to_json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sim_bench={},sim_bench_core={}",
            log_level, log_level
        ))
        .init();

    info!("sim-bench v{} starting", env!("CARGO_PKG_VERSION"));

    match args.command {
        Commands::Run {
            config,
            pretty,
            mode,
        } => run_sweep(&config, pretty, mode.as_deref()).await,
        Commands::Validate { config, to_json } => validate_config(&config, to_json).await,
    }
}

fn parse_mode(mode: &str) -> Result<RunMode> {
    match mode.to_lowercase().as_str() {
        "launch-overhead" | "launch_overhead" => Ok(RunMode::LaunchOverhead),
        "wait-all" | "wait_all" => Ok(RunMode::WaitAll),
        _ => Err(anyhow::anyhow!(
            "Unsupported mode '{}'. Use 'launch-overhead' or 'wait-all'",
            mode
        )),
    }
}

async fn run_sweep(
    config_path: &std::path::Path,
    pretty: bool,
    mode_override: Option<&str>,
) -> Result<()> {
    info!("Loading sweep config from: {:?}", config_path);

    let mut bench_config = BenchConfig::from_yaml_file(config_path)
        .with_context(|| format!("Failed to load sweep config from {:?}", config_path))?;

    if let Some(mode) = mode_override {
        let mode = parse_mode(mode)?;
        bench_config.run.get_or_insert_with(Run::default).mode = Some(mode);
    }

    if pretty {
        println!("=== Parsed Sweep Configuration ===");
        print!("{}", serde_yaml::to_string(&bench_config)?);
        let plan = bench_config.to_plan()?;
        println!("Resolved mode: {:?}", plan.mode);
        println!("Total launches: {}", plan.total_launches());
        return Ok(());
    }

    let mut runner = SweepRunner::new(bench_config)?;
    runner.run().await.context("Benchmark sweep failed")?;

    runner.get_metrics().print_summary();

    info!("✅ Benchmark sweep completed successfully");
    Ok(())
}

async fn validate_config(config_path: &std::path::Path, to_json: bool) -> Result<()> {
    info!("Validating sweep config: {:?}", config_path);

    let yaml_content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;

    if to_json {
        let json_content = config::yaml_to_json(&yaml_content)?;
        println!("{}", json_content);
        return Ok(());
    }

    let bench_config = BenchConfig::from_yaml(&yaml_content)?;

    println!("✅ YAML parsing: SUCCESS");
    println!("✅ Target: {}", bench_config.target_name());
    println!("✅ Binary path: {}", bench_config.target.bin_path);
    println!("✅ Input folder: {}", bench_config.sweep.input_folder);
    println!("✅ Inputs: {}", bench_config.sweep.inputs.len());

    let plan = bench_config.to_plan()?;
    println!("✅ SweepPlan conversion: SUCCESS");
    println!("  - Repetitions: {}", plan.repetitions);
    println!("  - Steps per run: {}", plan.num_steps);
    println!("  - Mode: {:?}", plan.mode);

    for path in plan.input_paths() {
        println!("  - Input: {}", path.display());
    }

    println!("  - Total: {} launch requests", plan.total_launches());

    println!("🎉 Sweep configuration is valid and ready to run!");

    Ok(())
}
