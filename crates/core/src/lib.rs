//! Core library for sim-bench ─ sweep configuration, process launching and timing.

pub mod config;
pub mod metrics;
pub mod plan;
pub mod sweep;

pub use config::{BenchConfig, RunMode};
pub use metrics::{Metrics, SweepRecord};
pub use plan::SweepPlan;
pub use sweep::SweepRunner;
