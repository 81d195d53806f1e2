use chrono::{DateTime, Utc};
use std::time::Duration;

/// Timing record for one input of a sweep
#[derive(Debug, Clone)]
pub struct SweepRecord {
    pub input: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub launched: u32,
    pub repetitions: u32,
    pub num_steps: u32,
}

impl SweepRecord {
    /// Elapsed time divided by (repetitions × steps), the throughput proxy
    pub fn per_iteration_time(&self) -> f64 {
        self.elapsed.as_secs_f64() / (self.repetitions as u64 * self.num_steps as u64) as f64
    }
}

/// Performance metrics collection
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    pub total_time: Option<Duration>,
    pub records: Vec<SweepRecord>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_total_time(&mut self, duration: Duration) {
        self.total_time = Some(duration);
    }

    pub fn record_sweep(&mut self, record: SweepRecord) {
        self.records.push(record);
    }

    pub fn inputs_swept(&self) -> usize {
        self.records.len()
    }

    pub fn total_launches(&self) -> u64 {
        self.records.iter().map(|r| r.launched as u64).sum()
    }

    pub fn print_summary(&self) {
        println!("\n=== Simulation Benchmark Results ===");

        if let Some(total_time) = self.total_time {
            println!("Total Time: {:?}", total_time);
        }

        println!("Inputs Swept: {}", self.inputs_swept());
        println!("Launches Issued: {}", self.total_launches());

        for record in &self.records {
            println!(
                "  {} | {} launches | {:?} | {:e} s/iter",
                record.input,
                record.launched,
                record.elapsed,
                record.per_iteration_time()
            );
        }

        println!("====================================\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(elapsed: Duration, launched: u32, repetitions: u32, num_steps: u32) -> SweepRecord {
        let started_at = Utc::now();
        SweepRecord {
            input: "a.csv".to_string(),
            started_at,
            finished_at: started_at,
            elapsed,
            launched,
            repetitions,
            num_steps,
        }
    }

    #[test]
    fn per_iteration_time_divides_exactly() {
        let rec = record(Duration::from_secs(1), 2, 2, 5);
        assert_eq!(rec.per_iteration_time(), 1.0 / 10.0);

        let rec = record(Duration::from_secs_f64(0.5), 10, 10, 10_000);
        assert_eq!(rec.per_iteration_time(), 0.5 / 100_000.0);
    }

    #[test]
    fn totals_accumulate_across_records() {
        let mut metrics = Metrics::new();
        metrics.record_sweep(record(Duration::from_millis(3), 2, 2, 5));
        metrics.record_sweep(record(Duration::from_millis(4), 2, 2, 5));

        assert_eq!(metrics.inputs_swept(), 2);
        assert_eq!(metrics.total_launches(), 4);
    }

    #[test]
    fn records_keep_sweep_order() {
        let mut metrics = Metrics::new();
        for name in ["a.csv", "b.csv", "c.csv"] {
            let mut rec = record(Duration::from_millis(1), 1, 1, 1);
            rec.input = name.to_string();
            metrics.record_sweep(rec);
        }
        let order: Vec<&str> = metrics.records.iter().map(|r| r.input.as_str()).collect();
        assert_eq!(order, vec!["a.csv", "b.csv", "c.csv"]);
    }
}
