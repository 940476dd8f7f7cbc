use std::time::{Duration, Instant};

/// Wall-clock durations of pipeline steps, in execution order
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<(String, Duration)>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, name: &str, duration: Duration) {
        self.steps.push((name.to_string(), duration));
    }

    /// Times `f` and records it under `name`.
    pub fn measure<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.record(name, start.elapsed());
        out
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|(_, d)| *d).sum()
    }

    /// Summed duration of every step recorded under `name`.
    pub fn step(&self, name: &str) -> Option<Duration> {
        let mut matching = self.steps.iter().filter(|(n, _)| n == name).peekable();
        matching.peek()?;
        Some(matching.map(|(_, d)| *d).sum())
    }

    pub fn steps(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.steps.iter().map(|(n, d)| (n.as_str(), *d))
    }

    /// Table of steps with their share of the total.
    pub fn summary(&self) -> String {
        let total_ms = self.total_duration().as_secs_f64() * 1000.0;
        let rule = "-".repeat(60);
        let mut out = format!("Pipeline Timing Summary:\n{}\n", rule);
        for (name, duration) in self.steps() {
            let ms = duration.as_secs_f64() * 1000.0;
            let share = if total_ms > 0.0 { ms / total_ms * 100.0 } else { 0.0 };
            out.push_str(&format!("{:<30} {:>12.3}ms ({:>5.1}%)\n", name, ms, share));
        }
        out.push_str(&format!("{}\n{:<30} {:>12.3}ms", rule, "Total", total_ms));
        out
    }
}
