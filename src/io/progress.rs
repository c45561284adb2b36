//! Step progress display for one or many maze runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Redraw the step bar at most this often, in steps
const STEP_REFRESH_INTERVAL: usize = 256;

/// Per-run progress state: display name, current step, expected steps
#[derive(Clone, Debug, Default)]
struct RunState {
    name: String,
    step: usize,
    expected_steps: usize,
}

/// Coordinates progress bars for a batch of maze runs
///
/// Shows one bar per run while the batch is small, and adds a batch bar
/// once there are more runs than `MAX_INDIVIDUAL_PROGRESS_BARS`. Only the
/// most recent runs keep a visible step bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    run_bars: Vec<ProgressBar>,
    runs: Vec<RunState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Masks: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            run_bars: Vec::new(),
            runs: Vec::new(),
        }
    }

    /// Create bars for `run_count` runs
    pub fn initialize(&mut self, run_count: usize) {
        if run_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(run_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..run_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(STEP_STYLE.clone());
            self.run_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a run that is expected to take `expected_steps` steps
    pub fn start_run(&mut self, index: usize, name: &str, expected_steps: usize) {
        if index >= self.runs.len() {
            self.runs.resize(index + 1, RunState::default());
        }
        if let Some(run) = self.runs.get_mut(index) {
            *run = RunState {
                name: name.to_string(),
                step: 0,
                expected_steps,
            };
        }
        self.update_bars();
    }

    /// Report the number of completed steps of a run
    pub fn update_step(&mut self, index: usize, step: usize) {
        let Some(run) = self.runs.get_mut(index) else {
            return;
        };
        run.step = step;
        if step % STEP_REFRESH_INTERVAL == 0 {
            self.update_bars();
        }
    }

    /// Mark a run as completed
    pub fn complete_run(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(run) = self.runs.get_mut(index) {
            run.name = format!("✓ {} ({:.1}s)", run.name, elapsed.as_secs_f64());
            run.step = run.expected_steps;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All masks processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Point the step bars at the most recent runs
    fn update_bars(&self) {
        let active: Vec<&RunState> = self.runs.iter().filter(|run| !run.name.is_empty()).collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, run) in self.run_bars.iter().zip(visible) {
            bar.set_length(run.expected_steps as u64);
            bar.set_position(run.step.min(run.expected_steps) as u64);
            let width = run.expected_steps.to_string().len();
            bar.set_message(format!("{:>width$}/{}", run.step, run.expected_steps));
            bar.set_prefix(run.name.clone());
        }

        for bar in self.run_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }

    /// Number of runs registered so far
    pub fn run_count(&self) -> usize {
        self.runs.iter().filter(|run| !run.name.is_empty()).count()
    }
}
