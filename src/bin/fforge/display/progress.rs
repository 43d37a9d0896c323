use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Formulas between two spinner message refreshes.
const REFRESH_EVERY: usize = 256;

pub struct StepSpinner {
    bar: Option<ProgressBar>,
    start: Instant,
    step: u8,
    total_steps: u8,
    step_start: Instant,
    description: String,
}

impl StepSpinner {
    pub fn new(total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            start: now,
            step: 0,
            total_steps,
            step_start: now,
            description: String::new(),
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        self.step += 1;
        self.step_start = Instant::now();
        self.description = description.to_string();

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!(
            "[{}/{}] {}...",
            self.step, self.total_steps, description
        ));

        self.bar = Some(bar);
    }

    pub fn advance(&mut self, done: usize, total: usize) {
        if done % REFRESH_EVERY != 0 {
            return;
        }
        if let Some(bar) = &self.bar {
            bar.set_message(format!(
                "[{}/{}] {}... {}/{}",
                self.step, self.total_steps, self.description, done, total
            ));
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        let elapsed = self.step_start.elapsed();
        let mut stderr = io::stderr().lock();

        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            elapsed.as_secs_f64()
        );

        for substep in substeps {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", substep);
        }
    }

    pub fn finish(mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        print_footer(self.start.elapsed());
    }
}

fn print_footer(elapsed: Duration) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
    );
    let _ = writeln!(
        stderr,
        "  \x1b[32m✓\x1b[0m Batch complete {:>35}",
        format!("Total: {:.2}s", elapsed.as_secs_f64())
    );
    let _ = writeln!(stderr);
}

pub enum Progress {
    Interactive(StepSpinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        if interactive {
            Self::Interactive(StepSpinner::new(total_steps))
        } else {
            Self::Silent
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(s) = self {
            s.step(description);
        }
    }

    pub fn advance(&mut self, done: usize, total: usize) {
        if let Self::Interactive(s) = self {
            s.advance(done, total);
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        if let Self::Interactive(s) = self {
            s.complete_step(description, substeps);
        }
    }

    pub fn finish(self) {
        if let Self::Interactive(s) = self {
            s.finish();
        }
    }
}
