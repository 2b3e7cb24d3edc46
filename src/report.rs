// report.rs - Status and progress sinks passed to the orchestrator

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Receives status lines and progress updates from a run
pub trait Reporter: Send + Sync {
    /// Free-form status line
    fn status(&self, message: &str);

    /// Something went wrong but the run still reports it as a whole
    fn warn(&self, message: &str);

    /// `completed` of `total` tasks have been joined, on the reporting cadence
    fn progress(&self, completed: usize, total: usize);

    /// Called after every joined task
    fn tick(&self, _completed: usize, _total: usize) {}

    /// The run is over, successfully or not
    fn finish(&self) {}
}

/// Text of a progress update
pub fn progress_line(completed: usize, total: usize) -> String {
    format!("{} / {} alignments complete", completed, total)
}

/// Prints timestamped lines to stdout, optionally driving a progress bar
pub struct ConsoleReporter {
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }

    /// Console output with a progress bar sized for `total` tasks
    pub fn with_progress_bar(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar: Some(pb) }
    }

    fn stamp(message: &str) -> String {
        let time = chrono::Local::now().format("%a %b %d %H:%M:%S %p");
        format!("[{}]  {}", time, message)
    }

    fn emit(&self, line: String) {
        match &self.bar {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, message: &str) {
        self.emit(Self::stamp(message));
    }

    fn warn(&self, message: &str) {
        let line = Self::stamp(&format!("⚠️  {}", message));
        match &self.bar {
            Some(pb) => pb.println(line),
            None => eprintln!("{}", line),
        }
    }

    fn progress(&self, completed: usize, total: usize) {
        match &self.bar {
            Some(pb) => pb.set_message(progress_line(completed, total)),
            None => println!("{}", progress_line(completed, total)),
        }
    }

    fn tick(&self, completed: usize, _total: usize) {
        if let Some(pb) = &self.bar {
            pb.set_position(completed as u64);
        }
    }

    fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_and_clear();
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn status(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn progress(&self, _completed: usize, _total: usize) {}
}

/// Records every line in memory
#[derive(Debug, Default)]
pub struct CaptureReporter {
    lines: Mutex<Vec<String>>,
    ticks: Mutex<Vec<usize>>,
}

impl CaptureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Recorded progress lines only
    pub fn progress_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.ends_with("alignments complete"))
            .collect()
    }

    /// Completed counts seen by `tick`, in call order
    pub fn ticks(&self) -> Vec<usize> {
        match self.ticks.lock() {
            Ok(ticks) => ticks.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, line: String) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}

impl Reporter for CaptureReporter {
    fn status(&self, message: &str) {
        self.push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.push(format!("WARN {}", message));
    }

    fn progress(&self, completed: usize, total: usize) {
        self.push(progress_line(completed, total));
    }

    fn tick(&self, completed: usize, _total: usize) {
        match self.ticks.lock() {
            Ok(mut ticks) => ticks.push(completed),
            Err(poisoned) => poisoned.into_inner().push(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_format() {
        assert_eq!(progress_line(3, 10), "3 / 10 alignments complete");
    }

    #[test]
    fn test_capture_reporter() {
        let reporter = CaptureReporter::new();
        reporter.status("4 sequences parsed [OK]");
        reporter.progress(3, 4);
        reporter.warn("task 2 failed");
        reporter.finish();

        assert_eq!(
            reporter.lines(),
            vec![
                "4 sequences parsed [OK]".to_string(),
                "3 / 4 alignments complete".to_string(),
                "WARN task 2 failed".to_string(),
            ]
        );
        assert_eq!(reporter.progress_lines(), vec!["3 / 4 alignments complete".to_string()]);
    }

    #[test]
    fn test_progress_bar_follows_every_tick() {
        let reporter = ConsoleReporter::with_progress_bar(7);
        let pb = reporter.bar.clone().unwrap();
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());

        for completed in 1..=7 {
            reporter.tick(completed, 7);
            if completed % 3 == 0 {
                reporter.progress(completed, 7);
            }
        }
        assert_eq!(pb.position(), 7);
        assert_eq!(pb.message(), "6 / 7 alignments complete");
        reporter.finish();
        assert!(pb.is_finished());
    }

    #[test]
    fn test_console_stamp_wraps_message() {
        let line = ConsoleReporter::stamp("Analysis complete");
        assert!(line.starts_with('['));
        assert!(line.ends_with("]  Analysis complete"));
    }
}
