//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress bars for the part loop and the staging copy (indicatif)
//! - Silent progress for dry-run mode
//! - The end-of-run summary (see [`display`])
//!
//! All progress reporting goes through the ProgressReporter trait so the
//! orchestrator never talks to the terminal directly.

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for the long-running phases of a run
pub trait ProgressReporter {
    /// Start the "Copying folder" bar with the number of entries to copy
    fn start_copy(&mut self, total_entries: u64);

    /// One entry copied
    fn copied(&mut self, path: &str);

    /// Start the "Processing parts" bar
    fn start_parts(&mut self, total_parts: u64);

    /// Show the part being processed
    fn update_part(&mut self, part_name: &str);

    /// One part finished
    fn inc_part(&mut self);

    /// Finish all bars
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Truncate long paths for display
fn shorten(path: &str) -> String {
    let count = path.chars().count();
    if count > 50 {
        let tail: String = path.chars().skip(count - 47).collect();
        format!("...{tail}")
    } else {
        path.to_string()
    }
}

/// Interactive progress reporter with visual progress bars
#[derive(Default)]
pub struct InteractiveProgressReporter {
    copy_pb: Option<ProgressBar>,
    parts_pb: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_copy(&mut self, total_entries: u64) {
        let pb = ProgressBar::new(total_entries);
        pb.set_style(bar_style("Copying folder  [{bar:40.green/yellow}] {pos}/{len} {msg}"));
        self.copy_pb = Some(pb);
    }

    fn copied(&mut self, path: &str) {
        if let Some(ref pb) = self.copy_pb {
            pb.set_message(shorten(path));
            pb.inc(1);
        }
    }

    fn start_parts(&mut self, total_parts: u64) {
        if let Some(pb) = self.copy_pb.take() {
            pb.finish_and_clear();
        }
        let pb = ProgressBar::new(total_parts);
        pb.set_style(bar_style("Processing parts [{bar:40.cyan/blue}] {pos}/{len} {msg}"));
        self.parts_pb = Some(pb);
    }

    fn update_part(&mut self, part_name: &str) {
        if let Some(ref pb) = self.parts_pb {
            pb.set_message(part_name.to_string());
        }
    }

    fn inc_part(&mut self) {
        if let Some(ref pb) = self.parts_pb {
            pb.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref pb) = self.copy_pb {
            pb.finish_and_clear();
        }
        if let Some(ref pb) = self.parts_pb {
            pb.finish();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref pb) = self.copy_pb {
            pb.abandon();
        }
        if let Some(ref pb) = self.parts_pb {
            pb.abandon();
        }
    }
}

/// Silent progress reporter for dry-run mode and tests
#[derive(Debug, Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_copy(&mut self, _total_entries: u64) {}

    fn copied(&mut self, _path: &str) {}

    fn start_parts(&mut self, _total_parts: u64) {}

    fn update_part(&mut self, _part_name: &str) {}

    fn inc_part(&mut self) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_progress_reporter_no_ops() {
        let mut reporter = SilentProgressReporter;

        reporter.start_copy(10);
        reporter.copied("app/main.py");
        reporter.start_parts(2);
        reporter.update_part("app");
        reporter.inc_part();
        reporter.finish();
        reporter.abandon();
    }

    #[test]
    fn test_interactive_progress_reporter_parts() {
        let mut reporter = InteractiveProgressReporter::new();
        assert!(reporter.parts_pb.is_none());

        reporter.start_parts(3);
        reporter.update_part("app");
        reporter.inc_part();
        reporter.inc_part();
        assert_eq!(reporter.parts_pb.as_ref().map(ProgressBar::position), Some(2));
    }

    #[test]
    fn test_copy_bar_cleared_when_parts_start() {
        let mut reporter = InteractiveProgressReporter::new();
        reporter.start_copy(5);
        reporter.copied("a");
        reporter.start_parts(1);
        assert!(reporter.copy_pb.is_none());
    }

    #[test]
    fn test_shorten_long_paths() {
        let long = "a/".repeat(40);
        let short = shorten(&long);
        assert!(short.starts_with("..."));
        assert_eq!(short.chars().count(), 50);
        assert_eq!(shorten("app/main.py"), "app/main.py");
    }
}
