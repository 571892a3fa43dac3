//! Terminal-backed progress reporter

use super::context::UiContext;
use super::progress::InstallProgress;
use crate::report::ProgressReporter;

/// Routes sync narration onto the terminal spinner
pub struct SpinnerReporter {
    progress: InstallProgress,
}

impl SpinnerReporter {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            progress: InstallProgress::new(ctx),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn update(&self, message: &str) {
        self.progress.phase(message);
    }

    fn output_line(&self, line: &str) {
        self.progress.on_line(line);
    }

    fn warn(&self, message: &str) {
        self.progress.warn_line(message);
    }

    fn finish_ok(&self, message: &str) {
        self.progress.finish_ok(message);
    }

    fn finish_warn(&self, message: &str) {
        self.progress.finish_warn(message);
    }

    fn finish_error(&self, message: &str) {
        self.progress.finish_error(message);
    }
}
