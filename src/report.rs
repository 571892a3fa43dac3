//! One-way progress reporting
//!
//! The sync flow and the installer narrate what they are doing through
//! this seam without knowing whether a spinner, plain CI output, or a
//! test recorder is listening. Reporting never feeds anything back into
//! control flow.

use tracing::{debug, error, info, warn};

/// Sink for progress narration during a sync run.
///
/// `update` moves the current activity label, `output_line` forwards raw
/// tool output, `warn` surfaces a non-fatal notice mid-activity, and the
/// `finish_*` methods close out the current activity with a final
/// disposition.
pub trait ProgressReporter: Send + Sync {
    /// Replace the current activity label
    fn update(&self, message: &str);

    /// Forward one line of output from an external tool
    fn output_line(&self, line: &str);

    /// Surface a non-fatal warning without closing the current activity
    fn warn(&self, message: &str);

    /// Close the current activity as succeeded
    fn finish_ok(&self, message: &str);

    /// Close the current activity with a warning
    fn finish_warn(&self, message: &str);

    /// Close the current activity as failed
    fn finish_error(&self, message: &str);
}

/// Reporter that narrates through the log stream only.
///
/// Default for library callers that have no interactive surface attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn update(&self, message: &str) {
        info!("{message}");
    }

    fn output_line(&self, line: &str) {
        debug!(target: "podsync::tool", "{line}");
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }

    fn finish_ok(&self, message: &str) {
        info!("{message}");
    }

    fn finish_warn(&self, message: &str) {
        warn!("{message}");
    }

    fn finish_error(&self, message: &str) {
        error!("{message}");
    }
}
