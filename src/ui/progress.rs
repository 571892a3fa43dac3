//! Progress display with CI fallback
//!
//! Wraps one indicatif spinner for the whole sync run: the current phase
//! sits in the prefix and parsed `pod install` output ticks through the
//! message slot. Plain mode prints phase lines and installed pods only.

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Live progress for a sync run, created lazily on the first phase change
/// so prompts shown beforehand stay readable
pub struct InstallProgress {
    fancy: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl InstallProgress {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            fancy: ctx.use_fancy_output(),
            bar: Mutex::new(None),
        }
    }

    /// Change the current phase label
    pub fn phase(&self, message: &str) {
        if self.fancy {
            let Ok(mut guard) = self.bar.lock() else {
                return;
            };
            let bar = guard.get_or_insert_with(make_bar);
            bar.set_prefix(message.to_string());
            bar.set_message(String::new());
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Process one line of installer output
    pub fn on_line(&self, line: &str) {
        if self.fancy {
            let Ok(guard) = self.bar.lock() else {
                return;
            };
            let Some(bar) = guard.as_ref() else {
                return;
            };
            if let Some(pod) = parse_install_line(line) {
                bar.set_message(pod);
            } else {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let display = if trimmed.len() > 60 {
                        format!("{}...", trimmed.chars().take(57).collect::<String>())
                    } else {
                        trimmed.to_string()
                    };
                    bar.set_message(display);
                }
            }
        } else if let Some(pod) = parse_install_line(line) {
            println!("  {}", pod);
        }
    }

    /// Print a warning line without disturbing the spinner
    pub fn warn_line(&self, message: &str) {
        if self.fancy {
            let line = format!("{} {}", style("!").yellow(), message);
            let Ok(guard) = self.bar.lock() else {
                return;
            };
            match guard.as_ref() {
                Some(bar) => bar.println(line),
                None => println!("{line}"),
            }
        } else {
            println!("{} {}", style("[WARN]").yellow(), message);
        }
    }

    /// Clear the spinner and print a success line
    pub fn finish_ok(&self, message: &str) {
        self.clear_bar();
        if self.fancy {
            println!("{} {}", style("✓").green(), message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Clear the spinner and print a warning line
    pub fn finish_warn(&self, message: &str) {
        self.clear_bar();
        if self.fancy {
            println!("{} {}", style("!").yellow(), message);
        } else {
            println!("{} {}", style("[WARN]").yellow(), message);
        }
    }

    /// Clear the spinner and print a failure line
    pub fn finish_error(&self, message: &str) {
        self.clear_bar();
        if self.fancy {
            println!("{} {}", style("✗").red(), message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }

    fn clear_bar(&self) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = guard.take() {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

fn make_bar() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {prefix}  {msg:.dim}  {elapsed:.dim}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Parse a CocoaPods line like `Installing Hermes (0.73.2)` or
/// `Using FBLazyVector (0.73.2)` down to the pod and version
fn parse_install_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = trimmed
        .strip_prefix("Installing ")
        .or_else(|| trimmed.strip_prefix("Using "))?
        .trim();
    if rest.is_empty() || !rest.contains('(') {
        return None;
    }
    Some(rest.to_string())
}
