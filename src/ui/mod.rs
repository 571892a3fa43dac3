//! Terminal UI layer
//!
//! Uses `cliclack` for prompts and banners and `indicatif` for live
//! install progress, with automatic fallback to plain line output in
//! CI/non-interactive environments.

mod context;
mod output;
mod progress;
mod prompts;
mod report;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, outro_error, outro_success, outro_warn, remark, section,
    step_info, step_ok_detail, step_warn,
};
pub use progress::InstallProgress;
pub use prompts::{confirm, ConfirmInstallPrompt};
pub use report::SpinnerReporter;
pub use theme::{init_theme, PodsyncTheme};
