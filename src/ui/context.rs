//! Interactive vs CI environment detection

use std::io::IsTerminal;

/// Decides whether the CLI may use spinners and prompts
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Attached to an interactive terminal
    interactive: bool,
    /// `--yes` was passed, so prompts auto-approve
    auto_yes: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: detect_interactive(),
            auto_yes: false,
        }
    }

    /// Plain-output context for tests and explicit CI mode
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Auto-approve prompts instead of asking
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Spinners and styled output allowed
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}

fn detect_interactive() -> bool {
    if !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
        return false;
    }

    !ci_environment()
}

/// CI systems usually fake a TTY but set one of these
fn ci_environment() -> bool {
    const CI_VARS: [&str; 9] = [
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "BUILDKITE",
        "TEAMCITY_VERSION",
        "TF_BUILD",
    ];

    CI_VARS.iter().any(|var| std::env::var(var).is_ok())
}
