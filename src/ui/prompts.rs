//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{PodsyncError, PodsyncResult};
use crate::sync::InstallPrompt;
use async_trait::async_trait;

/// Prompt for confirmation, returns the default if non-interactive and
/// `true` under `--yes`
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> PodsyncResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack prompts block, so hand them to a blocking task
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| PodsyncError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| PodsyncError::User(format!("Prompt failed: {}", e)))
}

/// Asks before reinstalling over a changed fingerprint.
///
/// Defaults to yes, so unattended runs keep projects in sync instead of
/// silently drifting.
pub struct ConfirmInstallPrompt {
    ctx: UiContext,
}

impl ConfirmInstallPrompt {
    pub fn new(ctx: &UiContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

#[async_trait]
impl InstallPrompt for ConfirmInstallPrompt {
    async fn confirm_install(&self) -> PodsyncResult<bool> {
        confirm(
            &self.ctx,
            "Native dependencies changed since the last install. Run pod install now?",
            true,
        )
        .await
    }
}
