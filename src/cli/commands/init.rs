//! Init command - create a project-local .podsync.toml

use crate::cli::args::InitArgs;
use crate::config::LOCAL_CONFIG_FILE;
use crate::error::{PodsyncError, PodsyncResult};
use crate::ui::{self, UiContext};
use tokio::fs;

/// Starter config; every setting ships commented out at its default
const INIT_TEMPLATE: &str = r#"# Podsync project configuration
# Settings here override your global config (~/.config/podsync/config.toml)

[project]
# native_dir = "ios"        # "macos" for react-native-macos projects

[installer]
# binary = "pod"            # or a wrapper script on your PATH
# bootstrap = true          # gem-install the CLI when it is missing
# min_version = "1.10.0"    # warn below this version; "" disables
"#;

/// Execute the init command
pub async fn execute(args: InitArgs) -> PodsyncResult<()> {
    let ctx = UiContext::detect();

    let target_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| PodsyncError::io("getting current directory", e))?,
    };
    let config_path = target_dir.join(LOCAL_CONFIG_FILE);

    if !args.force && config_path.exists() {
        return Err(PodsyncError::User(format!(
            "{} already exists. Pass --force to replace it.",
            config_path.display()
        )));
    }

    fs::create_dir_all(&target_dir)
        .await
        .map_err(|e| PodsyncError::io(format!("creating directory {}", target_dir.display()), e))?;
    fs::write(&config_path, INIT_TEMPLATE)
        .await
        .map_err(|e| PodsyncError::io(format!("writing {}", config_path.display()), e))?;

    ui::step_ok_detail(
        &ctx,
        "Created project config",
        &config_path.display().to_string(),
    );
    ui::remark(&ctx, "Uncomment a setting to override the global config.");

    Ok(())
}
