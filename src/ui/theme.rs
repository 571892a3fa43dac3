//! Custom theme for cliclack prompts

use cliclack::ThemeState;
use console::Style;

/// Podsync's cyan-branded prompt theme
#[derive(Debug, Clone, Default)]
pub struct PodsyncTheme;

/// Shared state palette; submit styling differs per element
fn accent(state: &ThemeState) -> Style {
    match state {
        ThemeState::Error(_) => Style::new().red(),
        ThemeState::Cancel => Style::new().dim(),
        _ => Style::new().cyan(),
    }
}

impl cliclack::Theme for PodsyncTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().cyan().dim(),
            other => accent(other),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            other => accent(other),
        }
    }
}

/// Install the global prompt theme
pub fn init_theme() {
    cliclack::set_theme(PodsyncTheme);
}
