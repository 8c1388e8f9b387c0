//! cliclack colours

use cliclack::ThemeState;
use console::Style;

/// Green console palette matching the rendered card
#[derive(Debug, Clone, Default)]
pub struct StatcardTheme;

impl cliclack::Theme for StatcardTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().green(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().cyan(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

/// Install the theme for all later cliclack output
pub fn init_theme() {
    cliclack::set_theme(StatcardTheme);
}
