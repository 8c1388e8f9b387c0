//! Terminal output for statcard commands
//!
//! Uses `cliclack` for spinners, log lines and prompts in interactive
//! terminals and falls back to plain bracketed lines in CI or when output
//! is piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use statcard::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "statcard generate");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Listing repositories...");
//! spinner.stop("Listed 42 repositories");
//!
//! ui::outro_success(&ctx, "Wrote generated/cover.svg");
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, note, outro_success, outro_warn, remark, section, step_info, step_ok,
    step_warn,
};
pub use progress::{RepoProgress, TaskSpinner};
pub use prompts::confirm;
pub use theme::{init_theme, StatcardTheme};
