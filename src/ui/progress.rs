//! Progress indicators with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else if self.interactive {
            println!("{} {}", style("✓").green(), message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else if self.interactive {
            println!("{} {}", style("✗").red(), message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

/// Bar over the repositories of one reconciliation.
///
/// Interactive terminals get an indicatif bar showing the repository being
/// reconciled; plain output only reports the start.
pub struct RepoProgress {
    bar: Option<ProgressBar>,
}

impl RepoProgress {
    pub fn new(ctx: &UiContext, total: usize) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total as u64);
            if let Ok(template) = ProgressStyle::default_bar().template(
                "  {spinner:.green} Reconciling  {bar:20.green/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}",
            ) {
                bar.set_style(
                    template
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .progress_chars("━╸─"),
                );
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        } else {
            println!("Reconciling {} repositories...", total);
            None
        };
        Self { bar }
    }

    /// Move to the next repository
    pub fn advance(&self, identity: &str) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
            bar.set_message(truncate(identity, 48));
        }
    }

    /// Finish and clear the bar.
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Testing...");
        spinner.stop("Done");
        spinner.start("Failing...");
        spinner.stop_error("Failed");
    }

    #[test]
    fn repo_progress_non_interactive() {
        let ctx = UiContext::non_interactive();
        let progress = RepoProgress::new(&ctx, 2);
        progress.advance("octocat/hello-world");
        progress.advance("octocat/spoon-knife");
        progress.finish();
    }

    #[test]
    fn truncate_long_identities() {
        assert_eq!(truncate("short/name", 48), "short/name");
        let long = "a".repeat(60);
        let cut = truncate(&long, 10);
        assert_eq!(cut, "aaaaaaa...");
    }
}
