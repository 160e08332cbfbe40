//! Terminal output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Formats everything the deck loop prints: status lines and messages on
/// stderr, command output on stdout, and the recording spinner.
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    fn line(&self, glyph: ColoredString, message: &str) {
        eprintln!("{} {}", glyph, message);
    }

    /// Print the deck status line to stderr
    pub fn status(&self, status: &str) {
        self.line("●".cyan(), status);
    }

    /// Print an info message to stderr
    pub fn info(&self, message: &str) {
        self.line("ℹ".cyan(), message);
    }

    /// Print a success message to stderr
    pub fn success(&self, message: &str) {
        self.line("✓".green(), message);
    }

    /// Print a warning to stderr
    pub fn warn(&self, message: &str) {
        self.line("⚠".yellow(), message);
    }

    /// Print an error to stderr
    pub fn error(&self, message: &str) {
        self.line("✗".red(), message);
    }

    /// Print command output to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair to stdout (config and device listings)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Replace the status line with a live spinner
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.red} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Clear the spinner, if one is running
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
