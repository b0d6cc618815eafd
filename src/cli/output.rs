use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::context;

// Stdout carries ciphertext, plaintext and JSON; everything here goes to stderr.

/// Print a success message.
pub fn success(msg: &str) {
    if !context::quiet() {
        eprintln!("  {} {}", "✓".green(), msg);
    }
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if !context::quiet() {
        eprintln!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print an error message. Never suppressed.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a detail line, only with `--verbose`.
pub fn detail(msg: &str) {
    if context::verbose() {
        eprintln!("    {}", msg.dimmed());
    }
}

/// Start a spinner for a slow operation (scrypt). Hidden in quiet mode.
pub fn spinner(msg: &str) -> ProgressBar {
    if context::quiet() {
        return ProgressBar::hidden();
    }
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

/// Stop a spinner and replace it with a success line.
pub fn finish_spinner(sp: ProgressBar, msg: &str) {
    sp.finish_and_clear();
    success(msg);
}
