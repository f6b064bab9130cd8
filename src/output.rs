//! User-facing output utilities for clean, colored terminal messages
//!
//! This module provides functions for displaying progress and errors to users
//! in a friendly, colored format without internal logging noise (timestamps,
//! log levels, crate names, etc.). Diagnostics go through `log` instead.

use owo_colors::OwoColorize;

/// Display a warning message to the user in yellow with padding
///
/// Format: blank line + yellow message + blank line
///
/// # Example
/// ```ignore
/// output::warn("Snapcode endpoint returned an empty body, trying fallback.");
/// ```
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Display an error message to the user in red with padding
///
/// Format: blank line + red message + blank line
///
/// # Example
/// ```ignore
/// output::error("Error: all snapcode endpoints returned empty responses");
/// ```
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

/// Display an informational message to the user in default color with padding
///
/// Format: blank line + message + blank line
///
/// # Example
/// ```ignore
/// output::info("Searching: Berlin, Germany");
/// ```
pub fn info(message: &str) {
    eprintln!("\n{}\n", message);
}

/// Display a success message to the user in green with padding
///
/// Used for per-handle finds and saved snapcodes.
///
/// # Example
/// ```ignore
/// output::success("Found johnny_99!");
/// ```
pub fn success(message: &str) {
    eprintln!("\n{}\n", message.green());
}
