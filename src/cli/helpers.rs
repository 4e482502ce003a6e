//! Shared helper functions for CLI commands

use console::style;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Print a success line (suppressed by --quiet)
pub fn print_success(quiet: bool, message: &str) {
    if !quiet {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Print a warning line to stderr (suppressed by --quiet)
pub fn print_warning(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{} {}", style("!").yellow(), message);
    }
}
