//! Legacy-prefix repair.
//!
//! Older drafts of the tool wrote dated bullets with a trailing code fence
//! straight to the top of the README. Repair strips that leading run without
//! touching any well-formed content that follows it.

use chronicle_core::types::is_legacy_line;

/// Remove the maximal leading run of blank lines and legacy bullets.
///
/// Returns the remaining suffix trimmed of surrounding whitespace, with
/// exactly one trailing newline — or an empty string when the whole document
/// was legacy content (the caller then treats the document as absent and
/// regenerates).
pub fn clean(content: &str) -> String {
    let rest: Vec<&str> = content
        .lines()
        .skip_while(|line| line.trim().is_empty() || is_legacy_line(line))
        .collect();
    let trimmed = rest.join("\n").trim().to_string();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{trimmed}\n")
}
