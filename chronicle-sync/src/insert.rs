//! Changelog entry insertion.
//!
//! The inserter walks the document once and places the rendered entry
//! directly below the first changelog header it finds, so the newest entry
//! always sits at the top of the section. A document with no header gets a
//! fresh header block appended. Insertion is append-only: no pre-existing
//! line is ever dropped or rewritten.

use chronicle_core::types::{ChangelogEntry, CHANGELOG_HEADER};

/// Insert `entry` into `content`, returning the full next document.
///
/// - the entry lands immediately after the first line whose trimmed value
///   equals the header literal, above any pre-existing entries
/// - without a header, a blank separator (when needed), the header, and the
///   entry are appended at the end
/// - the result ends with exactly one trailing newline
///
/// With multiple pre-existing header occurrences only the first is treated
/// as canonical; later occurrences pass through as ordinary text.
pub fn insert(content: &str, entry: &ChangelogEntry) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut inserted = false;

    for line in content.lines() {
        out.push(line.to_string());
        if !inserted && line.trim() == CHANGELOG_HEADER {
            out.push(entry.render());
            inserted = true;
        }
    }

    if !inserted {
        let ends_blank = matches!(out.last(), Some(last) if last.trim().is_empty());
        if !out.is_empty() && !ends_blank {
            out.push(String::new());
        }
        out.push(CHANGELOG_HEADER.to_string());
        out.push(entry.render());
    }

    let joined = out.join("\n");
    format!("{}\n", joined.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ChangelogEntry {
        ChangelogEntry::with_timestamp("feat: add x", "2025-01-01 10:00")
    }

    fn header_count(content: &str) -> usize {
        content
            .lines()
            .filter(|l| l.trim() == CHANGELOG_HEADER)
            .count()
    }

    #[test]
    fn inserts_directly_below_header() {
        let content = "# Proj\n\n## Features / Changelog\n- _Initial placeholder_\n";
        let result = insert(content, &entry());
        assert_eq!(
            result,
            "# Proj\n\n## Features / Changelog\n- **2025-01-01 10:00**: feat: add x\n- _Initial placeholder_\n"
        );
    }

    #[test]
    fn new_entry_sits_above_existing_entries() {
        let content = "## Features / Changelog\n- **2024-12-31 09:00**: fix: older\n";
        let result = insert(content, &entry());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[1], "- **2025-01-01 10:00**: feat: add x");
        assert_eq!(lines[2], "- **2024-12-31 09:00**: fix: older");
    }

    #[test]
    fn appends_header_block_when_absent() {
        let content = "# Title\nNo changelog section.\n";
        let result = insert(content, &entry());
        assert_eq!(
            result,
            "# Title\nNo changelog section.\n\n## Features / Changelog\n- **2025-01-01 10:00**: feat: add x\n"
        );
    }

    #[test]
    fn empty_document_gets_header_and_entry_only() {
        let result = insert("", &entry());
        assert_eq!(
            result,
            "## Features / Changelog\n- **2025-01-01 10:00**: feat: add x\n"
        );
    }

    #[test]
    fn no_double_blank_separator_when_content_already_ends_blank() {
        let content = "# Title\n\n";
        let result = insert(content, &entry());
        assert_eq!(
            result,
            "# Title\n\n## Features / Changelog\n- **2025-01-01 10:00**: feat: add x\n"
        );
    }

    #[test]
    fn exactly_one_header_when_input_had_none() {
        let result = insert("body text\n", &entry());
        assert_eq!(header_count(&result), 1);
    }

    #[test]
    fn exactly_one_header_when_input_had_one() {
        let content = "## Features / Changelog\n- old\n";
        let result = insert(content, &entry());
        assert_eq!(header_count(&result), 1);
    }

    #[test]
    fn only_first_of_multiple_headers_is_filled() {
        let content = "## Features / Changelog\n- a\n\n## Features / Changelog\n- b\n";
        let result = insert(content, &entry());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[1], "- **2025-01-01 10:00**: feat: add x");
        // Second occurrence passes through untouched.
        assert_eq!(header_count(&result), 2);
        assert_eq!(lines[5], "- b");
    }

    #[test]
    fn header_match_tolerates_indentation() {
        let content = "  ## Features / Changelog\n- old\n";
        let result = insert(content, &entry());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[0], "  ## Features / Changelog");
        assert_eq!(lines[1], "- **2025-01-01 10:00**: feat: add x");
    }

    #[test]
    fn ends_with_exactly_one_newline() {
        for content in ["", "# T", "# T\n", "# T\n\n\n", "## Features / Changelog\n"] {
            let result = insert(content, &entry());
            assert!(result.ends_with('\n'), "missing newline for {content:?}");
            assert!(!result.ends_with("\n\n"), "extra newline for {content:?}");
        }
    }

    #[test]
    fn never_deletes_existing_content() {
        let content = "# Title\nparagraph\n\n## Features / Changelog\n- keep me\nfooter\n";
        let result = insert(content, &entry());
        for line in content.lines() {
            assert!(
                result.lines().any(|l| l == line),
                "line {line:?} lost during insert"
            );
        }
    }

    #[test]
    fn rerun_with_identical_entry_is_additive_not_destructive() {
        // Repeated invocation appends again (append-only), never corrupts.
        let content = "## Features / Changelog\n";
        let once = insert(content, &entry());
        let twice = insert(&once, &entry());
        assert_eq!(header_count(&twice), 1);
        assert_eq!(
            twice
                .lines()
                .filter(|l| *l == "- **2025-01-01 10:00**: feat: add x")
                .count(),
            2
        );
    }
}
