//! Formatting-noise stripper for model-generated text.
//!
//! Chat models wrap output in code fences and pad it with blank runs; this
//! module reduces such text to a clean one-or-many-line message. Total over
//! all inputs and idempotent.

/// Strip fence lines and redundant blanks from `raw`.
///
/// - trailing whitespace is trimmed per line
/// - any line starting (after trim) with ``` is dropped
/// - consecutive blank lines collapse to one
/// - the result never starts or ends with a blank line
pub fn sanitize(raw: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in raw.lines() {
        let line = line.trim_end();
        if line.trim_start().starts_with("```") {
            continue;
        }
        if line.is_empty() {
            // Blank: keep one, and never as the first line.
            if matches!(out.last(), Some(prev) if !prev.is_empty()) {
                out.push("");
            }
            continue;
        }
        out.push(line);
    }
    while out.last() == Some(&"") {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fence_lines() {
        let raw = "```markdown\nfeat: add x\n```";
        assert_eq!(sanitize(raw), "feat: add x");
    }

    #[test]
    fn strips_indented_fences() {
        let raw = "feat: add x\n   ```\nbody\n  ``` ";
        assert_eq!(sanitize(raw), "feat: add x\nbody");
    }

    #[test]
    fn collapses_blank_runs() {
        let raw = "line one\n\n\n\nline two";
        assert_eq!(sanitize(raw), "line one\n\nline two");
    }

    #[test]
    fn trims_leading_and_trailing_blanks() {
        let raw = "\n\nfeat: add x\n\n\n";
        assert_eq!(sanitize(raw), "feat: add x");
    }

    #[test]
    fn trims_trailing_whitespace_per_line() {
        let raw = "feat: add x   \nbody line\t";
        assert_eq!(sanitize(raw), "feat: add x\nbody line");
    }

    #[test]
    fn empty_input_sanitizes_to_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("\n\n"), "");
        assert_eq!(sanitize("```\n```"), "");
    }

    #[test]
    fn idempotent_over_assorted_inputs() {
        for raw in [
            "",
            "one line",
            "```\nfenced\n```",
            "a\n\n\nb\n \nc  ",
            "\n\nleading\n\ntrailing\n\n",
            "- **2025-01-01 10:00**: feat: add x",
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "sanitize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn no_blank_invariants_hold() {
        let cleaned = sanitize("```md\n\n\nfirst\n\n\n\nsecond\n```\n\n");
        assert!(!cleaned.starts_with('\n'));
        assert!(!cleaned.ends_with('\n'));
        assert!(!cleaned.contains("\n\n\n"));
        assert!(!cleaned.lines().any(|l| l.trim_start().starts_with("```")));
    }
}
