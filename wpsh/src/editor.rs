//! Targeted post-content edits.
//!
//! Pure string logic: the CLI fetches `post_content`, applies one edit
//! here, and writes the result back in a single update. Three targeting
//! modes: every occurrence, one 1-based line, or the nth occurrence.

use anyhow::bail;

/// Result of one edit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Content after the edit.
    pub content: String,
    /// Number of occurrences replaced.
    pub replacements: usize,
}

/// Where an edit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Replace every occurrence.
    All,
    /// Replace occurrences on one line only (1-based).
    Line(usize),
    /// Replace only the nth occurrence (1-based).
    Nth(usize),
}

/// Applies `find` → `replace` to `content` within `scope`.
pub fn apply_edit(
    content: &str,
    find: &str,
    replace: &str,
    scope: EditScope,
) -> anyhow::Result<EditOutcome> {
    if find.is_empty() {
        bail!("search text must not be empty");
    }

    match scope {
        EditScope::All => {
            let replacements = content.matches(find).count();
            Ok(EditOutcome {
                content: content.replace(find, replace),
                replacements,
            })
        }
        EditScope::Line(line) => replace_on_line(content, find, replace, line),
        EditScope::Nth(nth) => replace_nth(content, find, replace, nth),
    }
}

fn replace_on_line(
    content: &str,
    find: &str,
    replace: &str,
    line: usize,
) -> anyhow::Result<EditOutcome> {
    if line == 0 {
        bail!("line numbers are 1-based");
    }
    let mut lines: Vec<&str> = content.split('\n').collect();
    let Some(target) = lines.get(line - 1) else {
        bail!("line {line} is out of range (content has {} lines)", lines.len());
    };

    let replacements = target.matches(find).count();
    let edited = target.replace(find, replace);
    lines[line - 1] = &edited;
    Ok(EditOutcome {
        content: lines.join("\n"),
        replacements,
    })
}

fn replace_nth(content: &str, find: &str, replace: &str, nth: usize) -> anyhow::Result<EditOutcome> {
    if nth == 0 {
        bail!("occurrence numbers are 1-based");
    }
    let Some((index, _)) = content.match_indices(find).nth(nth - 1) else {
        let total = content.matches(find).count();
        bail!("occurrence {nth} not found ({total} total)");
    };

    let mut edited = String::with_capacity(content.len() + replace.len());
    edited.push_str(&content[..index]);
    edited.push_str(replace);
    edited.push_str(&content[index + find.len()..]);
    Ok(EditOutcome {
        content: edited,
        replacements: 1,
    })
}

/// Renders a small line-oriented before/after preview of an edit.
#[must_use]
pub fn preview(before: &str, after: &str) -> String {
    let mut out = String::new();
    for (number, (old, new)) in before.split('\n').zip(after.split('\n')).enumerate() {
        if old != new {
            out.push_str(&format!("{:>4} - {old}\n", number + 1));
            out.push_str(&format!("{:>4} + {new}\n", number + 1));
        }
    }
    if out.is_empty() {
        out.push_str("(no changes)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "Hello world\nworld of WordPress\nGoodbye world";

    #[test]
    fn replace_all_counts_occurrences() {
        let outcome = apply_edit(BODY, "world", "planet", EditScope::All).unwrap();
        assert_eq!(outcome.replacements, 3);
        assert_eq!(
            outcome.content,
            "Hello planet\nplanet of WordPress\nGoodbye planet"
        );
    }

    #[test]
    fn replace_on_line_touches_only_that_line() {
        let outcome = apply_edit(BODY, "world", "planet", EditScope::Line(2)).unwrap();
        assert_eq!(outcome.replacements, 1);
        assert_eq!(
            outcome.content,
            "Hello world\nplanet of WordPress\nGoodbye world"
        );
    }

    #[test]
    fn line_out_of_range_is_an_error() {
        let err = apply_edit(BODY, "world", "planet", EditScope::Line(9)).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn replace_nth_targets_a_single_occurrence() {
        let outcome = apply_edit(BODY, "world", "planet", EditScope::Nth(3)).unwrap();
        assert_eq!(outcome.replacements, 1);
        assert_eq!(
            outcome.content,
            "Hello world\nworld of WordPress\nGoodbye planet"
        );
    }

    #[test]
    fn missing_nth_occurrence_is_an_error() {
        let err = apply_edit(BODY, "world", "planet", EditScope::Nth(4)).unwrap_err();
        assert!(err.to_string().contains("3 total"));
    }

    #[test]
    fn zero_targets_are_rejected() {
        assert!(apply_edit(BODY, "world", "x", EditScope::Line(0)).is_err());
        assert!(apply_edit(BODY, "world", "x", EditScope::Nth(0)).is_err());
    }

    #[test]
    fn empty_search_text_is_rejected() {
        assert!(apply_edit(BODY, "", "x", EditScope::All).is_err());
    }

    #[test]
    fn no_match_replaces_nothing() {
        let outcome = apply_edit(BODY, "mars", "venus", EditScope::All).unwrap();
        assert_eq!(outcome.replacements, 0);
        assert_eq!(outcome.content, BODY);
    }

    #[test]
    fn preview_shows_changed_lines_with_numbers() {
        let outcome = apply_edit(BODY, "world", "planet", EditScope::Line(2)).unwrap();
        let rendered = preview(BODY, &outcome.content);
        assert!(rendered.contains("2 - world of WordPress"));
        assert!(rendered.contains("2 + planet of WordPress"));
        assert!(!rendered.contains("1 -"));
    }

    #[test]
    fn preview_of_identical_content() {
        assert_eq!(preview(BODY, BODY), "(no changes)\n");
    }
}
