//! Notice-block recognition for stylized blockquotes.
//!
//! A blockquote whose first source line looks like `> **Note:** title`
//! becomes a Confluence notice macro instead of a plain quote. The macro
//! kind is the keyword as written; the remaining lines lose exactly one
//! quote level and re-parse as the macro body.

use std::sync::LazyLock;

use regex::Regex;

/// First-line pattern of a notice blockquote. The keyword match is
/// case-insensitive but captured verbatim.
static NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>\s+\*\*((?i)warning|note|info|tip):\*\*\s*(.*)$").expect("valid notice pattern")
});

/// One leading quote marker, with whatever indentation precedes it.
static QUOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*>)(.*)$").expect("valid quote pattern"));

/// A recognized notice block.
pub(crate) struct Notice<'a> {
    /// Macro kind, as written in the source (`info`, `Note`, ...).
    pub kind: &'a str,
    /// Trailing text of the first line; empty when the notice has no title.
    pub title: &'a str,
    /// Remaining blockquote source with one quote level stripped.
    pub body: String,
}

/// Match the raw blockquote source against the notice pattern.
pub(crate) fn recognize(raw: &str) -> Option<Notice<'_>> {
    let first_line = raw.lines().next().unwrap_or("");
    let captures = NOTICE.captures(first_line)?;

    let body = raw
        .lines()
        .skip(1)
        .map(decrease_quote_level)
        .collect::<Vec<_>>()
        .join("\n");

    Some(Notice {
        kind: captures.get(1).map_or("", |m| m.as_str()),
        title: captures.get(2).map_or("", |m| m.as_str()),
        body,
    })
}

/// Strip one leading `>` marker, keeping deeper levels intact so nested
/// quotes re-lex one level shallower.
fn decrease_quote_level(line: &str) -> &str {
    QUOTE_MARKER
        .captures(line)
        .map_or(line, |captures| captures.get(2).map_or("", |m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recognizes_each_keyword() {
        for keyword in ["warning", "Note", "INFO", "tip"] {
            let raw = format!("> **{keyword}:** something");
            let notice = recognize(&raw).unwrap();
            assert_eq!(notice.kind, keyword);
            assert_eq!(notice.title, "something");
        }
    }

    #[test]
    fn empty_title_is_kept() {
        let notice = recognize("> **Note:**\n> body").unwrap();
        assert_eq!(notice.title, "");
        assert_eq!(notice.body, " body");
    }

    #[test]
    fn unknown_keyword_is_not_a_notice() {
        assert!(recognize("> **Remark:** text").is_none());
        assert!(recognize("> plain quote").is_none());
    }

    #[test]
    fn body_loses_exactly_one_quote_level() {
        let notice = recognize("> **info:** T\n>\n>> nested\n> flat").unwrap();
        assert_eq!(notice.body, "\n> nested\n flat");
    }
}
