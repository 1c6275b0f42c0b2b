//! Markdown to Confluence wiki markup conversion.
//!
//! The converter runs in two stages over a locally-constructed CommonMark
//! parser (no process-wide parser state):
//!
//! 1. a notice-block stage that recognizes stylized blockquotes
//!    (`> **Note:** title`) on their raw source and rewrites them into the
//!    matching Confluence notice macro, and
//! 2. an event-rendering stage that maps every remaining construct onto its
//!    fixed wiki markup production.

mod notice;
mod wiki;

use pulldown_cmark::{Options, Parser};

use wiki::WikiRenderer;

/// Convert markdown source text into Confluence wiki markup.
#[must_use]
pub fn markdown_to_wiki(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events: Vec<_> = Parser::new_ext(source, options).into_offset_iter().collect();
    WikiRenderer::new(source).render(&events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn non_empty_lines(markup: &str) -> Vec<&str> {
        markup.lines().filter(|line| !line.is_empty()).collect()
    }

    #[test]
    fn headings_and_inline_formatting() {
        assert_eq!(
            markdown_to_wiki("# h\n**b** _i_ ~s~ `c`"),
            "h1. h\n\n*b* _i_ -s- {{c}}\n\n"
        );
    }

    #[test]
    fn full_document_rendering() {
        let md = "\n\
# header1\n\
**bold**\n\
_italic_\n\
~strikethrough~\n\
`the code`\n\
> blockquote1\n\
> blockquote2\n\
\n\
[github](https://github.com/example/site-publisher)\n\
\n\
***\n\
\n\
![alt text](https://example.com/images/icon48.png \"Logo Title Text 1\")\n\
\n\
```javascript\n\
java script code\n\
```\n\
\n\
Markdown | Less | Pretty\n\
--- | --- | ---\n\
*Still* | `renders` | **nicely**\n\
1 | 2 | 3\n\
\n\
* u1\n\
* u2\n\
* u3\n\
\n\
1. o1\n\
1. o2\n\
1. o3\n";

        let wiki = markdown_to_wiki(md);
        let lines = non_empty_lines(&wiki);
        assert_eq!(
            lines,
            vec![
                "h1. header1",
                "*bold*",
                "_italic_",
                "-strikethrough-",
                "{{the code}}",
                "{quote}blockquote1",
                "blockquote2",
                "{quote}",
                "[github|https://github.com/example/site-publisher]",
                "----",
                "!https://example.com/images/icon48.png!",
                "{code:javascript}",
                "java script code",
                "{code}",
                "||Markdown||Less||Pretty||",
                "|_Still_|{{renders}}|*nicely*|",
                "|1|2|3|",
                "* u1",
                "* u2",
                "* u3",
                "# o1",
                "# o2",
                "# o3",
            ]
        );
    }

    #[test]
    fn link_title_becomes_third_segment() {
        assert_eq!(
            markdown_to_wiki("[text](https://example.com \"a title\")"),
            "[text|https://example.com|a title]\n\n"
        );
    }

    #[test]
    fn unknown_code_language_degrades_to_untagged_macro() {
        assert_eq!(
            markdown_to_wiki("```klingon\nqapla'\n```"),
            "{code:}\nqapla'\n{code}\n\n"
        );
    }

    #[test]
    fn titled_notice_block() {
        let markup = markdown_to_wiki("> **info:** T\n>\n>> body\n");
        assert!(markup.starts_with("{info|title=T}"), "got: {markup}");
        assert!(markup.ends_with("{info}"), "got: {markup}");
        // The inner `>>` level is reduced by exactly one, so the body is a
        // single-level quote, not a bare paragraph.
        assert!(markup.contains("{quote}body"), "got: {markup}");
        assert!(!markup.contains('>'), "got: {markup}");
    }

    #[test]
    fn untitled_notice_block_keeps_empty_title() {
        let markup = markdown_to_wiki("> **Note:**\n>\n> body\n");
        assert!(markup.starts_with("{Note|title=}"), "got: {markup}");
        assert!(markup.ends_with("{Note}"), "got: {markup}");
        assert!(markup.contains("body"), "got: {markup}");
    }

    #[test]
    fn notice_keyword_is_case_insensitive_and_kept_verbatim() {
        let markup = markdown_to_wiki("> **WARNING:** stop\n");
        assert!(markup.starts_with("{WARNING|title=stop}"), "got: {markup}");
        assert!(markup.ends_with("{WARNING}"), "got: {markup}");
    }

    #[test]
    fn plain_blockquote_is_not_a_notice() {
        let markup = markdown_to_wiki("> **Remark:** just bold text\n");
        assert!(markup.starts_with("{quote}"), "got: {markup}");
        assert!(markup.contains("*Remark:*"), "got: {markup}");
    }

    #[test]
    fn ordered_and_unordered_nesting_stacks_markers() {
        let markup = markdown_to_wiki("1. first\n   * inner\n2. second\n");
        assert!(markup.contains("# first"), "got: {markup}");
        assert!(markup.contains("#* inner"), "got: {markup}");
        assert!(markup.contains("# second"), "got: {markup}");
    }
}
