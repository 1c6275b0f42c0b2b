//! Event renderer producing Confluence wiki markup.

use std::fmt::Write;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::notice;

/// Languages the `{code}` macro highlights. Anything else degrades to an
/// untagged code macro.
const CODE_LANGUAGES: &[&str] = &[
    "actionscript3",
    "bash",
    "csharp",
    "coldfusion",
    "cpp",
    "css",
    "delphi",
    "diff",
    "erlang",
    "groovy",
    "html",
    "java",
    "javafx",
    "javascript",
    "none",
    "perl",
    "php",
    "powershell",
    "python",
    "ruby",
    "scala",
    "sql",
    "vb",
    "xml",
];

/// Renders a parsed event stream into wiki markup.
///
/// Keeps the original source around so blockquote starts can be checked
/// against the notice-block pattern on their raw text.
pub(crate) struct WikiRenderer<'a> {
    source: &'a str,
    out: String,
    /// Nested list types, innermost last (true = ordered).
    list_stack: Vec<bool>,
    /// Buffered code block: language tag and accumulated content.
    code: Option<(String, String)>,
    /// Suffix emitted when the current link closes.
    link_stack: Vec<String>,
    /// Depth of image tags; alt text is swallowed while non-zero.
    image_depth: usize,
    in_table_head: bool,
}

impl<'a> WikiRenderer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            out: String::with_capacity(source.len()),
            list_stack: Vec::new(),
            code: None,
            link_stack: Vec::new(),
            image_depth: 0,
            in_table_head: false,
        }
    }

    pub(crate) fn render(mut self, events: &[(Event<'a>, Range<usize>)]) -> String {
        let mut index = 0;
        while index < events.len() {
            let (event, range) = &events[index];
            if matches!(event, Event::Start(Tag::BlockQuote(_)))
                && let Some(consumed) = self.notice_block(&events[index..], range)
            {
                index += consumed;
                continue;
            }
            self.process(event);
            index += 1;
        }
        self.out
    }

    /// Handle a blockquote start as a notice block, if its first source line
    /// matches. Returns the number of events consumed.
    fn notice_block(
        &mut self,
        events: &[(Event<'a>, Range<usize>)],
        range: &Range<usize>,
    ) -> Option<usize> {
        let raw = &self.source[range.clone()];
        let notice = notice::recognize(raw)?;

        // The de-quoted body re-parses as top-level markdown inside the macro.
        let body = crate::markdown_to_wiki(&notice.body);
        write!(
            self.out,
            "{{{kind}|title={title}}}\n{body}\n{{{kind}}}",
            kind = notice.kind,
            title = notice.title,
        )
        .unwrap();

        let mut depth = 0usize;
        for (consumed, (event, _)) in events.iter().enumerate() {
            match event {
                Event::Start(Tag::BlockQuote(_)) => depth += 1,
                Event::End(TagEnd::BlockQuote(_)) => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(consumed + 1);
                    }
                }
                _ => {}
            }
        }
        Some(events.len())
    }

    fn process(&mut self, event: &Event<'a>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(*tag),
            Event::Text(text) => self.text(text),
            Event::Code(code) => {
                if self.image_depth == 0 {
                    write!(self.out, "{{{{{code}}}}}").unwrap();
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                if self.image_depth == 0 {
                    self.out.push_str(html);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if self.image_depth == 0 {
                    self.out.push('\n');
                }
            }
            Event::Rule => self.out.push_str("----\n"),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: &Tag<'a>) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                write!(self.out, "h{}. ", heading_level(*level)).unwrap();
            }
            Tag::BlockQuote(_) => self.out.push_str("{quote}"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split([' ', ',', '\t'])
                        .next()
                        .unwrap_or("")
                        .to_owned(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                // A nested list begins mid-item; put it on its own line.
                if !self.list_stack.is_empty() && !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
                self.list_stack.push(start.is_some());
            }
            Tag::Item => {
                for &ordered in &self.list_stack {
                    self.out.push(if ordered { '#' } else { '*' });
                }
                self.out.push(' ');
            }
            Tag::Table(_) | Tag::TableRow => {}
            Tag::TableHead => self.in_table_head = true,
            Tag::TableCell => {
                self.out
                    .push_str(if self.in_table_head { "||" } else { "|" });
            }
            Tag::Emphasis => self.out.push('_'),
            Tag::Strong => self.out.push('*'),
            Tag::Strikethrough => self.out.push('-'),
            Tag::Link {
                dest_url, title, ..
            } => {
                self.out.push('[');
                self.link_stack.push(if title.is_empty() {
                    format!("|{dest_url}]")
                } else {
                    format!("|{dest_url}|{title}]")
                });
            }
            Tag::Image { dest_url, .. } => {
                write!(self.out, "!{dest_url}!").unwrap();
                self.image_depth += 1;
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => self.out.push_str("\n\n"),
            TagEnd::BlockQuote(_) => self.out.push_str("{quote}\n"),
            TagEnd::CodeBlock => {
                let (lang, mut content) = self.code.take().unwrap_or_default();
                if !content.ends_with('\n') {
                    content.push('\n');
                }
                let lang = if CODE_LANGUAGES.contains(&lang.as_str()) {
                    lang.as_str()
                } else {
                    ""
                };
                write!(self.out, "{{code:{lang}}}\n{content}{{code}}\n\n").unwrap();
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.out.push('\n');
                }
            }
            TagEnd::Item => {
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
            }
            TagEnd::Table => self.out.push('\n'),
            TagEnd::TableHead => {
                self.out.push_str("||\n");
                self.in_table_head = false;
            }
            TagEnd::TableRow => self.out.push_str("|\n"),
            TagEnd::TableCell => {}
            TagEnd::Emphasis => self.out.push('_'),
            TagEnd::Strong => self.out.push('*'),
            TagEnd::Strikethrough => self.out.push('-'),
            TagEnd::Link => {
                let suffix = self.link_stack.pop().unwrap_or_default();
                self.out.push_str(&suffix);
            }
            TagEnd::Image => self.image_depth = self.image_depth.saturating_sub(1),
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = self.code.as_mut() {
            content.push_str(text);
            return;
        }
        if self.image_depth > 0 {
            return;
        }
        self.out.push_str(text);
    }
}

/// Numeric level of a heading tag.
fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
