//! Fenced code extraction and rendering of tutorial content.
//!
//! Tutorial bodies are plain text with code fenced by three backticks:
//!
//! ````text
//! # Title
//!
//! ```bash
//! npm install
//! ```
//! ````
//!
//! A single [`FenceScanner`] splits content into prose and code segments.
//! [`FenceScanner::extract_code_blocks`] and [`FenceScanner::render`] are both
//! built on the same scan, so block ids agree between the list preview and the
//! full view.
//!
//! Scanning rules:
//!
//! - An opening fence is three backticks followed by the rest of the line and
//!   a newline. The rest of the line must not contain a backtick. Its first
//!   whitespace-separated token is the language hint; a blank line means the
//!   default language.
//! - A fence that does not open a block is skipped one character at a time,
//!   so four backticks open at the second one.
//! - The body ends at the next fence.
//! - An opening fence without a closing fence leaves the rest of the text as
//!   prose.
//! - Empty prose between segments is dropped. Empty code bodies are kept.
use std::ops::Range;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::escape_html;

/// Language used when a fence carries no hint
pub const DEFAULT_LANGUAGE: &str = "javascript";

const FENCE: &str = "```";

/// A code block extracted from tutorial content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Position among the blocks of one extraction, starting at 0
    pub id: usize,
    pub language: String,
    /// Fenced text with surrounding whitespace trimmed
    pub code: String,
}

/// One piece of rendered content, with the byte range it covers in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Prose { text: String, span: Range<usize> },
    Code { block: CodeBlock, span: Range<usize> },
}

impl Segment {
    pub fn span(&self) -> &Range<usize> {
        match self {
            Segment::Prose { span, .. } | Segment::Code { span, .. } => span,
        }
    }
}

/// A line of prose after heading substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProseLine {
    Heading { level: u8, text: String },
    Text(String),
}

/// Content split into prose and code, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedContent {
    pub segments: Vec<Segment>,
}

impl RenderedContent {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Code { block, .. } => Some(block),
            Segment::Prose { .. } => None,
        })
    }

    /// Renders to the HTML markup shown in the reading view
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Prose { text, .. } => {
                    html.push_str("<div class=\"prose\">");
                    html.push_str(&prose_to_html(text));
                    html.push_str("</div>");
                }
                Segment::Code { block, .. } => {
                    let language = escape_html(&block.language);
                    html.push_str(&format!(
                        "<div class=\"code-block\"><div class=\"code-header\">\
                         <span class=\"language\">{language}</span>\
                         <button data-block=\"block-{id}\">Copy</button></div>\
                         <pre><code class=\"language-{language}\">{code}</code></pre></div>",
                        id = block.id,
                        code = escape_html(&block.code),
                    ));
                }
            }
        }
        html
    }
}

/// Splits tutorial content into prose and fenced code
#[derive(Debug, Clone)]
pub struct FenceScanner {
    default_language: String,
}

impl Default for FenceScanner {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

struct Opener<'t> {
    hint: &'t str,
    /// Bytes from just after the fence up to and including the newline
    len: usize,
}

impl FenceScanner {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Returns only the code blocks, ids starting at 0
    pub fn extract_code_blocks(&self, content: &str) -> Vec<CodeBlock> {
        self.scan(content)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Code { block, .. } => Some(block),
                Segment::Prose { .. } => None,
            })
            .collect()
    }

    /// Returns prose and code interleaved as they occur in `content`
    pub fn render(&self, content: &str) -> RenderedContent {
        RenderedContent {
            segments: self.scan(content),
        }
    }

    fn scan(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut prose_start = 0;
        let mut cursor = 0;
        let mut next_id = 0;

        while let Some(offset) = text[cursor..].find(FENCE) {
            let fence_at = cursor + offset;
            let after_fence = fence_at + FENCE.len();

            let Some(opener) = parse_opener(&text[after_fence..]) else {
                // backtick is a single byte
                cursor = fence_at + 1;
                continue;
            };

            let body_start = after_fence + opener.len;
            let Some(close_offset) = text[body_start..].find(FENCE) else {
                trace!("Unterminated fence at byte {}, rest is prose", fence_at);
                break;
            };
            let body_end = body_start + close_offset;
            let block_end = body_end + FENCE.len();

            push_prose(&mut segments, text, prose_start..fence_at);

            let language = if opener.hint.is_empty() {
                self.default_language.clone()
            } else {
                opener.hint.to_string()
            };
            trace!(
                "Code block {} ({}) at bytes {}..{}",
                next_id,
                language,
                fence_at,
                block_end
            );
            segments.push(Segment::Code {
                block: CodeBlock {
                    id: next_id,
                    language,
                    code: text[body_start..body_end].trim().to_string(),
                },
                span: fence_at..block_end,
            });
            next_id += 1;

            cursor = block_end;
            prose_start = block_end;
        }

        push_prose(&mut segments, text, prose_start..text.len());
        segments
    }
}

fn parse_opener(rest: &str) -> Option<Opener<'_>> {
    let line_end = rest.find('\n')?;
    let line = &rest[..line_end];
    if line.contains('`') {
        return None;
    }
    Some(Opener {
        hint: line.split_whitespace().next().unwrap_or(""),
        len: line_end + 1,
    })
}

fn push_prose(segments: &mut Vec<Segment>, text: &str, span: Range<usize>) {
    if span.is_empty() {
        return;
    }
    segments.push(Segment::Prose {
        text: text[span.clone()].to_string(),
        span,
    });
}

/// Extracts code blocks with the default language
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    FenceScanner::default().extract_code_blocks(content)
}

/// Renders content with the default language
pub fn render_markdown(content: &str) -> RenderedContent {
    FenceScanner::default().render(content)
}

/// Applies the line-prefix heading rules to a prose segment.
/// Every newline separates two entries of the result.
pub fn render_prose(prose: &str) -> Vec<ProseLine> {
    prose
        .split('\n')
        .map(|line| {
            if let Some(text) = line.strip_prefix("# ") {
                ProseLine::Heading {
                    level: 1,
                    text: text.to_string(),
                }
            } else if let Some(text) = line.strip_prefix("## ") {
                ProseLine::Heading {
                    level: 2,
                    text: text.to_string(),
                }
            } else if let Some(text) = line.strip_prefix("### ") {
                ProseLine::Heading {
                    level: 3,
                    text: text.to_string(),
                }
            } else {
                ProseLine::Text(line.to_string())
            }
        })
        .collect()
}

fn prose_to_html(prose: &str) -> String {
    render_prose(prose)
        .iter()
        .map(|line| match line {
            ProseLine::Heading { level, text } => {
                format!("<h{level}>{}</h{level}>", escape_html(text))
            }
            ProseLine::Text(text) => escape_html(text),
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(rendered: &RenderedContent) -> Vec<&'static str> {
        rendered
            .segments
            .iter()
            .map(|s| match s {
                Segment::Prose { .. } => "prose",
                Segment::Code { .. } => "code",
            })
            .collect()
    }

    #[test]
    fn test_extract_assigns_sequential_ids() {
        let content = "intro\n```bash\nnpm install\n```\nmid\n```rust\n  fn main() {}  \n```";
        let blocks = extract_code_blocks(content);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].id, 0);
        assert_eq!(blocks[0].language, "bash");
        assert_eq!(blocks[0].code, "npm install");
        assert_eq!(blocks[1].id, 1);
        assert_eq!(blocks[1].language, "rust");
        assert_eq!(blocks[1].code, "fn main() {}");
    }

    #[test]
    fn test_missing_or_blank_hint_uses_default() {
        let blocks = extract_code_blocks("```\nlet a = 1;\n```\n```   \nb\n```");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.language == DEFAULT_LANGUAGE));
    }

    #[test]
    fn test_configured_default_language() {
        let scanner = FenceScanner::new("text");
        let blocks = scanner.extract_code_blocks("```\nplain\n```");
        assert_eq!(blocks[0].language, "text");
    }

    #[test]
    fn test_hint_takes_first_token() {
        let blocks = extract_code_blocks("```rust ignore\nx\n```");
        assert_eq!(blocks[0].language, "rust");
    }

    #[test]
    fn test_hint_after_leading_space() {
        let blocks = extract_code_blocks("``` js\nx\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "js");
        assert_eq!(blocks[0].code, "x");
    }

    #[test]
    fn test_empty_content() {
        assert!(render_markdown("").is_empty());
        assert!(extract_code_blocks("").is_empty());
    }

    #[test]
    fn test_no_fences_is_single_prose() {
        let rendered = render_markdown("# Title\nplain text");
        assert_eq!(kinds(&rendered), vec!["prose"]);
        assert_eq!(rendered.segments[0].span(), &(0..18));
    }

    #[test]
    fn test_only_fences_skip_empty_prose() {
        let rendered = render_markdown("```a\n1\n``````b\n2\n```");
        assert_eq!(kinds(&rendered), vec!["code", "code"]);
    }

    #[test]
    fn test_interleaving_preserved() {
        let rendered = render_markdown("one\n```js\nx\n```\ntwo\n```py\ny\n```\nthree");
        assert_eq!(
            kinds(&rendered),
            vec!["prose", "code", "prose", "code", "prose"]
        );
        match &rendered.segments[2] {
            Segment::Prose { text, .. } => assert_eq!(text, "\ntwo\n"),
            other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_fence_is_prose() {
        let content = "a\n```js\nx\n```\nb\n```py\nnever closed";
        let rendered = render_markdown(content);
        assert_eq!(kinds(&rendered), vec!["prose", "code", "prose"]);
        match rendered.segments.last() {
            Some(Segment::Prose { text, .. }) => assert_eq!(text, "\nb\n```py\nnever closed"),
            other => panic!("unexpected segment {:?}", other),
        }
        assert_eq!(extract_code_blocks(content).len(), 1);
    }

    #[test]
    fn test_fence_without_newline_is_not_an_opener() {
        let blocks = extract_code_blocks("inline ```code``` here");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_four_backticks_open_at_second() {
        let rendered = render_markdown("````\nx\n```");
        match &rendered.segments[..] {
            [Segment::Prose { text, .. }, Segment::Code { block, .. }] => {
                assert_eq!(text, "`");
                assert_eq!(block.code, "x");
            }
            other => panic!("unexpected segments {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_is_kept() {
        let blocks = extract_code_blocks("```js\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "");
        assert_eq!(render_markdown("```js\n```").code_blocks().count(), 1);
    }

    #[test]
    fn test_spans_cover_source_in_order() {
        let content = "# T\n```bash\nls\n```\n\nText\n```\nz\n```\ntail ``` open\n";
        let rendered = render_markdown(content);
        let mut expected_start = 0;
        for segment in &rendered.segments {
            assert_eq!(segment.span().start, expected_start);
            expected_start = segment.span().end;
        }
        assert_eq!(expected_start, content.len());
    }

    #[test]
    fn test_render_and_extract_agree() {
        let content = "x\n```go\na\n```\n```\nb\n```\n```rs\nunclosed";
        let from_render: Vec<CodeBlock> =
            render_markdown(content).code_blocks().cloned().collect();
        assert_eq!(from_render, extract_code_blocks(content));
    }

    #[test]
    fn test_render_prose_headings() {
        let lines = render_prose("# One\n## Two\n### Three\n#### Four\n#NoSpace\ntext\n");
        assert_eq!(
            lines,
            vec![
                ProseLine::Heading { level: 1, text: "One".into() },
                ProseLine::Heading { level: 2, text: "Two".into() },
                ProseLine::Heading { level: 3, text: "Three".into() },
                ProseLine::Text("#### Four".into()),
                ProseLine::Text("#NoSpace".into()),
                ProseLine::Text("text".into()),
                ProseLine::Text("".into()),
            ]
        );
    }

    #[test]
    fn test_to_html() {
        let html = render_markdown("# Hi\n<b>\n```sh\necho <x>\n```").to_html();
        assert_eq!(
            html,
            "<div class=\"prose\"><h1>Hi</h1><br>&lt;b&gt;<br></div>\
             <div class=\"code-block\"><div class=\"code-header\">\
             <span class=\"language\">sh</span>\
             <button data-block=\"block-0\">Copy</button></div>\
             <pre><code class=\"language-sh\">echo &lt;x&gt;</code></pre></div>"
        );
    }
}
