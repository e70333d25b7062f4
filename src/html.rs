use crate::block::{BlockNode, InlineSpan};

/// Trailing marker appended while streamed output is still growing.
const CURSOR_MARKER: &str = "<span class=\"cursor\">\u{258d}</span>";

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlOptions {
    /// Append a cursor marker after the last node. Cosmetic only; never
    /// alters the escaped content stream.
    pub streaming: bool,
}

/// Render block nodes to an HTML fragment string.
///
/// All raw text is escaped at the leaves, exactly once, before any tag
/// wrapping around it is emitted.
pub fn render_html(blocks: &[BlockNode], opts: &HtmlOptions) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(block, &mut out);
    }
    if opts.streaming {
        out.push_str(CURSOR_MARKER);
    }
    out
}

fn render_block(block: &BlockNode, out: &mut String) {
    match block {
        BlockNode::Heading { level, content } => {
            out.push_str("<h");
            out.push((b'0' + level) as char);
            out.push('>');
            render_spans(content, out);
            out.push_str("</h");
            out.push((b'0' + level) as char);
            out.push_str(">\n");
        }
        BlockNode::Paragraph { lines } => {
            out.push_str("<p>");
            for (idx, line) in lines.iter().enumerate() {
                if idx > 0 {
                    out.push_str("<br/>");
                }
                render_spans(line, out);
            }
            out.push_str("</p>\n");
        }
        BlockNode::CodeBlock { content } => {
            out.push_str("<pre><code>");
            escape_html(content, out);
            out.push_str("</code></pre>\n");
        }
        BlockNode::BlockQuote { content } => {
            out.push_str("<blockquote>");
            render_spans(content, out);
            out.push_str("</blockquote>\n");
        }
        BlockNode::UnorderedList { items } => {
            out.push_str("<ul>\n");
            render_items(items, out);
            out.push_str("</ul>\n");
        }
        BlockNode::OrderedList { items } => {
            out.push_str("<ol>\n");
            render_items(items, out);
            out.push_str("</ol>\n");
        }
    }
}

fn render_items(items: &[Vec<InlineSpan>], out: &mut String) {
    for item in items {
        out.push_str("<li>");
        render_spans(item, out);
        out.push_str("</li>\n");
    }
}

fn render_spans(spans: &[InlineSpan], out: &mut String) {
    for span in spans {
        match span {
            InlineSpan::Text(text) => escape_html(text, out),
            InlineSpan::Bold(children) => {
                out.push_str("<strong>");
                render_spans(children, out);
                out.push_str("</strong>");
            }
            InlineSpan::Italic(children) => {
                out.push_str("<em>");
                render_spans(children, out);
                out.push_str("</em>");
            }
            InlineSpan::Code(text) => {
                out.push_str("<code>");
                escape_html(text, out);
                out.push_str("</code>");
            }
            InlineSpan::Link { label, href } => {
                out.push_str("<a href=\"");
                escape_html(href, out);
                out.push_str("\">");
                escape_html(label, out);
                out.push_str("</a>");
            }
        }
    }
}

fn escape_html(input: &str, out: &mut String) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
