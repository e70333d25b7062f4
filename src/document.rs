//! Word-processing document model produced from the shared block IR.
//!
//! Both output targets read the same segmented tree; this module only
//! reshapes it into styled paragraphs and runs for export.

use crate::block::{BlockNode, InlineSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Heading(u8),
    Body,
    Quote,
    Bullet,
    /// All numbered paragraphs share one document-wide numbering
    /// definition; lists are not independently styled.
    Numbered,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocRun {
    Text {
        text: String,
        bold: bool,
        italic: bool,
        mono: bool,
    },
    Link {
        label: String,
        href: String,
    },
    LineBreak,
}

impl DocRun {
    pub fn plain(text: impl Into<String>) -> Self {
        DocRun::Text {
            text: text.into(),
            bold: false,
            italic: false,
            mono: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParagraph {
    pub style: ParagraphStyle,
    pub runs: Vec<DocRun>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocModel {
    pub title: Option<String>,
    pub paragraphs: Vec<DocParagraph>,
}

/// Build the export document model from segmented blocks.
pub fn build_document(blocks: &[BlockNode], title: Option<&str>) -> DocModel {
    let mut paragraphs = Vec::new();
    for block in blocks {
        match block {
            BlockNode::Heading { level, content } => paragraphs.push(DocParagraph {
                style: ParagraphStyle::Heading(*level),
                runs: spans_to_runs(content),
            }),
            BlockNode::Paragraph { lines } => {
                let mut runs = Vec::new();
                for (idx, line) in lines.iter().enumerate() {
                    if idx > 0 {
                        runs.push(DocRun::LineBreak);
                    }
                    runs.extend(spans_to_runs(line));
                }
                paragraphs.push(DocParagraph {
                    style: ParagraphStyle::Body,
                    runs,
                });
            }
            BlockNode::CodeBlock { content } => paragraphs.push(DocParagraph {
                style: ParagraphStyle::Code,
                runs: vec![DocRun::Text {
                    text: content.clone(),
                    bold: false,
                    italic: false,
                    mono: true,
                }],
            }),
            BlockNode::BlockQuote { content } => paragraphs.push(DocParagraph {
                style: ParagraphStyle::Quote,
                runs: spans_to_runs(content),
            }),
            BlockNode::UnorderedList { items } => {
                for item in items {
                    paragraphs.push(DocParagraph {
                        style: ParagraphStyle::Bullet,
                        runs: spans_to_runs(item),
                    });
                }
            }
            BlockNode::OrderedList { items } => {
                for item in items {
                    paragraphs.push(DocParagraph {
                        style: ParagraphStyle::Numbered,
                        runs: spans_to_runs(item),
                    });
                }
            }
        }
    }
    DocModel {
        title: title.map(str::to_string),
        paragraphs,
    }
}

fn spans_to_runs(spans: &[InlineSpan]) -> Vec<DocRun> {
    let mut runs = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            InlineSpan::Text(text) => runs.push(DocRun::plain(text)),
            InlineSpan::Bold(children) => runs.push(DocRun::Text {
                text: plain_text(children),
                bold: true,
                italic: false,
                mono: false,
            }),
            InlineSpan::Italic(children) => runs.push(DocRun::Text {
                text: plain_text(children),
                bold: false,
                italic: true,
                mono: false,
            }),
            InlineSpan::Code(text) => runs.push(DocRun::Text {
                text: text.clone(),
                bold: false,
                italic: false,
                mono: true,
            }),
            InlineSpan::Link { label, href } => runs.push(DocRun::Link {
                label: label.clone(),
                href: href.clone(),
            }),
        }
    }
    runs
}

// Emphasis bodies are opaque text in this dialect, so flattening loses
// nothing.
fn plain_text(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            InlineSpan::Text(text) | InlineSpan::Code(text) => out.push_str(text),
            InlineSpan::Bold(children) | InlineSpan::Italic(children) => {
                out.push_str(&plain_text(children));
            }
            InlineSpan::Link { label, .. } => out.push_str(label),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::segment;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_maps_to_heading_style() {
        let doc = build_document(&segment("## Title"), None);
        assert_eq!(
            doc.paragraphs,
            vec![DocParagraph {
                style: ParagraphStyle::Heading(2),
                runs: vec![DocRun::plain("Title")],
            }]
        );
    }

    #[test]
    fn soft_breaks_become_line_break_runs() {
        let doc = build_document(&segment("one\ntwo"), None);
        assert_eq!(
            doc.paragraphs,
            vec![DocParagraph {
                style: ParagraphStyle::Body,
                runs: vec![
                    DocRun::plain("one"),
                    DocRun::LineBreak,
                    DocRun::plain("two"),
                ],
            }]
        );
    }

    #[test]
    fn list_items_expand_to_one_paragraph_each() {
        let doc = build_document(&segment("- a\n- b\n\n1. c"), None);
        let styles: Vec<_> = doc.paragraphs.iter().map(|p| p.style).collect();
        assert_eq!(
            styles,
            vec![
                ParagraphStyle::Bullet,
                ParagraphStyle::Bullet,
                ParagraphStyle::Numbered,
            ]
        );
    }

    #[test]
    fn styled_runs_carry_formatting_flags() {
        let doc = build_document(&segment("**b** *i* `c`"), None);
        assert_eq!(
            doc.paragraphs[0].runs,
            vec![
                DocRun::Text {
                    text: "b".to_string(),
                    bold: true,
                    italic: false,
                    mono: false,
                },
                DocRun::plain(" "),
                DocRun::Text {
                    text: "i".to_string(),
                    bold: false,
                    italic: true,
                    mono: false,
                },
                DocRun::plain(" "),
                DocRun::Text {
                    text: "c".to_string(),
                    bold: false,
                    italic: false,
                    mono: true,
                },
            ]
        );
    }

    #[test]
    fn quote_lines_keep_one_paragraph_per_line() {
        let doc = build_document(&segment("> a\n> b"), None);
        let styles: Vec<_> = doc.paragraphs.iter().map(|p| p.style).collect();
        assert_eq!(styles, vec![ParagraphStyle::Quote, ParagraphStyle::Quote]);
    }

    #[test]
    fn paragraph_order_matches_block_order() {
        let src = "# h\n\npara\n\n> q\n\n- a\n- b\n\n```\nc\n```";
        let blocks = segment(src);
        let doc = build_document(&blocks, None);
        let styles: Vec<_> = doc.paragraphs.iter().map(|p| p.style).collect();
        assert_eq!(
            styles,
            vec![
                ParagraphStyle::Heading(1),
                ParagraphStyle::Body,
                ParagraphStyle::Quote,
                ParagraphStyle::Bullet,
                ParagraphStyle::Bullet,
                ParagraphStyle::Code,
            ]
        );
    }

    #[test]
    fn title_is_carried_on_the_model() {
        let doc = build_document(&segment("x"), Some("My Doc"));
        assert_eq!(doc.title.as_deref(), Some("My Doc"));
    }
}
