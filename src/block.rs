/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    Bold(Vec<InlineSpan>),
    Italic(Vec<InlineSpan>),
    Code(String),
    Link { label: String, href: String },
}

impl InlineSpan {
    pub fn text(s: impl Into<String>) -> Self {
        InlineSpan::Text(s.into())
    }

    pub fn bold(s: impl Into<String>) -> Self {
        InlineSpan::Bold(vec![InlineSpan::Text(s.into())])
    }

    pub fn italic(s: impl Into<String>) -> Self {
        InlineSpan::Italic(vec![InlineSpan::Text(s.into())])
    }
}

/// Block-level elements segmented from Markdown.
///
/// A document is an ordered sequence of these nodes. Blank lines act as
/// separators during segmentation and never appear as nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Heading {
        level: u8,
        content: Vec<InlineSpan>,
    },
    /// One span sequence per source line; lines are joined by soft breaks.
    Paragraph {
        lines: Vec<Vec<InlineSpan>>,
    },
    /// Verbatim fenced content, never inline-parsed.
    CodeBlock {
        content: String,
    },
    /// Exactly one source line per node.
    BlockQuote {
        content: Vec<InlineSpan>,
    },
    UnorderedList {
        items: Vec<Vec<InlineSpan>>,
    },
    OrderedList {
        items: Vec<Vec<InlineSpan>>,
    },
}
