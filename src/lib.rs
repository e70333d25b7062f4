mod block;
mod config;
mod document;
mod error;
mod html;
mod inline;
mod parser;
mod typst;

pub use block::{BlockNode, InlineSpan};
pub use config::Config;
pub use document::{DocModel, DocParagraph, DocRun, ParagraphStyle, build_document};
pub use error::ExportError;
pub use html::{HtmlOptions, render_html};
pub use inline::format;
pub use parser::segment;
pub use typst::{document_to_pdf, document_to_typst};

/// Render markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str, opts: &HtmlOptions) -> String {
    render_html(&segment(markdown), opts)
}

/// Convert markdown to Typst markup.
pub fn markdown_to_typst(markdown: &str, title: Option<&str>, config: &Config) -> String {
    document_to_typst(&build_document(&segment(markdown), title), config)
}

/// Convert markdown to exportable document bytes (PDF).
pub fn markdown_to_document(
    markdown: &str,
    title: Option<&str>,
    config: &Config,
) -> Result<Vec<u8>, ExportError> {
    document_to_pdf(&build_document(&segment(markdown), title), config)
}

/// Interpolate a title and metadata tags as plain leading markdown lines.
///
/// The result is ordinary engine input; nothing here is validated or
/// escaped beyond what parsing itself does.
pub fn compose_source(title: Option<&str>, tags: &[&str], body: &str) -> String {
    let mut out = String::new();
    if let Some(title) = title {
        out.push_str("# ");
        out.push_str(title);
        out.push_str("\n\n");
    }
    if !tags.is_empty() {
        out.push('*');
        out.push_str(&tags.join(" / "));
        out.push_str("*\n\n");
    }
    out.push_str(body);
    out
}
