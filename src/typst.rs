use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

use crate::config::Config;
use crate::document::{DocModel, DocRun, ParagraphStyle};
use crate::error::ExportError;

/// Serialize a document model to Typst markup.
pub fn document_to_typst(doc: &DocModel, config: &Config) -> String {
    let mut out = String::new();

    if let Some(title) = &doc.title {
        out.push_str("#set document(title: \"");
        push_string_literal(title, &mut out);
        out.push_str("\")\n");
    }
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    // One numbering definition shared by every numbered paragraph.
    out.push_str("#set enum(numbering: \"1.\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    if config.links.underline {
        out.push_str("#show link: underline\n");
    }
    out.push_str("#show link: set text(fill: rgb(\"");
    push_string_literal(&config.links.color, &mut out);
    out.push_str("\"))\n\n");

    for (idx, para) in doc.paragraphs.iter().enumerate() {
        match para.style {
            ParagraphStyle::Heading(level) => {
                for _ in 0..level {
                    out.push('=');
                }
                out.push(' ');
                runs_to_typst(&para.runs, &mut out);
                out.push_str("\n\n");
            }
            ParagraphStyle::Body => {
                runs_to_typst(&para.runs, &mut out);
                out.push_str("\n\n");
            }
            ParagraphStyle::Quote => {
                out.push_str("#quote(block: true)[");
                runs_to_typst(&para.runs, &mut out);
                out.push_str("]\n\n");
            }
            ParagraphStyle::Bullet | ParagraphStyle::Numbered => {
                out.push_str(if para.style == ParagraphStyle::Numbered {
                    "+ "
                } else {
                    "- "
                });
                runs_to_typst(&para.runs, &mut out);
                out.push('\n');
                // Blank line after the last item of a run of same-styled
                // list paragraphs.
                if doc.paragraphs.get(idx + 1).map(|n| n.style) != Some(para.style) {
                    out.push('\n');
                }
            }
            ParagraphStyle::Code => {
                out.push_str("```\n");
                for run in &para.runs {
                    if let DocRun::Text { text, .. } = run {
                        out.push_str(text);
                    }
                }
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n\n");
            }
        }
    }

    out
}

/// Compile a document model to PDF bytes.
pub fn document_to_pdf(doc: &DocModel, config: &Config) -> Result<Vec<u8>, ExportError> {
    use typst_library::layout::PagedDocument;

    let source = document_to_typst(doc, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(source)
        .search_fonts_with(font_options)
        .build();

    let paged: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| ExportError::Compile(format!("{e:?}")))?;

    let bytes = typst_pdf::pdf(&paged, &PdfOptions::default())
        .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;
    debug!(bytes = bytes.len(), "exported pdf");
    Ok(bytes)
}

fn runs_to_typst(runs: &[DocRun], out: &mut String) {
    for run in runs {
        match run {
            DocRun::Text {
                text,
                bold,
                italic,
                mono,
            } => {
                if *bold {
                    out.push('*');
                }
                if *italic {
                    out.push('_');
                }
                if *mono {
                    out.push('`');
                    // Inside raw/code, backticks need special handling
                    out.push_str(&text.replace('`', "\\`"));
                    out.push('`');
                } else {
                    escape_typst(text, out);
                }
                if *italic {
                    out.push('_');
                }
                if *bold {
                    out.push('*');
                }
            }
            DocRun::Link { label, href } => {
                out.push_str("#link(\"");
                push_string_literal(href, out);
                out.push_str("\")[");
                escape_typst(label, out);
                out.push(']');
            }
            DocRun::LineBreak => out.push_str(" \\\n"),
        }
    }
}

fn escape_typst(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn push_string_literal(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
}
