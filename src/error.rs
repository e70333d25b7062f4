use thiserror::Error;

/// Failures at the export boundary. The parsing and rendering passes are
/// total over their inputs and have no error cases of their own.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("typst compilation failed: {0}")]
    Compile(String),
    #[error("pdf generation failed: {0}")]
    Pdf(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
