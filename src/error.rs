use thiserror::Error;

/// Errors produced by notebook parsing and the document operations.
///
/// Every operation either returns a fully transformed document or one of
/// these; no partially mutated notebook is ever handed back.
#[derive(Debug, Error)]
pub enum NotebookError {
    /// The input was not valid JSON, or was valid JSON that does not match
    /// the notebook shape (for example a `cell_type` outside the closed set).
    #[error("invalid notebook JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("cell index {index} is out of range; the notebook has {count} cells")]
    CellIndexOutOfRange { index: i64, count: usize },

    #[error("position {position} is out of range; valid positions are 0 through {count}")]
    PositionOutOfRange { position: i64, count: usize },

    #[error("invalid merge range: end index {end} precedes start index {start}")]
    InvalidMergeRange { start: i64, end: i64 },

    #[error("invalid cell type `{0}`; expected `code`, `markdown`, or `raw`")]
    InvalidCellType(String),

    #[error(
        "unsupported export format `{0}`; supported formats are \
         python, html, markdown, rst, latex, pdf, and slides"
    )]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("rendering to {format} failed: {message}")]
    Render { format: String, message: String },
}
