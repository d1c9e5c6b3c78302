use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfDeskError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Invalid page range: {0}")]
    InvalidRange(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Conversion failed: {0}")]
    ConvertError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),
}
