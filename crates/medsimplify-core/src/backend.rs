use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors parse an in-memory document and return the text of each page
/// in page order. Joining pages and validating the result is left to the
/// extractor in `medsimplify-ingest`.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page of a PDF held in memory.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>, BackendError>;
}
