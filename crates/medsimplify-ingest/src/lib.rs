use std::sync::Arc;

use thiserror::Error;

pub mod decode;

// Re-export domain types for convenience
pub use medsimplify_core::{
    ALLOWED_SUFFIXES, DocumentKind, ErrorClass, ExtractedText, PdfBackend, UploadedDocument,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("File type not supported. Please upload: {}", ALLOWED_SUFFIXES.join(", "))]
    UnsupportedFileType,
    #[error("Could not read file. Please make sure it is a valid text file.")]
    UnreadableFile,
    #[error("Error reading PDF: {0}")]
    PdfParse(String),
    #[error("PDF appears to be empty or contains only images. Please upload a text-based PDF.")]
    PdfEmptyOrImageOnly,
    #[error("File appears to be empty or could not be read")]
    EmptyContent,
    #[error("PDF support is not available on this server. Please upload a .txt, .md, or .csv file.")]
    PdfSupportUnavailable,
}

impl ExtractionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ExtractionError::NoFileSelected | ExtractionError::UnsupportedFileType => {
                ErrorClass::InputValidation
            }
            ExtractionError::UnreadableFile
            | ExtractionError::PdfParse(_)
            | ExtractionError::PdfEmptyOrImageOnly
            | ExtractionError::EmptyContent => ErrorClass::ExtractionFailure,
            ExtractionError::PdfSupportUnavailable => ErrorClass::DependencyUnavailable,
        }
    }
}

/// The PDF backend compiled into this build, if any.
///
/// Resolve this once at startup and hand it to [`TextExtractor::new`].
#[cfg(feature = "pdf")]
pub fn default_pdf_backend() -> Option<Arc<dyn PdfBackend>> {
    Some(Arc::new(medsimplify_pdf_mupdf::MupdfBackend::new()))
}

#[cfg(not(feature = "pdf"))]
pub fn default_pdf_backend() -> Option<Arc<dyn PdfBackend>> {
    None
}

/// Turns uploaded files into validated text.
///
/// PDF support is a capability injected at construction; without a backend,
/// PDF uploads fail with [`ExtractionError::PdfSupportUnavailable`].
#[derive(Clone, Default)]
pub struct TextExtractor {
    pdf: Option<Arc<dyn PdfBackend>>,
}

impl TextExtractor {
    pub fn new(pdf: Option<Arc<dyn PdfBackend>>) -> Self {
        Self { pdf }
    }

    /// Extractor wired with whatever backends this build was compiled with.
    pub fn with_default_backends() -> Self {
        Self::new(default_pdf_backend())
    }

    pub fn supports_pdf(&self) -> bool {
        self.pdf.is_some()
    }

    pub fn extract_document(
        &self,
        document: &UploadedDocument,
    ) -> Result<ExtractedText, ExtractionError> {
        self.extract_declared(
            document.filename(),
            document.declared_kind(),
            document.raw_bytes(),
        )
    }

    /// Extract and validate the text of an uploaded file.
    ///
    /// The returned text is exactly what was decoded; it is not trimmed.
    pub fn extract(
        &self,
        filename: &str,
        raw_bytes: &[u8],
    ) -> Result<ExtractedText, ExtractionError> {
        self.extract_declared(filename, DocumentKind::from_filename(filename), raw_bytes)
    }

    fn extract_declared(
        &self,
        filename: &str,
        kind: DocumentKind,
        raw_bytes: &[u8],
    ) -> Result<ExtractedText, ExtractionError> {
        if filename.is_empty() {
            return Err(ExtractionError::NoFileSelected);
        }

        let result = self.extract_kind(kind, raw_bytes);

        match &result {
            Ok(text) => tracing::info!(
                filename,
                kind = kind.as_str(),
                bytes = raw_bytes.len(),
                chars = text.chars().count(),
                "extracted text"
            ),
            Err(e) => tracing::warn!(
                filename,
                kind = kind.as_str(),
                bytes = raw_bytes.len(),
                error = %e,
                "extraction failed"
            ),
        }

        result.map(|text| ExtractedText {
            text,
            source_filename: filename.to_string(),
        })
    }

    fn extract_kind(&self, kind: DocumentKind, raw_bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = match kind {
            DocumentKind::Unsupported => return Err(ExtractionError::UnsupportedFileType),
            DocumentKind::Text | DocumentKind::Markdown | DocumentKind::Csv => {
                decode::decode_text(raw_bytes)?
            }
            DocumentKind::Pdf => self.extract_pdf(raw_bytes)?,
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyContent);
        }

        Ok(text)
    }

    fn extract_pdf(&self, raw_bytes: &[u8]) -> Result<String, ExtractionError> {
        let backend = self
            .pdf
            .as_ref()
            .ok_or(ExtractionError::PdfSupportUnavailable)?;

        let pages = backend
            .extract_pages(raw_bytes)
            .map_err(|e| ExtractionError::PdfParse(e.to_string()))?;

        let mut text = String::new();
        for page in &pages {
            text.push_str(page);
            text.push('\n');
        }

        if text.trim().is_empty() {
            return Err(ExtractionError::PdfEmptyOrImageOnly);
        }

        Ok(text)
    }
}
