pub mod backend;
pub mod config;
pub mod config_file;
pub mod gateway;
pub mod mock;
pub mod openai;
pub mod prompt;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use config::{ConfigError, ServiceConfig};
pub use gateway::{ChatMessage, ChatRequest, GatewayError, ModelBackend, Simplifier};
pub use openai::OpenAiBackend;

/// Suffixes accepted for upload, in the order they are reported to callers.
pub const ALLOWED_SUFFIXES: [&str; 4] = [".txt", ".md", ".pdf", ".csv"];

/// The kind of content a document is declared to hold, judged by its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Markdown,
    Csv,
    Pdf,
    Unsupported,
}

impl DocumentKind {
    /// Classify a filename by its lowercase suffix.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();

        if lower.ends_with(".txt") {
            DocumentKind::Text
        } else if lower.ends_with(".md") {
            DocumentKind::Markdown
        } else if lower.ends_with(".csv") {
            DocumentKind::Csv
        } else if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Unsupported
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Text => "text",
            DocumentKind::Markdown => "markdown",
            DocumentKind::Csv => "csv",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Unsupported => "unsupported",
        }
    }
}

/// An uploaded file as received at the boundary.
///
/// `declared_kind` is computed once in [`UploadedDocument::new`] and is not
/// exposed for mutation.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    filename: String,
    raw_bytes: Vec<u8>,
    declared_kind: DocumentKind,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, raw_bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let declared_kind = DocumentKind::from_filename(&filename);
        Self {
            filename,
            raw_bytes,
            declared_kind,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }

    pub fn declared_kind(&self) -> DocumentKind {
        self.declared_kind
    }
}

/// Text successfully pulled out of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub source_filename: String,
}

/// Coarse failure classes, each mapped to one HTTP status at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or empty text or file, unsupported file type.
    InputValidation,
    /// Unreadable encoding, PDF parse error, image-only PDF, empty content.
    ExtractionFailure,
    /// An optional capability (PDF support) is absent from this build.
    DependencyUnavailable,
    /// The external model call failed.
    UpstreamFailure,
}

impl ErrorClass {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorClass::InputValidation | ErrorClass::ExtractionFailure => 400,
            ErrorClass::DependencyUnavailable | ErrorClass::UpstreamFailure => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::InputValidation => "input_validation",
            ErrorClass::ExtractionFailure => "extraction_failure",
            ErrorClass::DependencyUnavailable => "dependency_unavailable",
            ErrorClass::UpstreamFailure => "upstream_failure",
        }
    }
}
