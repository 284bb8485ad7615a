//! Error types for the invq-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the invq library.
#[derive(Error, Debug)]
pub enum InvqError {
    /// PDF or document source error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Persisted dataset error.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to reading invoice documents.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The file is neither a PDF nor plain text.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to the persisted invoice dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a JSON array of invoices.
    #[error("failed to decode {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while turning a question into an answer.
///
/// `UnknownOperation` and `InvalidArguments` mean the classifier broke its
/// contract; they are not caused by the user's wording.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The classifier selected a tool that does not exist.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The tool arguments do not match the declared parameter schema.
    #[error("invalid arguments for {operation}: {reason}")]
    InvalidArguments { operation: String, reason: String },

    /// The classifier call itself failed.
    #[error("intent classification failed: {0}")]
    Classifier(#[from] LlmError),
}

/// Errors from the intent classification service.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),

    #[error("response error: {0}")]
    Response(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
}

/// Result type for the invq library.
pub type Result<T> = std::result::Result<T, InvqError>;
