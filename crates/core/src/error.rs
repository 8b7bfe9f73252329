//! Error types for presentation synthesis.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synthesizing a presentation.
///
/// Synthesis entry points never return these directly; they are folded into
/// a result with an error status and a message.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The content generator rejected the request or failed mid-flight.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// The content generator returned nothing usable.
    #[error("Generation returned an empty response")]
    EmptyResponse,

    /// The caller abandoned a streaming response before it finished.
    #[error("Generation stream was cancelled")]
    Cancelled,

    /// A template definition breaks a registry invariant.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The template source could not be decoded.
    #[error("Template source error: {0}")]
    TemplateSource(#[from] serde_json::Error),

    /// A renderer could not produce output for a document.
    #[error("Render error: {0}")]
    RenderError(String),
}
