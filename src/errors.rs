/*!
 * Error types for the bibsort application.
 *
 * This module contains custom error types for the different stages of the
 * sorting pipeline, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating the `thebibliography` environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BibliographyError {
    /// The opening `\begin{thebibliography}{..}` line was not found at the start of the document
    #[error("missing \\begin{{thebibliography}}{{{argument}}} at the start of the document")]
    MissingBeginMarker {
        /// Placeholder argument the begin marker was expected to carry
        argument: String,
    },

    /// No `\end{thebibliography}` after the begin marker
    #[error("missing \\end{{thebibliography}} after the begin marker")]
    MissingEndMarker,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The input bibliography does not exist
    #[error("File '{}' not found. Please ensure the file exists.", .0.display())]
    MissingInput(PathBuf),

    /// The document has no usable bibliography envelope
    #[error("Non-standard file structure: {0}")]
    Structure(#[from] BibliographyError),

    /// Sorting aborted unexpectedly
    #[error("Sorting failed: {0}")]
    SortFailure(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
