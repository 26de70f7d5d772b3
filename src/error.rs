//! Error types for mentor.
//!
//! Parsing answer text never fails; errors come from I/O, configuration,
//! study-material JSON and PDF compilation.

use std::io;
use thiserror::Error;

/// Result type alias for mentor operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A quiz names an answer index that is not one of its options.
    #[error("quiz {index}: correct answer {answer} is out of range for {options} options")]
    InvalidQuiz {
        index: usize,
        answer: usize,
        options: usize,
    },

    #[error("Typst compilation failed: {0}")]
    Typst(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
