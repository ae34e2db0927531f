//! Error types for the extraction pipeline

use chrono_llm::ClientError;
use std::time::Duration;
use thiserror::Error;

/// Failure to locate a JSON object in a completion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No `{ ... }` span in the text
    #[error("No JSON object found in completion")]
    NoJsonFound,
}

/// Batch-level failures that abort the whole extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `{ ... }` span in the completion
    #[error("No JSON object found in completion")]
    NoJsonFound,

    /// The recovered span is not valid JSON
    #[error("Invalid JSON in completion: {0}")]
    InvalidJson(String),

    /// No top-level `items` array
    #[error("Completion JSON has no 'items' array")]
    MissingItemsField,
}

impl From<ExtractError> for ParseError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::NoJsonFound => ParseError::NoJsonFound,
        }
    }
}

/// Item-level failure; collected alongside the items that did decode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// A required field is absent, not text, or (for `title`) empty
    #[error("Item {index}: missing required field '{field}'")]
    MissingRequiredField {
        /// Position in the `items` array
        index: usize,
        /// JSON key that was missing
        field: &'static str,
    },

    /// The element is not a JSON object
    #[error("Item {index}: not a JSON object")]
    NotAnObject {
        /// Position in the `items` array
        index: usize,
    },
}

impl DecodeFailure {
    /// Position of the failed element in the `items` array
    pub fn index(&self) -> usize {
        match self {
            DecodeFailure::MissingRequiredField { index, .. } => *index,
            DecodeFailure::NotAnObject { index } => *index,
        }
    }
}

/// Errors returned by the pipeline entry point
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Nothing to extract from
    #[error("Input text is empty")]
    EmptyInput,

    /// Input exceeds the configured maximum length
    #[error("Input too long: {0} chars (max: {1})")]
    InputTooLong(usize, usize),

    /// Provider call failed
    #[error("Provider call failed: {0}")]
    Client(#[from] ClientError),

    /// Completion could not be parsed
    #[error("Could not parse completion: {0}")]
    Parse(#[from] ParseError),

    /// Provider call exceeded the caller's timeout
    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
