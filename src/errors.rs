//! Error types for the codenest application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while managing and reading tutorials.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the codenest application.
#[derive(Error, Debug)]
pub enum CodeNestError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tutorial was not found when performing an operation.
    #[error("Tutorial not found: {id}")]
    TutorialNotFound { id: u64 },

    /// Tutorial with the same ID already exists.
    #[error("Tutorial already exists: {id}")]
    TutorialAlreadyExists { id: u64 },

    /// A seeded id leaves no room for the ids that follow it.
    #[error("Tutorial id {id} is out of range")]
    TutorialIdOutOfRange { id: u64 },

    /// The tutorial has no code block at the requested position.
    #[error("Tutorial {tutorial_id} has no code block {index}")]
    CodeBlockNotFound { tutorial_id: u64, index: usize },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Config file could not be read.
    #[error("Failed to read config file: {path}")]
    ConfigFileError { path: PathBuf },

    /// Writing to the system clipboard failed.
    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    /// The command line entered in the shell could not be understood.
    #[error("{message}")]
    InvalidCommand { message: String },

    /// Operation is not available in the current view.
    #[error("{message}")]
    InvalidView { message: String },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },
}
