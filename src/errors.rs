//! Error types for the meetlog application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while keeping the incident log and the preferences.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the meetlog application.
#[derive(Error, Debug)]
pub enum MeetlogError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key-value slot could not be written. The in-memory state still
    /// holds the attempted change.
    #[error("Failed to persist '{key}': {message}")]
    Persistence { key: String, message: String },

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },

    /// A required note field was empty.
    #[error("Field '{field}' is required")]
    Validation { field: &'static str },

    /// A date/time given on the command line could not be understood.
    #[error("Invalid date/time '{value}', expected YYYY-MM-DD HH:MM")]
    InvalidDateTime { value: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// A stored or user supplied preference value was not recognized.
    #[error("Invalid preference value: {value}")]
    InvalidPreference { value: String },
}
