//! Error handling utilities for the confide application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}. Try closing other confide instances.")]
    Pool(#[from] r2d2::Error),

    /// Requested entry not found in database.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents specific error cases that can occur when calling hosted models.
///
/// This enum provides detailed, contextual error information for different
/// failure modes when interacting with the inference and chat-completion APIs.
///
/// # Examples
///
/// ```
/// use confide::errors::AiError;
///
/// let error = AiError::ModelNotFound("llama-3.3-70b-versatile".to_string());
/// assert!(format!("{}", error).contains("llama-3.3-70b-versatile"));
/// ```
#[derive(Debug, Error)]
pub enum AiError {
    /// The hosted API is not reachable.
    #[error("Model API unreachable: {0}. Check your network connection and API key.")]
    Offline(#[source] reqwest::Error),

    /// Requested model not found at the API.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Invalid or unexpected response from the API.
    #[error("Invalid response from model API: {0}")]
    InvalidResponse(String),

    /// The API returned an error status.
    #[error("Model API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}

/// Represents all possible errors that can occur in the confide application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors in journal logic (e.g., invalid date or mood-name formats).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to database operations.
    ///
    /// This variant uses a dedicated DatabaseError type to provide detailed
    /// information about what went wrong with database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to hosted model calls.
    ///
    /// This variant uses a dedicated AiError type to provide detailed
    /// information about what went wrong with inference or chat API calls.
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    /// Errors from the remote sync collaborator (auth, download, upload).
    #[error("Sync error: {0}")]
    Sync(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// This type alias is used throughout the application to represent operations
/// that may fail with an `AppError`.
///
/// # Examples
///
/// ```
/// use confide::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
