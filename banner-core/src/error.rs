//! Error types for canvas operations.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// None of these are surfaced to the user as failures: the scene is left
/// unchanged and the host decides whether to log the outcome.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Element not found in scene.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Badge not found in scene.
    #[error("Badge not found: {0}")]
    BadgeNotFound(String),

    /// Invalid element operation (e.g. grouping fewer than two elements).
    #[error("Invalid operation on element: {0}")]
    InvalidOperation(String),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
