/*!
 * Error types for the storyshape application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a sentiment provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Input exceeds the model's accepted length
    #[error("Input of {chars} chars exceeds the provider limit of {max}")]
    InputTooLong {
        /// Length of the rejected input
        chars: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Errors that can occur while building a trajectory
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// Segment length must be at least one token
    #[error("Invalid segment length: {0} (must be at least 1)")]
    InvalidSegmentLength(usize),

    /// Window length must hold at least one value
    #[error("Invalid window length: {0} (must be at least 1)")]
    InvalidWindowLength(usize),

    /// Stride must advance by at least one value
    #[error("Invalid stride: {0} (must be at least 1)")]
    InvalidStride(usize),

    /// Error from the sentiment provider, propagated unchanged
    #[error("Scorer error: {0}")]
    Scorer(#[from] ProviderError),

    /// Error reading the story document
    #[error("Failed to read story: {0}")]
    Read(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the trajectory pipeline
    #[error("Trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
