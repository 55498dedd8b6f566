/*!
 * Error types for the subedit application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when reading a timestamp or clock string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// The text does not have the expected `HH:MM:SS.mmm` shape
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    /// A component could not be read as a number
    #[error("Invalid number '{component}' in timestamp: {input}")]
    InvalidNumber {
        /// Offending component
        component: String,
        /// Full input text
        input: String,
    },

    /// Minutes or seconds outside 0..60
    #[error("Time component out of range in timestamp: {0}")]
    OutOfRange(String),
}

/// Errors returned by cue editing operations
///
/// Every variant means the operation was rejected and nothing was mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// The index does not address a cue in the current sequence
    #[error("Cue index {index} is out of range (sequence has {len} cues)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current sequence length
        len: usize,
    },

    /// The split time does not fall strictly inside the cue
    #[error("Split time {at:.3}s is not within the cue's time range ({start:.3}s - {end:.3}s)")]
    SplitOutOfRange {
        /// Requested split point in seconds
        at: f64,
        /// Cue start in seconds
        start: f64,
        /// Cue end in seconds
        end: f64,
    },

    /// The split time typed by the user could not be read
    #[error("Invalid split time: {0}")]
    InvalidSplitTime(#[from] TimecodeError),

    /// The requested action needs a different editing mode
    #[error("Cannot {action} while {mode}")]
    WrongMode {
        /// Attempted action
        action: &'static str,
        /// Current mode description
        mode: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an editing operation
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Error reading a timestamp
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

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
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
