//! Error types and handling for `TrailBuddy`

use thiserror::Error;

/// Main error type for the `TrailBuddy` application
#[derive(Error, Debug)]
pub enum TrailBuddyError {
    /// Configuration-related errors, including a missing API key
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Trail dataset errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Malformed rows in the trail dataset
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

impl TrailBuddyError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TrailBuddyError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and API keys.")
            }
            TrailBuddyError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TrailBuddyError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TrailBuddyError::Dataset { .. } | TrailBuddyError::Csv { .. } => {
                "The trail dataset could not be read. Please check the trails file.".to_string()
            }
            TrailBuddyError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
