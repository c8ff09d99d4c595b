use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid connection file: {reason}")]
    InvalidFile { reason: String },

    #[error("connection file not found: {path}")]
    FileNotFound { path: String },

    #[error("connection config has unexpected shape: {reason}")]
    TypeMismatch { reason: String },
}
