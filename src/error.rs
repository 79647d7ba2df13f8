//! Error types for fragment extraction

use std::process::ExitCode;

use thiserror::Error;

/// Errors raised by the extraction pipeline and its CLI
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("parse failure: {message}")]
    ParseFailure { message: String },

    #[error("selection is not a JSX fragment")]
    NotAFragment,

    #[error("invalid position '{input}': expected LINE:CHARACTER")]
    InvalidPosition { input: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Process exit code reported by the CLI for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } | Self::Io(_) => ExitCode::from(2),
            Self::UnsupportedLanguage { .. } => ExitCode::from(3),
            Self::ParseFailure { .. } | Self::NotAFragment => ExitCode::from(4),
            Self::InvalidPosition { .. } | Self::Config { .. } | Self::Json(_) => {
                ExitCode::from(1)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
