use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigureError>;

#[derive(Error, Debug)]
pub enum ConfigureError {
    // Standard library errors with automatic conversion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Operator input
    #[error("Input error: {0}")]
    Input(String),

    #[error("Forbidden project name")]
    ForbiddenName { name: String },

    // Filesystem errors carry the path that failed
    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", .path.display())]
    Encoding { path: PathBuf },
}

impl ConfigureError {
    /// Process exit status for this error: 1 for a rejected project name,
    /// 2 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigureError::ForbiddenName { .. } => 1,
            _ => 2,
        }
    }
}
