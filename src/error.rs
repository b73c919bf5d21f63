//! Error type shared by every extraction component.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination exists and overwriting is disabled.
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read zip archive {}: {source}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to parse recipe {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid recipe for '{game}': {reason}")]
    Recipe { game: String, reason: String },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("failed to write tag to {}: {source}", path.display())]
    Tag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("failed to locate a Steam library: {0}")]
    Steam(String),

    #[error("unknown game '{0}'")]
    UnknownGame(String),

    #[error("game '{game}' has no helper named '{helper}'")]
    MissingHelper { game: String, helper: String },

    #[error("no assets were extracted from {}", .0.display())]
    NoAssetsExtracted(PathBuf),

    #[error("{0}")]
    Config(String),
}

impl ExtractError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
