//! Error types for layout and scene serialization

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tile-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An input document could not be read
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// An input document is not valid for its schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Output names of cores and mess halls need a `": "` token in the rules
    #[error("rules of `{name}` have no token after \": \"")]
    MissingRulesToken { name: String },

    #[error("core `{name}` has no circle count")]
    MissingCircles { name: String },

    /// The rendering backend could not measure a string
    #[error("text measurement failed: {0}")]
    Measure(String),

    #[error("scene references tile {index} but only {available} tiles were rendered")]
    MissingTile { index: usize, available: usize },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
