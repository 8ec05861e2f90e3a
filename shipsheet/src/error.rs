use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] tile_core::Error),

    #[error("failed to read icon {path}: {source}")]
    IconRead { path: PathBuf, source: io::Error },

    #[error("icon {path} is not a valid PNG: {source}")]
    IconDecode {
        path: PathBuf,
        source: png::DecodingError,
    },

    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),

    #[error("pixmap alloc failed for {width}x{height}")]
    Pixmap { width: u32, height: u32 },

    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),
}
