//! Rendering backend and pipelines for ship sheets and system tiles.
//!
//! Layout lives in `tile_core`; this crate measures text with usvg,
//! rasterizes with resvg and writes JPEG files.

pub mod error;
pub mod logging;
pub mod measure;
pub mod pipeline;
pub mod raster;
pub mod resources;
pub mod settings;

pub use error::{Error, Result};
pub use pipeline::{Renderer, render_ship_sheet, render_tile_batch};
pub use resources::{IconSet, ResourceSet};
pub use settings::Settings;
