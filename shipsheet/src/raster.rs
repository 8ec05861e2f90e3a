//! SVG to pixels, and pixels to files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tiny_skia::{Pixmap, Transform};
use usvg::fontdb::Database;

use crate::error::{Error, Result};

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Render `svg` at 1:1 onto a fresh `width` × `height` pixmap.
pub fn rasterize(svg: &str, fontdb: Arc<Database>, width: u32, height: u32) -> Result<Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb = fontdb;
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let mut pixmap = Pixmap::new(width, height).ok_or(Error::Pixmap { width, height })?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, Transform::identity(), &mut pm);
    Ok(pixmap)
}

fn straight_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let rgba = straight_rgba(pixmap);
    Ok(tile_core::encode_rgba_to_png_bytes(
        pixmap.width(),
        pixmap.height(),
        &rgba,
    )?)
}

/// Baseline JPEG of the pixmap with alpha dropped.
pub fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>> {
    let rgb: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()]
        })
        .collect();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).write_image(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

pub fn write_jpeg(pixmap: &Pixmap, path: &Path, quality: u8) -> Result<()> {
    let bytes = encode_jpeg(pixmap, quality)?;
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
