//! Layout engine for ship sheets and system tiles.
//!
//! Everything here is pure arithmetic over a [`Metrics`] implementation:
//! layouts produce [`Scene`]s, which serialize to SVG for whatever
//! rasterizer the caller uses.

pub mod error;
pub mod metrics;
pub mod model;
pub mod scene;
pub mod sheet;
pub mod slug;
pub mod svg;
pub mod text;
pub mod tile;

use png::{BitDepth, ColorType, Encoder};

pub use error::{Error, Result};
pub use metrics::{Face, Metrics, MonospaceMetrics, TextExtent, TextStyle};
pub use model::{Area, Cost, Ship, Shoot, System, SystemKind};
pub use scene::{Element, Icon, Point, Scene};
pub use sheet::{SheetComposer, SheetGeometry, SheetLayout};
pub use svg::{Assets, FontRef, scene_to_svg};
pub use tile::{TileGeometry, TileLayoutEngine};

// Shared PNG encoder: RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_bytes_are_deterministic() {
        let rgba = [255u8, 0, 0, 255, 0, 0, 255, 128];
        let a = encode_rgba_to_png_bytes(2, 1, &rgba).unwrap();
        let b = encode_rgba_to_png_bytes(2, 1, &rgba).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(encode_rgba_to_png_bytes(4, 4, &[0u8; 8]).is_err());
    }
}
