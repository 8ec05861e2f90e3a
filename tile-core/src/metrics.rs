//! The measuring side of the rendering backend.

pub use fonts::Face;

use crate::error::Result;
use crate::scene::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub face: Face,
    /// Font size in pixels.
    pub size: u32,
}

impl TextStyle {
    pub const fn new(face: Face, size: u32) -> Self {
        Self { face, size }
    }
}

/// Ink bounding box of a rendered string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

/// Measurements the layouts need from whatever draws the scene.
pub trait Metrics {
    fn text_extent(&self, text: &str, style: TextStyle) -> Result<TextExtent>;

    /// Width over height of the icon's source image.
    fn icon_aspect(&self, icon: Icon) -> f64;
}

/// Deterministic estimate: every character advances a fixed fraction of the
/// font size and every line has the same ink height.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMetrics {
    /// Advance per character, in sixtieths of the font size.
    pub advance_60ths: u32,
    /// Ink height, in sixtieths of the font size.
    pub height_60ths: u32,
    pub arrow_aspect: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_60ths: 36,
            height_60ths: 42,
            arrow_aspect: 2.5,
        }
    }
}

impl Metrics for MonospaceMetrics {
    fn text_extent(&self, text: &str, style: TextStyle) -> Result<TextExtent> {
        if text.is_empty() {
            return Ok(TextExtent::default());
        }
        let chars = text.chars().count() as u32;
        Ok(TextExtent {
            width: (chars * style.size * self.advance_60ths / 60) as i32,
            height: (style.size * self.height_60ths / 60) as i32,
        })
    }

    fn icon_aspect(&self, icon: Icon) -> f64 {
        match icon {
            Icon::Arrow => self.arrow_aspect,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_extent_scales_with_size() {
        let m = MonospaceMetrics::default();
        let e = m
            .text_extent("MESS", TextStyle::new(Face::EurostileExtendedBold, 56))
            .unwrap();
        assert_eq!(e, TextExtent { width: 134, height: 39 });
        let e = m
            .text_extent("", TextStyle::new(Face::TitilliumSemiBold, 37))
            .unwrap();
        assert_eq!(e, TextExtent::default());
    }
}
