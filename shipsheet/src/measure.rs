//! Text measurement through usvg, so the layouts see the same ink boxes the
//! rasterizer draws.

use tile_core::svg::{Assets, text_element};
use tile_core::{Icon, Metrics, Point, TextExtent, TextStyle};

use crate::resources::ResourceSet;

impl Metrics for ResourceSet {
    fn text_extent(&self, text: &str, style: TextStyle) -> tile_core::Result<TextExtent> {
        if text.trim().is_empty() {
            return Ok(TextExtent::default());
        }
        // Generous canvas: the bounding box is not clipped to it anyway.
        let width = style.size as usize * (text.chars().count() + 2);
        let height = style.size * 3;
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n{}</svg>\n",
            text_element(text, style, Point::new(0, 0), self.font(style.face))
        );

        let mut opt = usvg::Options::default();
        opt.fontdb = self.fonts.database();
        let tree = usvg::Tree::from_str(&svg, &opt)
            .map_err(|e| tile_core::Error::Measure(format!("{text:?}: {e}")))?;
        let root = tree.root();
        if !root.has_children() {
            // Nothing could be shaped, e.g. no font at all on this machine.
            return Ok(TextExtent::default());
        }
        let bbox = root.abs_bounding_box();
        Ok(TextExtent {
            width: bbox.width().ceil() as i32,
            height: bbox.height().ceil() as i32,
        })
    }

    fn icon_aspect(&self, icon: Icon) -> f64 {
        self.icons.get(icon).aspect()
    }
}
