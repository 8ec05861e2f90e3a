//! Scene to SVG document.
//!
//! The output is handed to usvg with the font database of the run, so family
//! names here must match what the database reports.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::metrics::{Face, TextStyle};
use crate::scene::{Element, Icon, Point, Scene};

/// How a face is named inside the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontRef<'a> {
    pub family: &'a str,
    pub weight: u16,
}

/// Fonts and images a scene refers to.
pub trait Assets {
    fn font(&self, face: Face) -> FontRef<'_>;

    /// `xlink:href` for the icon, usually a data URL.
    fn icon_href(&self, icon: Icon) -> &str;
}

pub(crate) fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn family_attr(family: &str) -> String {
    match family {
        "serif" | "sans-serif" | "monospace" | "cursive" | "fantasy" => family.to_string(),
        _ => format!("'{}'", svg_escape(family).replace('\'', "&apos;")),
    }
}

/// A `<text>` whose ink box top-left sits at `at`.
pub fn text_element(text: &str, style: TextStyle, at: Point, font: FontRef<'_>) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-weight=\"{}\" font-size=\"{}\" fill=\"#000000\" dominant-baseline=\"text-before-edge\" xml:space=\"preserve\">{}</text>\n",
        at.x,
        at.y,
        family_attr(font.family),
        font.weight,
        style.size,
        svg_escape(text)
    )
}

fn path_from_points(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut out = format!("<path d=\"M {} {}", first.x, first.y);
    for p in rest {
        let _ = write!(out, " L {} {}", p.x, p.y);
    }
    out.push_str(" Z\" fill=\"#000000\" stroke=\"none\"/>\n");
    out
}

fn image_element(href: &str, at: Point, width: u32, height: u32) -> String {
    format!(
        "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" xlink:href=\"{}\"/>\n",
        at.x, at.y, width, height, href
    )
}

/// Serialize `scene`. `tile_hrefs[i]` is the image for `Element::Tile` index
/// `i`.
pub fn scene_to_svg(scene: &Scene, assets: &impl Assets, tile_hrefs: &[String]) -> Result<String> {
    let (w, h) = (scene.width, scene.height);
    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        s,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    for element in &scene.elements {
        match element {
            Element::Text { text, style, at } => {
                s.push_str(&text_element(text, *style, *at, assets.font(style.face)));
            }
            Element::RotatedText {
                text,
                style,
                at,
                extent,
                padding,
            } => {
                // Rotating 90° clockwise about the origin puts the ink box to
                // the left of x, so shift by the unrotated height.
                let _ = writeln!(
                    s,
                    "<g transform=\"translate({} {}) rotate(90)\">",
                    at.x + padding + extent.height,
                    at.y + padding
                );
                s.push_str(&text_element(
                    text,
                    *style,
                    Point::new(0, 0),
                    assets.font(style.face),
                ));
                s.push_str("</g>\n");
            }
            Element::Icon {
                icon,
                at,
                width,
                height,
            } => s.push_str(&image_element(assets.icon_href(*icon), *at, *width, *height)),
            Element::Line { from, to, width } => {
                let _ = writeln!(
                    s,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#000000\" stroke-width=\"{}\"/>",
                    from.x, from.y, to.x, to.y, width
                );
            }
            Element::Rect {
                at,
                width,
                height,
                stroke,
            } => {
                let inset = *stroke as f64 / 2.0;
                let _ = writeln!(
                    s,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"#000000\" stroke-width=\"{}\"/>",
                    at.x as f64 + inset,
                    at.y as f64 + inset,
                    (*width as f64 - *stroke as f64).max(0.0),
                    (*height as f64 - *stroke as f64).max(0.0),
                    stroke
                );
            }
            Element::Polygon { points } => s.push_str(&path_from_points(points)),
            Element::Tile {
                index,
                at,
                width,
                height,
            } => {
                let href = tile_hrefs.get(*index).ok_or(Error::MissingTile {
                    index: *index,
                    available: tile_hrefs.len(),
                })?;
                s.push_str(&image_element(href, *at, *width, *height));
            }
        }
    }
    s.push_str("</svg>\n");
    Ok(s)
}
