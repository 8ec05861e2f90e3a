//! Display list produced by the layouts.
//!
//! Coordinates are integer pixels, y down, relative to the scene's top-left.
//! Elements are drawn in order, so later elements cover earlier ones.

use crate::metrics::{TextExtent, TextStyle};

/// Raster icons shipped in the resources directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Icon {
    Energy,
    EnergyLarge,
    Crew,
    MedBay,
    Hull,
    Electronics,
    LifeSupport,
    Arrow,
    ShieldSlot,
    ShieldEnergy,
}

impl Icon {
    pub const ALL: [Icon; 10] = [
        Icon::Energy,
        Icon::EnergyLarge,
        Icon::Crew,
        Icon::MedBay,
        Icon::Hull,
        Icon::Electronics,
        Icon::LifeSupport,
        Icon::Arrow,
        Icon::ShieldSlot,
        Icon::ShieldEnergy,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Icon::Energy => "energy_symbol.png",
            Icon::EnergyLarge => "energy_symbol_large.png",
            Icon::Crew => "crew_symbol.png",
            Icon::MedBay => "med_bay_symbol.png",
            Icon::Hull => "hull_icon.png",
            Icon::Electronics => "electric_icon.png",
            Icon::LifeSupport => "life_support_icon.png",
            Icon::Arrow => "arrow_symbol.png",
            Icon::ShieldSlot => "shield_slot.png",
            Icon::ShieldEnergy => "shield_slot_energy.png",
        }
    }

    /// Position in [`Icon::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// Text whose em box top-left is `at`; the ink starts a little lower.
    Text {
        text: String,
        style: TextStyle,
        at: Point,
    },
    /// Text turned 90° clockwise inside a padded box whose top-left is `at`.
    /// `extent` is the unrotated measurement.
    RotatedText {
        text: String,
        style: TextStyle,
        at: Point,
        extent: TextExtent,
        padding: i32,
    },
    /// Icon scaled to `width` × `height`, alpha composited.
    Icon {
        icon: Icon,
        at: Point,
        width: u32,
        height: u32,
    },
    Line {
        from: Point,
        to: Point,
        width: u32,
    },
    /// Outline drawn inside the box.
    Rect {
        at: Point,
        width: u32,
        height: u32,
        stroke: u32,
    },
    /// Filled black polygon.
    Polygon { points: Vec<Point> },
    /// A previously rendered tile, by index into the tiles that accompany
    /// the scene, scaled to `width` × `height`.
    Tile {
        index: usize,
        at: Point,
        width: u32,
        height: u32,
    },
}

impl Element {
    pub fn icon(icon: Icon, at: Point, size: i32) -> Self {
        Element::Icon {
            icon,
            at,
            width: size as u32,
            height: size as u32,
        }
    }

    /// Same element moved by (`dx`, `dy`).
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        match self {
            Element::Text { text, style, at } => Element::Text {
                text,
                style,
                at: at.offset(dx, dy),
            },
            Element::RotatedText {
                text,
                style,
                at,
                extent,
                padding,
            } => Element::RotatedText {
                text,
                style,
                at: at.offset(dx, dy),
                extent,
                padding,
            },
            Element::Icon {
                icon,
                at,
                width,
                height,
            } => Element::Icon {
                icon,
                at: at.offset(dx, dy),
                width,
                height,
            },
            Element::Line { from, to, width } => Element::Line {
                from: from.offset(dx, dy),
                to: to.offset(dx, dy),
                width,
            },
            Element::Rect {
                at,
                width,
                height,
                stroke,
            } => Element::Rect {
                at: at.offset(dx, dy),
                width,
                height,
                stroke,
            },
            Element::Polygon { points } => Element::Polygon {
                points: points.into_iter().map(|p| p.offset(dx, dy)).collect(),
            },
            Element::Tile {
                index,
                at,
                width,
                height,
            } => Element::Tile {
                index,
                at: at.offset(dx, dy),
                width,
                height,
            },
        }
    }
}

/// A white canvas of fixed size and the elements drawn on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Icons in drawing order with their top-left corners.
    pub fn icons(&self) -> impl Iterator<Item = (Icon, Point)> + '_ {
        self.elements.iter().filter_map(|e| match e {
            Element::Icon { icon, at, .. } => Some((*icon, *at)),
            _ => None,
        })
    }

    /// Upright and rotated texts in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, at, .. } | Element::RotatedText { text, at, .. } => {
                Some((text.as_str(), *at))
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Face;

    #[test]
    fn icon_index_matches_all() {
        for (i, icon) in Icon::ALL.iter().enumerate() {
            assert_eq!(icon.index(), i);
        }
    }

    #[test]
    fn offset_moves_every_point() {
        let p = Element::Polygon {
            points: vec![Point::new(0, 0), Point::new(10, 5)],
        }
        .offset(3, -2);
        assert_eq!(
            p,
            Element::Polygon {
                points: vec![Point::new(3, -2), Point::new(13, 3)]
            }
        );
        let t = Element::Text {
            text: "A".into(),
            style: TextStyle::new(Face::TitilliumSemiBold, 10),
            at: Point::new(1, 1),
        }
        .offset(0, 10);
        let mut s = Scene::new(10, 10);
        s.push(t);
        assert_eq!(s.texts().collect::<Vec<_>>(), vec![("A", Point::new(1, 11))]);
    }
}
