//! Layout of the A5 ship sheet.
//!
//! Every region is placed independently: the header, the command/control
//! corners, the reactor/mess stack, the shield box and the three system
//! columns. Columns accumulate their own heights and are not aligned.

use tracing::debug;

use crate::error::Result;
use crate::metrics::{Face, Metrics, TextStyle};
use crate::model::{Shields, Ship, System};
use crate::scene::{Element, Icon, Point, Scene};
use crate::tile::{REFERENCE_DPI, TileGeometry, TileLayoutEngine, cm_to_px, half};

pub const SHEET_WIDTH_CM: f64 = 21.0;
pub const SHEET_HEIGHT_CM: f64 = 14.8;

const TITLE_Y: i32 = 50;
const SUBTITLE_GAP: i32 = 20;
const CORNER_MARGIN: i32 = 20;

const BOX_HEIGHT: i32 = 300;
const BOX_MARGIN: i32 = 20;
const BOX_STROKE: u32 = 8;
const STACK_PADDING: i32 = 40;
const STACK_GAP: i32 = 20;

const SHIELD_ICON: i32 = 80;
const SHIELD_GAP: i32 = 4;
const SHIELD_LABEL_HEIGHT: i32 = 40;
const SHIELD_ROW_SHIFT: i32 = 10;

const COLUMNS_GAP_BELOW_SUBTITLE: i32 = 50;
const COLUMN_MARGIN: i32 = 8;
const SIDE_MARGIN: i32 = 16;
const COLUMN_LABEL_GAP: i32 = 20;
const COLUMN_LABELS: [&str; 3] = ["LEFT", "CENTER", "RIGHT"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetGeometry {
    pub width: u32,
    pub height: u32,
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub stats: TextStyle,
    pub column_label: TextStyle,
}

impl SheetGeometry {
    pub fn at_dpi(dpi: u32) -> Self {
        Self {
            width: cm_to_px(SHEET_WIDTH_CM, dpi),
            height: cm_to_px(SHEET_HEIGHT_CM, dpi),
            title: TextStyle::new(Face::EurostileExtendedBold, 48),
            subtitle: TextStyle::new(Face::TitilliumSemiBold, 36),
            stats: TextStyle::new(Face::EurostileExtendedBold, 36),
            column_label: TextStyle::new(Face::EurostileExtendedBold, 24),
        }
    }

    fn box_width(&self) -> i32 {
        self.width as i32 / 3 - BOX_MARGIN
    }

    fn column_width(&self) -> i32 {
        (self.width as i32 - 2 * SIDE_MARGIN - 2 * COLUMN_MARGIN) / 3
    }
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self::at_dpi(REFERENCE_DPI)
    }
}

/// The sheet scene plus the tile scenes its `Element::Tile`s refer to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub scene: Scene,
    pub tiles: Vec<Scene>,
}

/// Empty slots then one energy slot per group, groups left to right.
pub fn shield_run(groups: &[u32]) -> Vec<Icon> {
    groups
        .iter()
        .flat_map(|&n| {
            std::iter::repeat_n(Icon::ShieldSlot, n as usize).chain(std::iter::once(Icon::ShieldEnergy))
        })
        .collect()
}

pub struct SheetComposer<'a, M: Metrics + ?Sized> {
    geometry: &'a SheetGeometry,
    tiles: TileLayoutEngine<'a, M>,
    metrics: &'a M,
}

impl<'a, M: Metrics + ?Sized> SheetComposer<'a, M> {
    pub fn new(geometry: &'a SheetGeometry, tile_geometry: &'a TileGeometry, metrics: &'a M) -> Self {
        Self {
            geometry,
            tiles: TileLayoutEngine::new(tile_geometry, metrics),
            metrics,
        }
    }

    pub fn compose(&self, ship: &Ship) -> Result<SheetLayout> {
        let mut out = SheetLayout {
            scene: Scene::new(self.geometry.width, self.geometry.height),
            tiles: Vec::new(),
        };
        let columns_top = self.header(ship, &mut out.scene)?;
        self.reactor_and_mess(ship, &mut out)?;
        self.shields(&ship.shields, &mut out.scene)?;
        self.columns(ship, columns_top, &mut out)?;
        Ok(out)
    }

    fn text(&self, scene: &mut Scene, text: String, style: TextStyle, at: Point) {
        scene.push(Element::Text { text, style, at });
    }

    /// Title, subtitle and the command/control corners. Returns the y where
    /// the column block starts.
    fn header(&self, ship: &Ship, scene: &mut Scene) -> Result<i32> {
        let g = self.geometry;
        let width = g.width as i32;

        let title = ship.title.to_uppercase();
        let t = self.metrics.text_extent(&title, g.title)?;
        self.text(scene, title, g.title, Point::new(half(width - t.width), TITLE_Y));

        let subtitle_y = TITLE_Y + t.height + SUBTITLE_GAP;
        let s = self.metrics.text_extent(&ship.subtitle, g.subtitle)?;
        self.text(
            scene,
            ship.subtitle.clone(),
            g.subtitle,
            Point::new(half(width - s.width), subtitle_y),
        );

        let command = format!("COMMAND {}", ship.command);
        self.text(scene, command, g.stats, Point::new(CORNER_MARGIN, TITLE_Y));
        let control = format!("CONTROL {}", ship.control);
        let c = self.metrics.text_extent(&control, g.stats)?;
        self.text(
            scene,
            control,
            g.stats,
            Point::new(width - c.width - CORNER_MARGIN, TITLE_Y),
        );

        Ok(subtitle_y + s.height + COLUMNS_GAP_BELOW_SUBTITLE)
    }

    fn add_tile(&self, system: &System, out: &mut SheetLayout) -> Result<usize> {
        out.tiles.push(self.tiles.layout(system)?);
        Ok(out.tiles.len() - 1)
    }

    /// Mess stacked above reactor in the bottom-left, scaled together to the
    /// box width.
    fn reactor_and_mess(&self, ship: &Ship, out: &mut SheetLayout) -> Result<()> {
        let height = self.geometry.height as i32;
        let reactor = self.add_tile(&ship.reactor, out)?;
        let mess = self.add_tile(&ship.mess, out)?;
        let (rw, rh) = (out.tiles[reactor].width, out.tiles[reactor].height);
        let (mw, mh) = (out.tiles[mess].width, out.tiles[mess].height);

        let scale = (self.geometry.box_width() - STACK_PADDING) as f64 / rw.max(mw) as f64;
        let scaled = |v: u32| (v as f64 * scale) as u32;
        let (rw, rh, mw, mh) = (scaled(rw), scaled(rh), scaled(mw), scaled(mh));

        let reactor_y = height - rh as i32 - BOX_MARGIN;
        let mess_y = reactor_y - mh as i32 - STACK_GAP;
        out.scene.push(Element::Tile {
            index: mess,
            at: Point::new(BOX_MARGIN, mess_y),
            width: mw,
            height: mh,
        });
        out.scene.push(Element::Tile {
            index: reactor,
            at: Point::new(BOX_MARGIN, reactor_y),
            width: rw,
            height: rh,
        });
        Ok(())
    }

    fn shields(&self, shields: &Shields, scene: &mut Scene) -> Result<()> {
        let g = self.geometry;
        let box_width = g.box_width();
        let box_x = g.width as i32 - box_width - BOX_MARGIN;
        let box_y = g.height as i32 - BOX_HEIGHT - BOX_MARGIN;
        scene.push(Element::Rect {
            at: Point::new(box_x, box_y),
            width: box_width as u32,
            height: BOX_HEIGHT as u32,
            stroke: BOX_STROKE,
        });

        let group_height = SHIELD_LABEL_HEIGHT + SHIELD_ICON;
        let start_y = box_y + half(BOX_HEIGHT - 2 * group_height);
        self.shield_row(
            scene,
            "FRONT SHIELDS",
            &shields.front,
            box_x,
            start_y - SHIELD_ROW_SHIFT,
        )?;
        self.shield_row(
            scene,
            "REAR SHIELDS",
            &shields.rear,
            box_x,
            start_y + group_height + SHIELD_ROW_SHIFT,
        )
    }

    fn shield_row(
        &self,
        scene: &mut Scene,
        label: &str,
        groups: &[u32],
        box_x: i32,
        label_y: i32,
    ) -> Result<()> {
        let g = self.geometry;
        let box_width = g.box_width();
        let l = self.metrics.text_extent(label, g.stats)?;
        self.text(
            scene,
            label.to_string(),
            g.stats,
            Point::new(box_x + half(box_width - l.width), label_y),
        );

        let icons = shield_run(groups);
        let step = SHIELD_ICON + SHIELD_GAP;
        let run_width = icons.len() as i32 * step - SHIELD_GAP;
        let y = label_y + SHIELD_LABEL_HEIGHT;
        let mut x = box_x + half(box_width - run_width);
        for icon in icons {
            scene.push(Element::icon(icon, Point::new(x, y), SHIELD_ICON));
            x += step;
        }
        Ok(())
    }

    /// Left, core and right columns of tiles scaled to the column width.
    fn columns(&self, ship: &Ship, top: i32, out: &mut SheetLayout) -> Result<()> {
        let g = self.geometry;
        let column_width = g.column_width();
        let total = 3 * column_width + 2 * COLUMN_MARGIN;
        let start_x = half(g.width as i32 - total);

        let mut label_height = 0;
        for (i, label) in COLUMN_LABELS.iter().enumerate() {
            let l = self.metrics.text_extent(label, g.column_label)?;
            let x = start_x + i as i32 * (column_width + COLUMN_MARGIN) + half(column_width - l.width);
            self.text(&mut out.scene, label.to_string(), g.column_label, Point::new(x, top));
            label_height = label_height.max(l.height);
        }
        let tiles_top = top + label_height + COLUMN_LABEL_GAP;

        let sections = [
            &ship.sections.left,
            &ship.sections.core,
            &ship.sections.right,
        ];
        for (i, systems) in sections.into_iter().enumerate() {
            let x = start_x + i as i32 * (column_width + COLUMN_MARGIN);
            let mut y = tiles_top;
            for system in systems {
                let index = self.add_tile(system, out)?;
                let tile = &out.tiles[index];
                let height = (tile.height as f64 * column_width as f64 / tile.width as f64) as u32;
                out.scene.push(Element::Tile {
                    index,
                    at: Point::new(x, y),
                    width: column_width as u32,
                    height,
                });
                y += height as i32 + COLUMN_MARGIN;
            }
            debug!(column = COLUMN_LABELS[i], bottom = y, "column laid out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sheet_geometry() {
        let g = SheetGeometry::default();
        assert_eq!((g.width, g.height), (2480, 1748));
        assert_eq!(g.box_width(), 806);
        assert_eq!(g.column_width(), 810);
    }

    #[test]
    fn shield_run_groups() {
        use Icon::{ShieldEnergy as E, ShieldSlot as S};
        assert_eq!(shield_run(&[1, 0, 2]), vec![S, E, E, S, S, E]);
        assert_eq!(shield_run(&[0, 0]), vec![E, E]);
        assert!(shield_run(&[]).is_empty());
    }
}
