//! Layout of a single system tile.
//!
//! The tile width is fixed; the height is whatever the content needs. A
//! running cursor starts at the top margin and every block advances it.
//! Pixel constants are at the 300 DPI reference resolution.

use tracing::{debug, warn};

use crate::error::Result;
use crate::metrics::{Face, Metrics, TextStyle};
use crate::model::{Area, Cost, Shoot, System, SystemKind};
use crate::scene::{Element, Icon, Point, Scene};
use crate::text;

pub const REFERENCE_DPI: u32 = 300;
pub const TILE_WIDTH_CM: f64 = 8.0;
pub const TILE_HEIGHT_CM: f64 = 4.0;

const ICON: i32 = 60;
const LARGE_ICON: i32 = 120;
const ICON_GAP: i32 = 10;
/// Cost grids hold at most two rows of two.
const MAX_GRID_ICONS: usize = 4;
const COST_BLOCK_WIDTH: i32 = ICON * 2 + ICON_GAP;
const COST_COLUMN: i32 = 150;
const COLUMN_GAP: i32 = 20;
const WEAPON_SLOT: i32 = 150;
const WEAPON_HEIGHT: i32 = 60;

const MIN_AREA_HEIGHT: i32 = 100;
const SINGLE_AREA_HEIGHT: i32 = 120;
const MIN_SYSTEM_HEIGHT: i32 = 100;

const REACTOR_BAND: i32 = 150;
const REACTOR_GAP: i32 = 20;

const MESS_BAND: i32 = 200;
const MED_BAY_SPLIT: f64 = 0.7;
const MED_BAY_INSET: i32 = 20;
const MED_BAY_NUDGE: i32 = 50;
const MED_BAY_LABEL: &str = "MED BAY";
const MED_BAY_LABEL_PADDING: i32 = 10;
const MED_BAY_LABEL_DROP: i32 = 24;

const BADGE_PADDING: i32 = 10;
const BADGE_SLOPE: f64 = 0.577;

const DIVIDER_STROKE: u32 = 2;
const BORDER_STROKE: u32 = 8;

pub fn cm_to_px(cm: f64, dpi: u32) -> u32 {
    (cm * dpi as f64 / 2.54).round() as u32
}

// Floor halving so overwide text goes negative symmetrically.
pub(crate) fn half(v: i32) -> i32 {
    v.div_euclid(2)
}

/// Margins and type sizes of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGeometry {
    pub width: u32,
    pub top_margin: i32,
    pub side_margin: i32,
    pub spacing: i32,
    pub area_margin: i32,
    pub title: TextStyle,
    pub rules: TextStyle,
    /// Weapon damage and range numbers.
    pub area_title: TextStyle,
    pub description: TextStyle,
}

impl TileGeometry {
    pub fn at_dpi(dpi: u32) -> Self {
        let width = cm_to_px(TILE_WIDTH_CM, dpi);
        let height = cm_to_px(TILE_HEIGHT_CM, dpi);
        let w = width as f64;
        let h = height as f64;
        let size = |ratio: f64| (w * ratio) as u32;
        Self {
            width,
            top_margin: (h * 0.02) as i32,
            side_margin: (w * 0.02) as i32,
            spacing: (h * 0.01) as i32,
            area_margin: (h * 0.02) as i32,
            title: TextStyle::new(Face::EurostileExtendedBold, size(0.06)),
            rules: TextStyle::new(Face::TitilliumSemiBold, size(0.05)),
            area_title: TextStyle::new(Face::EurostileExtendedBold, size(0.04)),
            description: TextStyle::new(Face::TitilliumSemiBold, size(0.04)),
        }
    }

    fn med_bay_label(&self) -> TextStyle {
        TextStyle::new(
            Face::EurostileExtendedBold,
            (self.area_title.size as f64 * 0.75) as u32,
        )
    }

    fn content_x(&self) -> i32 {
        self.side_margin + COST_COLUMN + COLUMN_GAP
    }

    fn content_width(&self) -> i32 {
        self.width as i32 - 2 * self.side_margin - COST_COLUMN - COLUMN_GAP
    }
}

impl Default for TileGeometry {
    fn default() -> Self {
        Self::at_dpi(REFERENCE_DPI)
    }
}

/// Energy icons first, then crew, capped at the grid size.
pub fn cost_icons(cost: Cost) -> Vec<Icon> {
    let total = cost.energy as u64 + cost.crew as u64;
    if total > MAX_GRID_ICONS as u64 {
        warn!(
            energy = cost.energy,
            crew = cost.crew,
            "cost has more than {MAX_GRID_ICONS} icons, extra icons are not drawn"
        );
    }
    std::iter::repeat_n(Icon::Energy, cost.energy as usize)
        .chain(std::iter::repeat_n(Icon::Crew, cost.crew as usize))
        .take(MAX_GRID_ICONS)
        .collect()
}

/// Height of a two-column icon grid.
pub fn grid_height(count: usize) -> i32 {
    let rows = count.div_ceil(2) as i32;
    if rows == 0 {
        0
    } else {
        rows * ICON + (rows - 1) * ICON_GAP
    }
}

// A block laid out at y = 0, placed later once the area height is known.
struct Block {
    height: i32,
    elements: Vec<Element>,
}

impl Block {
    fn place(self, top: i32, out: &mut Vec<Element>) {
        out.extend(self.elements.into_iter().map(|e| e.offset(0, top)));
    }
}

/// Computes tile scenes from systems.
pub struct TileLayoutEngine<'a, M: Metrics + ?Sized> {
    geometry: &'a TileGeometry,
    metrics: &'a M,
}

impl<'a, M: Metrics + ?Sized> TileLayoutEngine<'a, M> {
    pub fn new(geometry: &'a TileGeometry, metrics: &'a M) -> Self {
        Self { geometry, metrics }
    }

    pub fn geometry(&self) -> &TileGeometry {
        self.geometry
    }

    /// Lay out `system` on a tile of fixed width and derived height.
    pub fn layout(&self, system: &System) -> Result<Scene> {
        let g = self.geometry;
        let width = g.width as i32;
        let effective_width = if system.med_bay_count() > 0 {
            (width as f64 * MED_BAY_SPLIT) as i32
        } else {
            width
        };

        let mut body = Vec::new();
        // Title and rules go on top of the border.
        let mut headings = Vec::new();
        let mut y = g.top_margin;

        let title = system.name.to_uppercase();
        let extent = self.metrics.text_extent(&title, g.title)?;
        headings.push(Element::Text {
            text: title,
            style: g.title,
            at: Point::new(half(effective_width - extent.width), y),
        });
        y += extent.height + g.spacing;

        if let Some(rules) = system.rules.as_deref() {
            let rules = text::normalize(rules);
            let extent = self.metrics.text_extent(&rules, g.rules)?;
            headings.push(Element::Text {
                text: rules,
                style: g.rules,
                at: Point::new(half(effective_width - extent.width), y),
            });
            y += extent.height + g.spacing;
        }

        y = match system.kind {
            SystemKind::Reactor => self.reactor_band(system, y, &mut body),
            SystemKind::Mess => self.mess_band(system, y, &mut body)?,
            SystemKind::Generic => y,
        };

        if !system.areas.is_empty() {
            y = self.areas(&system.areas, y, &mut body)?;
        } else if !system.kind.has_band() {
            y += MIN_SYSTEM_HEIGHT;
        }

        self.status_badge(system, y, &mut body);

        let height = y.max(1) as u32;
        debug!(system = %system.name, height, "tile laid out");
        let mut scene = Scene::new(g.width, height);
        scene.elements = body;
        scene.push(Element::Rect {
            at: Point::new(0, 0),
            width: g.width,
            height,
            stroke: BORDER_STROKE,
        });
        scene.elements.extend(headings);
        Ok(scene)
    }

    fn reactor_band(&self, system: &System, top: i32, out: &mut Vec<Element>) -> i32 {
        if let Some(count) = system.circles {
            let count = count as i32;
            let total = count * LARGE_ICON + (count - 1).max(0) * REACTOR_GAP;
            let start_x = half(self.geometry.width as i32 - total);
            let icon_y = top + half(REACTOR_BAND - LARGE_ICON);
            for i in 0..count {
                out.push(Element::icon(
                    Icon::EnergyLarge,
                    Point::new(start_x + i * (LARGE_ICON + REACTOR_GAP), icon_y),
                    LARGE_ICON,
                ));
            }
        }
        top + REACTOR_BAND + self.geometry.spacing
    }

    fn mess_band(&self, system: &System, top: i32, out: &mut Vec<Element>) -> Result<i32> {
        let bottom = top + MESS_BAND;
        let count = system.med_bay_count() as i32;
        if count == 0 {
            return Ok(bottom);
        }
        let width = self.geometry.width as i32;
        let divider_x = (width as f64 * MED_BAY_SPLIT) as i32;
        let panel_width = width - divider_x;
        out.push(Element::Line {
            from: Point::new(divider_x, MED_BAY_INSET),
            to: Point::new(divider_x, bottom - MED_BAY_INSET),
            width: DIVIDER_STROKE,
        });

        // The panel runs the full height of the tile so far.
        let stack = count * LARGE_ICON + (count - 1) * ICON_GAP;
        let x = divider_x + half(panel_width - LARGE_ICON) - MED_BAY_NUDGE;
        let start_y = half(bottom) - half(stack);
        for i in 0..count {
            out.push(Element::icon(
                Icon::MedBay,
                Point::new(x, start_y + i * (LARGE_ICON + ICON_GAP)),
                LARGE_ICON,
            ));
        }

        let style = self.geometry.med_bay_label();
        let extent = self.metrics.text_extent(MED_BAY_LABEL, style)?;
        let box_width = extent.height + 2 * MED_BAY_LABEL_PADDING;
        let box_height = extent.width + 2 * MED_BAY_LABEL_PADDING;
        out.push(Element::RotatedText {
            text: MED_BAY_LABEL.to_string(),
            style,
            at: Point::new(
                divider_x + panel_width - box_width,
                top - half(box_height) + MED_BAY_LABEL_DROP,
            ),
            extent,
            padding: MED_BAY_LABEL_PADDING,
        });
        Ok(bottom)
    }

    fn areas(&self, areas: &[Area], top: i32, out: &mut Vec<Element>) -> Result<i32> {
        let g = self.geometry;
        let width = g.width as f64;
        let single = areas.len() == 1;
        let mut y = top + g.area_margin;
        for (idx, area) in areas.iter().enumerate() {
            if idx > 0 {
                let divider_y = y + g.spacing;
                let span = width * 0.5;
                let x0 = ((width - span) / 2.0).floor();
                out.push(Element::Line {
                    from: Point::new(x0 as i32, divider_y),
                    to: Point::new((x0 + span) as i32, divider_y),
                    width: DIVIDER_STROKE,
                });
                y = divider_y + g.spacing;
            }

            let cost = cost_block(area.cost, g.side_margin);
            let content = self.content_block(area)?;
            let mut total = MIN_AREA_HEIGHT.max(cost.height).max(content.height);
            if single {
                total = total.max(SINGLE_AREA_HEIGHT);
            }
            let cost_top = y + half(total - cost.height);
            let content_top = y + half(total - content.height);
            cost.place(cost_top, out);
            content.place(content_top, out);
            y += total + g.spacing;
        }
        Ok(y + g.area_margin)
    }

    fn content_block(&self, area: &Area) -> Result<Block> {
        let g = self.geometry;
        let content_x = g.content_x();
        let mut height = 0;
        let mut elements = Vec::new();

        if let Some(shoot) = area.shoot {
            elements.extend(self.weapon_glyph(shoot, content_x)?);
            height = WEAPON_HEIGHT;
        }

        let description = text::normalize(&area.description);
        if !description.is_empty() {
            let style = g.description;
            let x = if area.shoot.is_some() {
                content_x + WEAPON_SLOT + COLUMN_GAP
            } else {
                content_x
            };
            let max_width = content_x + g.content_width() - x;
            let lines = text::wrap(&description, style, max_width, self.metrics)?;
            let first = match lines.first() {
                Some(line) => self.metrics.text_extent(line, style)?.height,
                None => 0,
            };
            let pitch = text::line_pitch(style);
            let text_height = first + (lines.len().max(1) as i32 - 1) * pitch;
            let (text_y, block_height) = if area.shoot.is_some() {
                (0, text_height)
            } else {
                let block = WEAPON_HEIGHT.max(text_height);
                (half(block - text_height) - style.size as i32 / 4, block)
            };
            for (i, line) in lines.into_iter().enumerate() {
                elements.push(Element::Text {
                    text: line,
                    style,
                    at: Point::new(x, text_y + i as i32 * pitch),
                });
            }
            height = height.max(block_height);
        }

        Ok(Block { height, elements })
    }

    /// Arrow glyph 60px tall with damage in its first quarter and range in
    /// its third.
    fn weapon_glyph(&self, shoot: Shoot, x: i32) -> Result<Vec<Element>> {
        let style = self.geometry.area_title;
        let arrow_width = (WEAPON_HEIGHT as f64 * self.metrics.icon_aspect(Icon::Arrow)) as i32;
        let quarter = arrow_width as f64 / 4.0;

        let damage = shoot.damage.to_string();
        let d = self.metrics.text_extent(&damage, style)?;
        let damage_x = ((quarter - d.width as f64) / 2.0).floor() as i32 + 15;
        let damage_y = half(WEAPON_HEIGHT - d.height) - 5;

        let range = shoot.range.to_string();
        let r = self.metrics.text_extent(&range, style)?;
        let range_x = (arrow_width as f64 / 2.0 + ((quarter - r.width as f64) / 2.0).floor()) as i32 + 5;
        let range_y = half(WEAPON_HEIGHT - r.height) - 5;

        Ok(vec![
            Element::Icon {
                icon: Icon::Arrow,
                at: Point::new(x, 0),
                width: arrow_width.max(1) as u32,
                height: WEAPON_HEIGHT as u32,
            },
            Element::Text {
                text: damage,
                style,
                at: Point::new(x + damage_x, damage_y),
            },
            Element::Text {
                text: range,
                style,
                at: Point::new(x + range_x, range_y),
            },
        ])
    }

    /// Black badge in the bottom-right corner holding the status icons. It
    /// overlays the last band and does not move the cursor.
    fn status_badge(&self, system: &System, bottom: i32, out: &mut Vec<Element>) {
        let icons: Vec<Icon> = [
            (system.hull, Icon::Hull),
            (system.electronics, Icon::Electronics),
            (system.life_support, Icon::LifeSupport),
        ]
        .into_iter()
        .filter_map(|(on, icon)| on.then_some(icon))
        .collect();
        if icons.is_empty() {
            return;
        }

        let n = icons.len() as i32;
        let row = n * ICON + (n - 1) * ICON_GAP;
        let badge_width = row + 2 * BADGE_PADDING;
        let badge_height = ICON + 2 * BADGE_PADDING;
        let x = self.geometry.width as i32 - badge_width;
        let top = bottom - badge_height;
        let slope = (badge_height as f64 * BADGE_SLOPE) as i32;

        out.push(Element::Polygon {
            points: vec![
                Point::new(x, top),
                Point::new(x + badge_width, top),
                Point::new(x + badge_width, top + badge_height),
                Point::new(x - slope, top + badge_height),
            ],
        });
        for (i, icon) in icons.into_iter().enumerate() {
            out.push(Element::icon(
                icon,
                Point::new(x + BADGE_PADDING + i as i32 * (ICON + ICON_GAP), top + BADGE_PADDING),
                ICON,
            ));
        }
    }
}

fn cost_block(cost: Cost, left: i32) -> Block {
    let icons = cost_icons(cost);
    let height = grid_height(icons.len());
    let mut elements = Vec::with_capacity(icons.len());
    for (row, pair) in icons.chunks(2).enumerate() {
        let y = row as i32 * (ICON + ICON_GAP);
        if let [a, b] = pair {
            elements.push(Element::icon(*a, Point::new(left, y), ICON));
            elements.push(Element::icon(*b, Point::new(left + ICON + ICON_GAP, y), ICON));
        } else {
            for icon in pair {
                let x = left + half(COST_BLOCK_WIDTH - ICON);
                elements.push(Element::icon(*icon, Point::new(x, y), ICON));
            }
        }
    }
    Block { height, elements }
}
