//! From JSON documents to JPEG files.

use std::fs;
use std::path::{Path, PathBuf};

use tile_core::model::{CoresFile, MessHallsFile, SystemsFile, load_json};
use tile_core::{
    Scene, SheetComposer, SheetGeometry, Ship, System, TileGeometry, TileLayoutEngine,
    scene_to_svg, slug,
};
use tiny_skia::Pixmap;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::raster;
use crate::resources::ResourceSet;
use crate::settings::Settings;

/// Lays out and rasterizes tiles and sheets against one resource set.
pub struct Renderer<'a> {
    resources: &'a ResourceSet,
    tile: TileGeometry,
    sheet: SheetGeometry,
}

impl<'a> Renderer<'a> {
    pub fn new(resources: &'a ResourceSet) -> Self {
        Self {
            resources,
            tile: TileGeometry::default(),
            sheet: SheetGeometry::default(),
        }
    }

    fn draw(&self, scene: &Scene, tile_hrefs: &[String]) -> Result<Pixmap> {
        let svg = scene_to_svg(scene, self.resources, tile_hrefs)?;
        raster::rasterize(
            &svg,
            self.resources.fonts.database(),
            scene.width,
            scene.height,
        )
    }

    pub fn render_tile(&self, system: &System) -> Result<Pixmap> {
        let scene = TileLayoutEngine::new(&self.tile, self.resources).layout(system)?;
        self.draw(&scene, &[])
    }

    /// Tiles are rasterized on their own first and pasted into the sheet
    /// scaled, so they match the standalone tile images.
    pub fn render_sheet(&self, ship: &Ship) -> Result<Pixmap> {
        let layout = SheetComposer::new(&self.sheet, &self.tile, self.resources).compose(ship)?;
        let hrefs = layout
            .tiles
            .iter()
            .map(|tile| {
                let pixmap = self.draw(tile, &[])?;
                Ok(raster::png_data_url(&raster::encode_png(&pixmap)?))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(tiles = hrefs.len(), "sheet tiles rasterized");
        self.draw(&layout.scene, &hrefs)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Render every system, core and mess hall into `settings.tile_dir`.
pub fn render_tile_batch(settings: &Settings, renderer: &Renderer<'_>) -> Result<Vec<PathBuf>> {
    let systems: SystemsFile = load_json(&settings.systems)?;
    let cores: CoresFile = load_json(&settings.cores)?;
    let mess: MessHallsFile = load_json(&settings.mess_halls)?;

    // Resolve every name up front so a bad rules string fails before any
    // file is written.
    let mut jobs: Vec<(&System, String)> = Vec::new();
    for system in &systems.systems {
        jobs.push((system, slug::system_file_name(system)));
    }
    for core in &cores.cores {
        jobs.push((core, slug::core_file_name(core)?));
    }
    for hall in &mess.mess_halls {
        jobs.push((hall, slug::mess_file_name(hall)?));
    }

    ensure_dir(&settings.tile_dir)?;
    let mut written = Vec::with_capacity(jobs.len());
    for (system, name) in jobs {
        let pixmap = renderer.render_tile(system)?;
        let path = settings.tile_dir.join(name);
        raster::write_jpeg(&pixmap, &path, settings.jpeg_quality)?;
        info!("Generated system image: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Render the ship sheet into `settings.sheet_dir`.
pub fn render_ship_sheet(settings: &Settings, renderer: &Renderer<'_>) -> Result<PathBuf> {
    let ship: Ship = load_json(&settings.ship)?;
    let pixmap = renderer.render_sheet(&ship)?;
    ensure_dir(&settings.sheet_dir)?;
    let path = settings.sheet_dir.join(slug::sheet_file_name(&ship.title));
    raster::write_jpeg(&pixmap, &path, settings.jpeg_quality)?;
    info!("Generated ship sheet: {}", path.display());
    Ok(path)
}
