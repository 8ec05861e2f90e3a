use anyhow::{Context, Result};
use shipsheet::{Renderer, ResourceSet, Settings, logging, render_tile_batch};
use tracing::info;

fn main() -> Result<()> {
    logging::init();

    let settings = Settings::load().context("loading settings")?;
    let resources = ResourceSet::load(&settings).context("loading fonts and icons")?;
    let renderer = Renderer::new(&resources);
    let written = render_tile_batch(&settings, &renderer).context("rendering system tiles")?;
    info!("{} tiles written to {}", written.len(), settings.tile_dir.display());
    Ok(())
}
