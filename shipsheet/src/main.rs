use anyhow::{Context, Result};
use shipsheet::{Renderer, ResourceSet, Settings, logging, render_ship_sheet};

fn main() -> Result<()> {
    logging::init();

    let settings = Settings::load().context("loading settings")?;
    let resources = ResourceSet::load(&settings).context("loading fonts and icons")?;
    let renderer = Renderer::new(&resources);
    render_ship_sheet(&settings, &renderer)
        .with_context(|| format!("rendering ship sheet from {}", settings.ship.display()))?;
    Ok(())
}
