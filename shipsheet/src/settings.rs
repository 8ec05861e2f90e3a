//! Run settings: built-in defaults, then `shipsheet.toml` if present, then
//! `SHIPSHEET_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const SETTINGS_FILE: &str = "shipsheet.toml";
const ENV_PREFIX: &str = "SHIPSHEET";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ship: PathBuf,
    pub systems: PathBuf,
    pub cores: PathBuf,
    pub mess_halls: PathBuf,
    /// Where tile images are written.
    pub tile_dir: PathBuf,
    /// Where the ship sheet is written.
    pub sheet_dir: PathBuf,
    pub font_dir: PathBuf,
    pub icon_dir: PathBuf,
    pub jpeg_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ship: "ship.json".into(),
            systems: "systems.json".into(),
            cores: "cores.json".into(),
            mess_halls: "mess.json".into(),
            tile_dir: "systems".into(),
            sheet_dir: ".".into(),
            font_dir: "fonts".into(),
            icon_dir: "resources".into(),
            jpeg_quality: 95,
        }
    }
}

impl Settings {
    /// Settings for the working directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(dir.join(SETTINGS_FILE)).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
