//! Fonts and icons, loaded once before any layout.

use std::fs;
use std::path::Path;

use fonts::FontSet;
use tile_core::svg::{Assets, FontRef};
use tile_core::{Face, Icon};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::raster::png_data_url;
use crate::settings::Settings;

/// An icon image embedded as a data URL.
#[derive(Clone, Debug)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub href: String,
}

impl IconImage {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Every [`Icon`], indexed by [`Icon::index`].
#[derive(Clone, Debug)]
pub struct IconSet {
    icons: Vec<IconImage>,
}

impl IconSet {
    /// Read every icon from `dir`. A missing or undecodable file is fatal.
    pub fn load(dir: &Path) -> Result<Self> {
        let icons = Icon::ALL
            .iter()
            .map(|icon| read_icon(&dir.join(icon.file_name())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { icons })
    }

    pub fn get(&self, icon: Icon) -> &IconImage {
        &self.icons[icon.index()]
    }
}

fn read_icon(path: &Path) -> Result<IconImage> {
    let bytes = fs::read(path).map_err(|source| Error::IconRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = png::Decoder::new(bytes.as_slice())
        .read_info()
        .map_err(|source| Error::IconDecode {
            path: path.to_path_buf(),
            source,
        })?;
    let (width, height) = (reader.info().width, reader.info().height);
    debug!(path = %path.display(), width, height, "loaded icon");
    Ok(IconImage {
        width,
        height,
        href: png_data_url(&bytes),
    })
}

/// Immutable fonts and icons shared by every render of a run.
pub struct ResourceSet {
    pub fonts: FontSet,
    pub icons: IconSet,
}

impl ResourceSet {
    pub fn load(settings: &Settings) -> Result<Self> {
        let fonts = FontSet::load(&settings.font_dir);
        let icons = IconSet::load(&settings.icon_dir)?;
        info!(
            fonts = %settings.font_dir.display(),
            icons = %settings.icon_dir.display(),
            "resources loaded"
        );
        Ok(Self { fonts, icons })
    }
}

impl Assets for ResourceSet {
    fn font(&self, face: Face) -> FontRef<'_> {
        let resolved = self.fonts.resolve(face);
        FontRef {
            family: &resolved.family,
            weight: resolved.weight,
        }
    }

    fn icon_href(&self, icon: Icon) -> &str {
        &self.icons.get(icon).href
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_icons(dir: &Path) {
        let arrow = tile_core::encode_rgba_to_png_bytes(5, 2, &[0u8; 5 * 2 * 4]).unwrap();
        let square = tile_core::encode_rgba_to_png_bytes(2, 2, &[0u8; 2 * 2 * 4]).unwrap();
        for icon in Icon::ALL {
            let bytes = if icon == Icon::Arrow { &arrow } else { &square };
            fs::write(dir.join(icon.file_name()), bytes).unwrap();
        }
    }

    #[test]
    fn loads_every_icon_with_its_size() {
        let dir = tempfile::tempdir().unwrap();
        write_icons(dir.path());
        let set = IconSet::load(dir.path()).unwrap();
        assert_eq!(set.get(Icon::Arrow).aspect(), 2.5);
        assert_eq!(set.get(Icon::Crew).aspect(), 1.0);
        assert!(set.get(Icon::Hull).href.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn missing_icon_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_icons(dir.path());
        fs::remove_file(dir.path().join(Icon::ShieldSlot.file_name())).unwrap();
        let err = IconSet::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::IconRead { .. }));
        assert!(err.to_string().contains("shield_slot.png"));
    }

    #[test]
    fn undecodable_icon_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_icons(dir.path());
        fs::write(dir.path().join(Icon::Crew.file_name()), b"GIF89a").unwrap();
        assert!(matches!(
            IconSet::load(dir.path()),
            Err(Error::IconDecode { .. })
        ));
    }
}
