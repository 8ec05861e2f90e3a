//! Font faces used on tiles and ship sheets.
//!
//! Faces are loaded once from a directory into a `fontdb` database that the
//! SVG renderer shares. A face whose file is missing or unreadable falls back
//! to the generic `sans-serif` family; that is the only font failure that does
//! not abort a run.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use usvg::fontdb::{Database, Family, ID, Source};

/// Family used when a face file cannot be loaded.
pub const FALLBACK_FAMILY: &str = "sans-serif";

/// Typefaces referenced by the layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    EurostileExtendedBold,
    TitilliumSemiBold,
}

impl Face {
    pub const ALL: [Face; 2] = [Face::EurostileExtendedBold, Face::TitilliumSemiBold];

    pub fn file_name(self) -> &'static str {
        match self {
            Face::EurostileExtendedBold => "Eurostile Extended Bold.ttf",
            Face::TitilliumSemiBold => "TitilliumWeb-SemiBold.ttf",
        }
    }

    /// Weight requested from the fallback family.
    pub fn fallback_weight(self) -> u16 {
        match self {
            Face::EurostileExtendedBold => 700,
            Face::TitilliumSemiBold => 600,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// How a face is addressed from SVG `font-family` / `font-weight`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFace {
    pub family: String,
    pub weight: u16,
    /// True when the face file failed to load and the default font stands in.
    pub fallback: bool,
}

impl ResolvedFace {
    fn fallback(face: Face) -> Self {
        Self {
            family: FALLBACK_FAMILY.to_string(),
            weight: face.fallback_weight(),
            fallback: true,
        }
    }
}

#[derive(Error, Debug)]
enum LoadError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("file contains no usable font face")]
    NoFace,
    #[error("font face has no family name")]
    NoFamily,
}

/// The immutable set of loaded faces.
pub struct FontSet {
    db: Arc<Database>,
    faces: [ResolvedFace; 2],
}

impl FontSet {
    /// Load every [`Face`] from `dir`, substituting the default font for any
    /// face that cannot be read.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut db = Database::new();
        let mut own = Vec::new();
        let faces = Face::ALL.map(|face| {
            let path = dir.join(face.file_name());
            match load_face(&mut db, &path) {
                Ok((id, resolved)) => {
                    own.push(id);
                    debug!(path = %path.display(), family = %resolved.family, "loaded font");
                    resolved
                }
                Err(err) => {
                    warn!(
                        "Could not load {} ({err}), falling back to default font",
                        path.display()
                    );
                    ResolvedFace::fallback(face)
                }
            }
        });
        if faces.iter().any(|f| f.fallback) {
            db.load_system_fonts();
            map_sans_serif(&mut db, &own);
        }
        Self {
            db: Arc::new(db),
            faces,
        }
    }

    /// Shared database handed to `usvg::Options::fontdb`.
    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    pub fn resolve(&self, face: Face) -> &ResolvedFace {
        &self.faces[face.index()]
    }
}

// Point the generic family at a face that is actually in the database,
// preferring system faces over the ones loaded from the font directory.
fn map_sans_serif(db: &mut Database, own: &[ID]) {
    let current = db.family_name(&Family::SansSerif).to_string();
    if has_family(db, &current) {
        return;
    }
    let system = db.faces().filter(|f| !own.contains(&f.id));
    let replacement = system
        .chain(db.faces())
        .find_map(|f| f.families.first().map(|(n, _)| n.clone()));
    match replacement {
        Some(name) => {
            debug!(from = %current, to = %name, "mapped sans-serif");
            db.set_sans_serif_family(name);
        }
        None => warn!("no fonts available, text will not be drawn"),
    }
}

fn has_family(db: &Database, name: &str) -> bool {
    db.faces()
        .any(|f| f.families.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)))
}

fn load_face(db: &mut Database, path: &Path) -> Result<(ID, ResolvedFace), LoadError> {
    let data = fs::read(path)?;
    let ids = db.load_font_source(Source::Binary(Arc::new(data)));
    let id = ids.first().copied().ok_or(LoadError::NoFace)?;
    let info = db.face(id).ok_or(LoadError::NoFace)?;
    let family = info
        .families
        .first()
        .map(|(n, _)| n.clone())
        .ok_or(LoadError::NoFamily)?;
    Ok((
        id,
        ResolvedFace {
            family,
            weight: info.weight.0,
            fallback: false,
        },
    ))
}
