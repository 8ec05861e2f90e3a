use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Closed tag for the systems whose layout departs from the generic one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemKind {
    #[default]
    Generic,
    Reactor,
    Mess,
}

impl SystemKind {
    /// Tag implied by a system name, compared case-insensitively.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("reactor") {
            SystemKind::Reactor
        } else if name.eq_ignore_ascii_case("mess") {
            SystemKind::Mess
        } else {
            SystemKind::Generic
        }
    }

    /// Reactor and mess use a fixed band instead of the minimum height.
    pub fn has_band(self) -> bool {
        !matches!(self, SystemKind::Generic)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    #[serde(default)]
    pub energy: u32,
    #[serde(default)]
    pub crew: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoot {
    pub damage: i32,
    pub range: i32,
}

/// One action slot of a system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub cost: Cost,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoot: Option<Shoot>,
    #[serde(default)]
    pub description: String,
}

/// A ship system as rendered on one tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SystemRecord")]
pub struct System {
    pub name: String,
    pub kind: SystemKind,
    pub rules: Option<String>,
    pub areas: Vec<Area>,
    pub hull: bool,
    pub electronics: bool,
    pub life_support: bool,
    pub circles: Option<u32>,
    pub med_bay: Option<u32>,
}

impl System {
    /// Count of med bay icons, only meaningful for the mess.
    pub fn med_bay_count(&self) -> u32 {
        match self.kind {
            SystemKind::Mess => self.med_bay.unwrap_or(0),
            _ => 0,
        }
    }
}

// On-disk shape; `kind` is optional and falls back to the name.
#[derive(Deserialize)]
struct SystemRecord {
    name: String,
    #[serde(default)]
    kind: Option<SystemKind>,
    #[serde(default)]
    rules: Option<String>,
    #[serde(default)]
    areas: Vec<Area>,
    #[serde(default)]
    hull: bool,
    #[serde(default)]
    electronics: bool,
    #[serde(default)]
    life_support: bool,
    #[serde(default)]
    circles: Option<u32>,
    #[serde(default)]
    med_bay: Option<u32>,
}

impl From<SystemRecord> for System {
    fn from(r: SystemRecord) -> Self {
        let kind = r.kind.unwrap_or_else(|| SystemKind::from_name(&r.name));
        System {
            kind,
            rules: r.rules.filter(|s| !s.is_empty()),
            name: r.name,
            areas: r.areas,
            hull: r.hull,
            electronics: r.electronics,
            life_support: r.life_support,
            circles: r.circles,
            med_bay: r.med_bay,
        }
    }
}

fn default_front() -> Vec<u32> {
    vec![0, 0, 0]
}

fn default_rear() -> Vec<u32> {
    vec![0, 0]
}

/// Shield capacity per arc: each entry is a group of empty slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shields {
    #[serde(default = "default_front")]
    pub front: Vec<u32>,
    #[serde(default = "default_rear")]
    pub rear: Vec<u32>,
}

impl Default for Shields {
    fn default() -> Self {
        Self {
            front: default_front(),
            rear: default_rear(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub left: Vec<System>,
    pub right: Vec<System>,
    pub core: Vec<System>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub command: i32,
    #[serde(default)]
    pub control: i32,
    #[serde(default)]
    pub shields: Shields,
    pub sections: Sections,
    pub reactor: System,
    pub mess: System,
}

/// `systems.json`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemsFile {
    #[serde(default)]
    pub systems: Vec<System>,
}

/// `cores.json`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoresFile {
    #[serde(default)]
    pub cores: Vec<System>,
}

/// `mess.json`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessHallsFile {
    #[serde(default)]
    pub mess_halls: Vec<System>,
}

/// Read and deserialize a JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let txt = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&txt).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
