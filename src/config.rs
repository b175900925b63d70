//! Save-format version milestones.
//!
//! The named `SLV_*` constants in OpenTTD's `src/saveload/saveload.h` have
//! no embedded number, so their values are recorded here by hand. The table
//! has to follow upstream whenever a new milestone appears. Alternative
//! tables (e.g. forks using a 255 sentinel) can be loaded from JSON.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{GenError, GenResult};
use crate::model::VersionRange;

/// Name that always resolves to `min_version`.
pub const MIN_VERSION_NAME: &str = "SL_MIN_VERSION";
/// Name that always resolves to `max_version`.
pub const MAX_VERSION_NAME: &str = "SL_MAX_VERSION";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionTable {
    pub min_version: u32,
    /// Sentinel meaning "current and every future version".
    pub max_version: u32,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

const OPENTTD_MILESTONES: &[(&str, u32)] = &[
    ("SLV_EXTEND_CARGOTYPES", 199),
    ("SLV_EXTEND_RAILTYPES", 200),
    ("SLV_EXTEND_PERSISTENT_STORAGE", 201),
    ("SLV_EXTEND_INDUSTRY_CARGO_SLOTS", 202),
    ("SLV_SHIP_PATH_CACHE", 203),
    ("SLV_SHIP_ROTATION", 204),
    ("SLV_GROUP_LIVERIES", 205),
    ("SLV_SHIPS_STOP_IN_LOCKS", 206),
    ("SLV_FIX_CARGO_MONITOR", 207),
    ("SLV_TOWN_CARGOGEN", 208),
    ("SLV_SHIP_CURVE_PENALTY", 209),
    ("SLV_SERVE_NEUTRAL_INDUSTRIES", 210),
    ("SLV_ROADVEH_PATH_CACHE", 211),
    ("SLV_REMOVE_OPF", 212),
    ("SLV_TREES_WATER_CLASS", 213),
    ("SLV_ROAD_TYPES", 214),
    ("SLV_SCRIPT_MEMLIMIT", 215),
    ("SLV_MULTITILE_DOCKS", 216),
];

impl Default for VersionTable {
    fn default() -> Self {
        Self::openttd()
    }
}

impl VersionTable {
    /// Upstream OpenTTD history up to `SLV_MULTITILE_DOCKS`.
    pub fn openttd() -> Self {
        Self {
            min_version: 0,
            max_version: 65535,
            milestones: OPENTTD_MILESTONES
                .iter()
                .map(|&(name, version)| Milestone {
                    name: name.to_string(),
                    version,
                })
                .collect(),
        }
    }

    /// Parse and validate a JSON table.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let table: VersionTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.min_version >= self.max_version {
            return Err(invalid(format!(
                "min_version {} must be below max_version {}",
                self.min_version, self.max_version
            )));
        }

        let mut seen = HashSet::new();
        for m in &self.milestones {
            if !seen.insert(m.name.as_str()) {
                return Err(invalid(format!("duplicate milestone `{}`", m.name)));
            }
            if m.version < self.min_version || m.version > self.max_version {
                return Err(invalid(format!(
                    "milestone `{}` = {} lies outside {}",
                    m.name,
                    m.version,
                    self.global_range()
                )));
            }
            let reserved = match m.name.as_str() {
                MIN_VERSION_NAME => Some(self.min_version),
                MAX_VERSION_NAME => Some(self.max_version),
                _ => None,
            };
            if let Some(expected) = reserved.filter(|&v| v != m.version) {
                return Err(invalid(format!(
                    "milestone `{}` = {} contradicts bound {}",
                    m.name, m.version, expected
                )));
            }
        }
        Ok(())
    }

    /// Look up a named version, including the two reserved bound names.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        match name {
            MIN_VERSION_NAME => Some(self.min_version),
            MAX_VERSION_NAME => Some(self.max_version),
            _ => self
                .milestones
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.version),
        }
    }

    /// The range covering every version, emitted unconditionally.
    pub fn global_range(&self) -> VersionRange {
        VersionRange::new(self.min_version, self.max_version)
    }
}

fn invalid(reason: String) -> GenError {
    GenError::InvalidVersionTable { reason }
}
