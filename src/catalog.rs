//! Static reference tables: cost, build time, supply, DPS and tech
//! prerequisites per action identifier.
//!
//! The builtin Protoss table is embedded JSON parsed once per process and
//! shared by reference; nothing mutates a [`Catalog`] after construction.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const BUILTIN_CATALOG: &str = include_str!("data/protoss_catalog.json");

/// Ticks an action occupies when the catalog does not know it.
pub const DEFAULT_ACTION_TIME: u32 = 1;

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json_str(BUILTIN_CATALOG).expect("builtin catalog should parse")
});

/// What a completed identifier is, and therefore how the simulator treats it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Gathers minerals.
    Worker,
    CombatUnit,
    Structure,
    /// Raises the supply cap on completion.
    SupplyStructure,
    /// Trains queued units; completing one resets its queue.
    ProductionStructure,
    /// Morphs an existing structure and takes over its queue.
    UpgradeStructure,
    /// Yields gas once completed during a run.
    GasStructure,
}

impl Kind {
    /// Completed instances count as buildings (prerequisite holders).
    pub fn is_structure(self) -> bool {
        !matches!(self, Kind::Worker | Kind::CombatUnit)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub minerals: u32,
    pub gas: u32,
    /// Build time in simulated seconds.
    pub time: u32,
    pub supply: u32,
    #[serde(default)]
    pub dps: Option<f64>,
    pub kind: Kind,
    /// Buildings that must exist (count > 0) when the build is issued.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Production structure whose queue trains this unit.
    #[serde(default)]
    pub trained_from: Option<String>,
    /// Structure an upgrade replaces.
    #[serde(default)]
    pub morphs_from: Option<String>,
}

impl CatalogEntry {
    pub fn dps_or_zero(&self) -> f64 {
        self.dps.unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// The embedded Protoss tables.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Catalog::from_json_str(&contents)?;
        tracing::info!(
            target: "build_finder::catalog",
            path = %path.display(),
            entries = catalog.len(),
            "catalog.loaded=file"
        );
        Ok(catalog)
    }

    /// Every identifier an entry mentions must itself be an entry.
    fn validate(&self) -> Result<(), CatalogError> {
        for (id, entry) in &self.entries {
            let refs = entry
                .requires
                .iter()
                .chain(entry.trained_from.iter())
                .chain(entry.morphs_from.iter());
            for reference in refs {
                if !self.entries.contains_key(reference) {
                    return Err(CatalogError::DanglingReference {
                        entry: id.clone(),
                        reference: reference.clone(),
                    });
                }
            }
            if entry.kind == Kind::UpgradeStructure && entry.morphs_from.is_none() {
                return Err(CatalogError::MissingMorphSource(id.clone()));
            }
        }
        Ok(())
    }

    /// Lookup for callers that treat unknown identifiers as timing tokens.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Lookup for callers that need a required field.
    pub fn entry(&self, id: &str) -> Result<&CatalogEntry, CatalogError> {
        self.entries
            .get(id)
            .ok_or_else(|| CatalogError::UnknownAction(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Ticks the evaluator holds `id` for.
    pub fn action_time(&self, id: &str) -> u32 {
        self.get(id).map_or(DEFAULT_ACTION_TIME, |e| e.time)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
