use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{ConfigError, SearchError};

pub const DEFAULT_TARGET_TIME: u32 = 1800;
pub const DEFAULT_POPULATION_SIZE: usize = 20;
pub const DEFAULT_GENERATIONS: usize = 50;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_ORDER_LENGTH: usize = 40;

/// Actions the search draws from: economy, supply, gateway army, robo tech.
pub const DEFAULT_VOCABULARY: [&str; 7] = [
    "probe",
    "pylon",
    "gateway",
    "zealot",
    "stalker",
    "robotics_bay",
    "immortal",
];

/// Everything one search run needs besides the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Simulated second at which fitness is read.
    pub target_time: u32,
    pub population_size: usize,
    pub generations: usize,
    /// Chance a new slot is a mutant rather than a crossover child.
    pub mutation_rate: f64,
    /// Actions per build order.
    pub order_length: usize,
    pub seed: u64,
    pub vocabulary: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_time: DEFAULT_TARGET_TIME,
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            mutation_rate: DEFAULT_MUTATION_RATE,
            order_length: DEFAULT_ORDER_LENGTH,
            seed: 0,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = SearchConfig::from_json_str(&contents)?;
        tracing::info!(
            target: "build_finder::config",
            path = %path.display(),
            "search_config.loaded=file"
        );
        Ok(cfg)
    }

    /// Rejects inputs the search cannot run on. Vocabulary actions must be
    /// catalog entries.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), SearchError> {
        if self.target_time == 0 {
            return Err(SearchError::ZeroTargetTime);
        }
        if self.population_size == 0 {
            return Err(SearchError::EmptyPopulation);
        }
        if self.order_length == 0 {
            return Err(SearchError::EmptyBuildOrder);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::InvalidMutationRate(self.mutation_rate));
        }
        if self.vocabulary.is_empty() {
            return Err(SearchError::EmptyVocabulary);
        }
        if let Some(unknown) = self.vocabulary.iter().find(|a| !catalog.contains(a)) {
            return Err(SearchError::UnknownVocabularyAction(unknown.clone()));
        }
        Ok(())
    }
}
