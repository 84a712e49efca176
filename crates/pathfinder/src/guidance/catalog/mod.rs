//! Read-only reference data: branch career pools and the per-career curriculum table.

mod curriculum;
mod standard;

pub use curriculum::{Curriculum, CurriculumLevel, ResourceLink};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::profile::Branch;

/// Career path name; doubles as the key into the curriculum table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerLabel(pub String);

impl CareerLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|keyword| self.0.contains(keyword.as_str()))
    }
}

impl fmt::Display for CareerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CareerLabel {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Branch-specific candidate lists. Order matters: earlier entries win ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPools {
    pub cse: Vec<CareerLabel>,
    pub cs: Vec<CareerLabel>,
    pub ds: Vec<CareerLabel>,
    pub ai_ml: Vec<CareerLabel>,
    pub fallback: CareerLabel,
}

impl CareerPools {
    /// Base pool for a branch. Unrecognized branches get the CSE pool followed by the CS pool.
    pub fn pool_for(&self, branch: Branch) -> Vec<&CareerLabel> {
        match branch {
            Branch::Cse => self.cse.iter().collect(),
            Branch::Cs => self.cs.iter().collect(),
            Branch::Ds => self.ds.iter().collect(),
            Branch::AiMl => self.ai_ml.iter().collect(),
            Branch::Other => self.cse.iter().chain(self.cs.iter()).collect(),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &CareerLabel> {
        self.cse
            .iter()
            .chain(self.cs.iter())
            .chain(self.ds.iter())
            .chain(self.ai_ml.iter())
    }
}

/// Career pools plus the curriculum table they key into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerCatalog {
    pub pools: CareerPools,
    pub curricula: BTreeMap<CareerLabel, Curriculum>,
}

impl CareerCatalog {
    /// Built-in dataset covering the four engineering branches.
    pub fn standard() -> Self {
        standard::catalog()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: CareerCatalog = serde_json::from_reader(reader)?;
        catalog.validate()?;

        for label in catalog.missing_curricula() {
            warn!(career = %label, "career pool entry has no curriculum");
        }

        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Structural checks: labels unique across pools and no empty curricula.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for label in self.pools.all() {
            if !seen.insert(label) {
                return Err(CatalogError::DuplicateLabel(label.clone()));
            }
        }

        if let Some((label, _)) = self
            .curricula
            .iter()
            .find(|(_, curriculum)| curriculum.levels.is_empty())
        {
            return Err(CatalogError::EmptyCurriculum(label.clone()));
        }

        Ok(())
    }

    /// Pool entries (and the fallback) that cannot be resolved to a curriculum.
    pub fn missing_curricula(&self) -> Vec<&CareerLabel> {
        self.pools
            .all()
            .chain(std::iter::once(&self.pools.fallback))
            .filter(|label| !self.curricula.contains_key(*label))
            .collect()
    }

    pub fn curriculum(&self, label: &CareerLabel) -> Option<&Curriculum> {
        self.curricula.get(label)
    }

    /// Number of levels for a career, or `None` when the table has no usable entry.
    pub fn level_count(&self, label: &CareerLabel) -> Option<u32> {
        self.curriculum(label)
            .map(Curriculum::level_count)
            .filter(|count| *count > 0)
    }

    pub fn level(&self, label: &CareerLabel, level: u32) -> Option<&CurriculumLevel> {
        self.curriculum(label).and_then(|curriculum| curriculum.level(level))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("career '{0}' appears in more than one pool")]
    DuplicateLabel(CareerLabel),
    #[error("career '{0}' has a curriculum without levels")]
    EmptyCurriculum(CareerLabel),
}
