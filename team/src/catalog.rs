//! Read-only creature catalog

use std::collections::HashMap;
use std::path::Path;

use duel_battle::Creature;
use thiserror::Error;

use crate::record::CreatureRecord;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Creature definitions, keyed by name
///
/// Loaded once from a `pokedex.json` array. Later entries with a duplicate
/// name replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CreatureRecord>,
}

impl Catalog {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), creatures = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<CreatureRecord> = serde_json::from_str(raw)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: impl IntoIterator<Item = CreatureRecord>) -> Self {
        Self {
            entries: records
                .into_iter()
                .map(|record| (record.name.clone(), record))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CreatureRecord> {
        self.entries.get(name)
    }

    /// A freshly captured instance of the named creature
    pub fn instantiate(&self, name: &str) -> Option<Creature> {
        self.get(name).map(CreatureRecord::to_creature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
