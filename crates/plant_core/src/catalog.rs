use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::interval::{self, Interval};

const EMBEDDED_CATALOG: &str = include_str!("../data/plants.json");

/// Care facts for one plant. Records are never modified once loaded.
///
/// `mistingDays` and `repotMonths` take a number, `null`, or exactly their own
/// marker (`"no-misting"` and `"no-repot"` respectively).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub watering_days: u32,
    #[serde(
        default,
        rename = "mistingDays",
        deserialize_with = "interval::deserialize_misting"
    )]
    pub misting: Interval,
    #[serde(
        default,
        rename = "repotMonths",
        deserialize_with = "interval::deserialize_repotting"
    )]
    pub repotting: Interval,
    pub temperature: String,
    pub soil_type: String,
    pub toxicity: String,
}

impl PlantRecord {
    pub fn is_non_toxic(&self) -> bool {
        self.toxicity.to_lowercase() == "non-toxic"
    }
}

/// Read-only name to record mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    plants: HashMap<String, PlantRecord>,
}

impl Catalog {
    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), plants = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let plants: HashMap<String, PlantRecord> = serde_json::from_str(raw)?;
        Ok(Self { plants })
    }

    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, PlantRecord)>,
        S: Into<String>,
    {
        Self {
            plants: records
                .into_iter()
                .map(|(name, record)| (name.into(), record))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlantRecord> {
        self.plants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plants.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Unordered; use [`crate::filter::list_names`] for display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlantRecord)> {
        self.plants
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }
}
