use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    catalog::Catalog,
    error::ExportError,
    filter, pdf,
    schedule::{self, Schedule},
};

/// Read-only access to the plant catalog plus the export destination.
pub struct CareGuide {
    catalog: Catalog,
    export_dir: PathBuf,
}

pub struct CareGuideBuilder {
    catalog: Option<Catalog>,
    catalog_path: Option<PathBuf>,
    export_dir: PathBuf,
}

impl CareGuideBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            catalog_path: None,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Loads the catalog from a JSON file instead of the embedded dataset.
    pub fn catalog_path(mut self, path: impl AsRef<Path>) -> Self {
        self.catalog_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn export_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.export_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn build(self) -> Result<CareGuide> {
        let catalog = match (self.catalog, self.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Catalog::load(&path)
                .with_context(|| format!("failed to load catalog from {}", path.display()))?,
            (None, None) => Catalog::embedded().context("embedded catalog is malformed")?,
        };
        tracing::info!(
            plants = catalog.len(),
            export_dir = %self.export_dir.display(),
            "care guide ready"
        );
        Ok(CareGuide {
            catalog,
            export_dir: self.export_dir,
        })
    }
}

impl Default for CareGuideBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CareGuide {
    pub fn builder() -> CareGuideBuilder {
        CareGuideBuilder::new()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn set_export_dir(&mut self, path: PathBuf) {
        tracing::info!(path = %path.display(), "export directory changed");
        self.export_dir = path;
    }

    pub fn list_names(&self, only_non_toxic: bool) -> Vec<String> {
        filter::list_names(&self.catalog, only_non_toxic)
    }

    pub fn schedule(&self, name: &str) -> Option<Schedule> {
        schedule::lookup_schedule(&self.catalog, name)
    }

    pub fn export_pdf(&self, name: &str) -> Result<PathBuf, ExportError> {
        let request = pdf::prepare_export(&self.catalog, name)?;
        request.write_to_dir(&self.export_dir)
    }
}
