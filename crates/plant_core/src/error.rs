use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed catalog JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    /// Raised when export is requested without a plant that exists in the catalog.
    #[error("Please choose a valid plant.")]
    NoValidSelection,
    #[error("failed to render PDF: {0}")]
    Render(String),
    #[error("unable to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
