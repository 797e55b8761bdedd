//! Fallback store: the catalog kept in a single flat JSON file
//!
//! Reads never fail. A missing file is empty by policy; an unreadable or
//! malformed file is logged and also treated as empty. Writes replace the
//! whole document and report their errors.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::Catalog;
use crate::Result;

/// Outcome of loading the catalog document
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLoad {
    /// Document read and parsed
    Loaded(Catalog),
    /// No document at the configured path
    Missing,
    /// Document present but could not be read or parsed
    Unreadable(String),
}

impl CatalogLoad {
    /// Collapse to a catalog, substituting an empty one for any failure
    pub fn into_catalog(self) -> Catalog {
        match self {
            CatalogLoad::Loaded(catalog) => catalog,
            CatalogLoad::Missing | CatalogLoad::Unreadable(_) => Catalog::default(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogLoad::Loaded(_))
    }
}

/// File-backed catalog
#[derive(Debug, Clone)]
pub struct FallbackStore {
    path: PathBuf,
}

impl FallbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, distinguishing missing from unreadable
    pub async fn load(&self) -> CatalogLoad {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Catalog file not found: {}", self.path.display());
                return CatalogLoad::Missing;
            }
            Err(e) => {
                warn!("Failed to read catalog {}: {}", self.path.display(), e);
                return CatalogLoad::Unreadable(e.to_string());
            }
        };

        match serde_json::from_str::<Catalog>(&text) {
            Ok(catalog) => {
                debug!(
                    "Loaded {} matches from {}",
                    catalog.len(),
                    self.path.display()
                );
                CatalogLoad::Loaded(catalog)
            }
            Err(e) => {
                warn!("Malformed catalog {}: {}", self.path.display(), e);
                CatalogLoad::Unreadable(e.to_string())
            }
        }
    }

    /// Load the catalog, empty on any failure
    pub async fn read(&self) -> Catalog {
        self.load().await.into_catalog()
    }

    /// Replace the stored document with `doc`, pretty-printed
    pub async fn write(&self, doc: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let text = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, text).await?;

        info!("Catalog written to {}", self.path.display());
        Ok(())
    }

    /// Replace the stored document with a typed catalog
    pub async fn write_catalog(&self, catalog: &Catalog) -> Result<()> {
        self.write(&serde_json::to_value(catalog)?).await
    }
}
