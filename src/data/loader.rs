//! RON data loader
//!
//! Loads the item catalog from an external RON file, with fallback to the
//! built-in tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::catalog::{default_items, CatalogError, ItemCatalog};
use crate::items::Item;

/// File name of the catalog override inside the data directory
pub const ITEMS_FILE: &str = "items.ron";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {ITEMS_FILE}: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize items: {0}")]
    Serialize(#[from] ron::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// On-disk shape of `items.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub items: Vec<Item>,
}

/// Load `items.ron` from `dir`. `Ok(None)` when the file does not exist.
pub fn load_catalog(dir: &Path) -> Result<Option<ItemCatalog>, DataError> {
    let path = dir.join(ITEMS_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|source| DataError::Io { path: path.clone(), source })?;
    let templates: ItemTemplates = ron::from_str(&content)?;
    let catalog = ItemCatalog::from_items(templates.items)?;
    log::info!("Loaded {} items from {:?}", catalog.len(), path);
    Ok(Some(catalog))
}

/// Load the catalog override, or fall back to the built-in tables
pub fn load_catalog_or_builtin(dir: &Path) -> ItemCatalog {
    match load_catalog(dir) {
        Ok(Some(catalog)) => catalog,
        Ok(None) => ItemCatalog::builtin().clone(),
        Err(e) => {
            log::warn!("Failed to load item data: {}. Using defaults.", e);
            ItemCatalog::builtin().clone()
        }
    }
}

/// Export the built-in catalog to `items.ron` for easy editing
pub fn export_default_catalog(dir: &Path) -> Result<PathBuf, DataError> {
    fs::create_dir_all(dir).map_err(|source| DataError::Io { path: dir.to_path_buf(), source })?;

    let templates = ItemTemplates { items: default_items() };
    let text = ron::ser::to_string_pretty(&templates, ron::ser::PrettyConfig::default())?;
    let path = dir.join(ITEMS_FILE);
    fs::write(&path, text).map_err(|source| DataError::Io { path: path.clone(), source })?;
    Ok(path)
}
