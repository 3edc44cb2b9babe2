//! Data loading and external game content
//!
//! Lets the item catalog be overridden from a RON file.

pub mod loader;

pub use loader::{export_default_catalog, load_catalog, load_catalog_or_builtin, DataError, ItemTemplates};
