//! Application state shared across handlers.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use shreck_core::catalog::{Catalog, CatalogError};

use crate::assets::PublicRoot;
use crate::config::StorefrontConfig;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    CatalogInvalid { path: String, source: CatalogError },
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything inside is read-only
/// after startup, so handlers never contend on a lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    assets: PublicRoot,
    catalog: Catalog,
}

impl AppState {
    /// Create the application state, loading the catalog from disk.
    ///
    /// A missing catalog file yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog exists but cannot be read or parsed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = load_catalog(&config.catalog_path)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create the application state with an already loaded catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let assets = PublicRoot::new(config.public_dir.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                assets,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the public asset root.
    #[must_use]
    pub fn assets(&self) -> &PublicRoot {
        &self.inner.assets
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}

/// Read the catalog file, treating a missing file as an empty catalog.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Catalog, StateError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No catalog file, product API will be empty");
            return Ok(Catalog::default());
        }
        Err(source) => {
            return Err(StateError::CatalogRead {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let catalog = Catalog::from_json(&json).map_err(|source| StateError::CatalogInvalid {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(&dir.path().join("catalog.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, StateError::CatalogInvalid { .. }));
    }

    #[test]
    fn test_state_loads_catalog_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("catalog.json"),
            r#"[{"id": "p1", "name": "Gorra", "category": "accesorios", "price": 15}]"#,
        )
        .unwrap();

        let state = AppState::new(StorefrontConfig::for_public_dir(dir.path())).unwrap();
        assert_eq!(state.catalog().len(), 1);
        assert_eq!(state.assets().path(), dir.path());
        assert_eq!(state.config().catalog_path, dir.path().join("catalog.json"));
    }
}
