//! Catalog file for the tlf command line
//!
//! The sign-in state and the known remote lists are read from a JSON file
//! and handed to a `FilterCatalogService`. Sync and login tooling own that
//! file; tlf only reads it.

pub mod error;

pub use error::{CatalogError, CatalogResult};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tasklists_core::{FilterCatalogService, RemoteList, SessionState, StaticCatalog};
use tracing::debug;

/// Catalog path relative to the user's config directory
pub const DEFAULT_CATALOG_SUBPATH: &str = "tasklists/catalog.json";

/// Catalog path used when no config directory can be determined
pub const FALLBACK_CATALOG_PATH: &str = ".tasklists/catalog.json";

/// Contents of a catalog file
///
/// ```json
/// {
///   "session": { "state": "signed_in", "account": "me@example.com" },
///   "lists": [{ "id": 1, "remote_id": "MTAxOTk2", "name": "Groceries" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub session: SessionState,
    #[serde(default)]
    pub lists: Vec<RemoteList>,
}

impl CatalogFile {
    /// Load a catalog file.
    ///
    /// A missing file is an empty, signed-out catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPath` if the path is a directory.
    /// Returns `CatalogError::Io` if the file cannot be read.
    /// Returns `CatalogError::Parse` if the file is not a valid catalog.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        if path.is_dir() {
            return Err(CatalogError::InvalidPath {
                path: path.to_path_buf(),
                reason: "is a directory".to_string(),
            });
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no catalog file, using empty catalog");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let catalog: CatalogFile =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        debug!(path = %path.display(), lists = catalog.lists.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Default catalog path inside the user's config directory.
    ///
    /// Falls back to `.tasklists/catalog.json` relative to the current
    /// directory when no config directory is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(DEFAULT_CATALOG_SUBPATH))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CATALOG_PATH))
    }

    /// Wire the catalog into a filter service
    pub fn into_service(self) -> FilterCatalogService<SessionState, StaticCatalog> {
        FilterCatalogService::new(self.session, StaticCatalog::new(self.lists))
    }
}
