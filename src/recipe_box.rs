use std::sync::Arc;

use log::info;

use crate::collection::{CollectionKind, CollectionStore};
use crate::config::StorageConfig;
use crate::error::{AppError, StorageError};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

const DEFAULT_NAMESPACE: &str = "@RecipeApp";

/// The user's on-device collections over one shared persistence handle.
///
/// Open it once per process and hand it (or the individual stores) to
/// whatever needs it.
#[derive(Debug)]
pub struct RecipeBox {
    library: CollectionStore,
    favorites: CollectionStore,
}

impl RecipeBox {
    /// Open the backend described by `config`.
    ///
    /// With a `data_dir` the collections are kept on disk; the directory is
    /// created up front so a bad path is reported here rather than on the
    /// first write. Without one they live in memory.
    ///
    /// Directory creation is blocking I/O; call this before entering the
    /// async runtime or from a blocking context.
    pub fn open(config: &StorageConfig) -> Result<Self, AppError> {
        let storage: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(StorageError::from)?;
                info!("Opening recipe collections in {}", dir.display());
                Arc::new(FileStore::new(dir))
            }
            None => {
                info!("No data directory configured, keeping collections in memory");
                Arc::new(MemoryStore::new())
            }
        };

        Self::with_storage(storage, &config.namespace)
    }

    /// Build both collections over an existing backend.
    pub fn with_storage(storage: Arc<dyn KeyValueStore>, namespace: &str) -> Result<Self, AppError> {
        if namespace.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Storage namespace cannot be empty".to_string(),
            ));
        }

        Ok(Self::build(storage, namespace))
    }

    /// Both collections over one in-memory backend under the default namespace.
    pub fn in_memory() -> Self {
        Self::build(Arc::new(MemoryStore::new()), DEFAULT_NAMESPACE)
    }

    fn build(storage: Arc<dyn KeyValueStore>, namespace: &str) -> Self {
        Self {
            library: CollectionStore::for_kind(storage.clone(), namespace, CollectionKind::Library),
            favorites: CollectionStore::for_kind(storage, namespace, CollectionKind::Favorites),
        }
    }

    pub fn library(&self) -> &CollectionStore {
        &self.library
    }

    pub fn favorites(&self) -> &CollectionStore {
        &self.favorites
    }

    pub fn collection(&self, kind: CollectionKind) -> &CollectionStore {
        match kind {
            CollectionKind::Library => &self.library,
            CollectionKind::Favorites => &self.favorites,
        }
    }
}
