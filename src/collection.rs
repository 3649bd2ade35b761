//! Persisted, id-deduplicated recipe collections.
//!
//! A [`CollectionStore`] owns one key in a [`KeyValueStore`] and keeps an
//! ordered list of [`RecipeSummary`] there as a JSON array. Library and
//! favorites are two instances of the same store under different keys.
//!
//! No storage fault crosses this boundary: reads degrade to an empty list,
//! mutations and membership checks degrade to `false`, and the cause is
//! logged.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::sync::Mutex;

use crate::error::{AppError, StorageError};
use crate::model::RecipeSummary;
use crate::storage::KeyValueStore;

/// The two collections the app keeps on-device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Library,
    Favorites,
}

impl CollectionKind {
    /// Lowercase name used in logs and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Library => "library",
            CollectionKind::Favorites => "favorites",
        }
    }

    /// Storage key for this collection under `namespace`, e.g. `@RecipeApp:Library`.
    pub fn storage_key(&self, namespace: &str) -> String {
        let suffix = match self {
            CollectionKind::Library => "Library",
            CollectionKind::Favorites => "Favorites",
        };
        format!("{}:{}", namespace, suffix)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollectionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "library" => Ok(CollectionKind::Library),
            "favorites" | "favourites" => Ok(CollectionKind::Favorites),
            other => Err(AppError::InvalidInput(format!(
                "Unknown collection '{}', expected 'library' or 'favorites'",
                other
            ))),
        }
    }
}

/// Ordered set of recipe summaries persisted under a single key.
///
/// Mutations run as read-modify-write cycles. They are serialized through a
/// per-store lock held across the read and the write, so two overlapping
/// `add`/`remove` calls on the same store cannot lose each other's update.
/// The lock is per instance: build exactly one store per key in a process.
pub struct CollectionStore {
    name: String,
    key: String,
    storage: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl CollectionStore {
    /// Create a store over an arbitrary key.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Create the store for one of the app's collections.
    pub fn for_kind(storage: Arc<dyn KeyValueStore>, namespace: &str, kind: CollectionKind) -> Self {
        Self::new(storage, kind.name(), kind.storage_key(namespace))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the collection in insertion order.
    ///
    /// A missing value is an empty collection. Read failures are logged and
    /// also reported as empty.
    pub async fn list(&self) -> Vec<RecipeSummary> {
        match self.load().await {
            Ok(recipes) => recipes,
            Err(e) => {
                error!(
                    "Error fetching {} from {} storage: {}",
                    self.name,
                    self.storage.backend_name(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Append `recipe` unless an entry with the same id is already present.
    ///
    /// Returns `true` when the recipe is in the collection afterwards,
    /// `false` for an empty id or when the read or write failed.
    pub async fn add(&self, recipe: RecipeSummary) -> bool {
        if recipe.id.is_empty() {
            error!("Invalid recipe provided to {} add: empty id", self.name);
            return false;
        }

        let _guard = self.write_lock.lock().await;
        let id = recipe.id.clone();
        match self.try_add(recipe).await {
            Ok(true) => {
                info!("Recipe added to {}: {}", self.name, id);
                true
            }
            Ok(false) => {
                debug!("Recipe already in {}: {}", self.name, id);
                true
            }
            Err(e) => {
                error!("Error adding recipe {} to {}: {}", id, self.name, e);
                false
            }
        }
    }

    /// Drop every entry with `id` and write the result back.
    ///
    /// Removing an id that is not present still writes and returns `true`.
    pub async fn remove(&self, id: &str) -> bool {
        if id.is_empty() {
            error!("Invalid recipe id provided to {} remove: empty id", self.name);
            return false;
        }

        let _guard = self.write_lock.lock().await;
        match self.try_remove(id).await {
            Ok(()) => {
                info!("Recipe removed from {}: {}", self.name, id);
                true
            }
            Err(e) => {
                error!("Error removing recipe {} from {}: {}", id, self.name, e);
                false
            }
        }
    }

    /// Whether an entry with `id` is present. Read failures answer `false`.
    pub async fn contains(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }

        match self.load().await {
            Ok(recipes) => recipes.iter().any(|r| r.id == id),
            Err(e) => {
                error!("Error checking if recipe {} is in {}: {}", id, self.name, e);
                false
            }
        }
    }

    async fn try_add(&self, recipe: RecipeSummary) -> Result<bool, StorageError> {
        let mut recipes = self.load().await?;
        if recipes.iter().any(|r| r.id == recipe.id) {
            return Ok(false);
        }

        recipes.push(recipe);
        self.save(&recipes).await?;
        Ok(true)
    }

    async fn try_remove(&self, id: &str) -> Result<(), StorageError> {
        let mut recipes = self.load().await?;
        recipes.retain(|r| r.id != id);
        self.save(&recipes).await
    }

    async fn load(&self) -> Result<Vec<RecipeSummary>, StorageError> {
        match self.storage.get(&self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, recipes: &[RecipeSummary]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(recipes)?;
        self.storage.set(&self.key, &raw).await
    }
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("backend", &self.storage.backend_name())
            .finish()
    }
}
