//! UniFFI bindings for recipe-app
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! The async Rust API is wrapped in synchronous functions that run on a tokio
//! runtime owned by the process-wide state created in [`initialize`].

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use log::{error, warn};

use crate::client::{MealDbClient, RecipeSource};
use crate::collection::CollectionKind;
use crate::config::{ApiConfig, StorageConfig};
use crate::{AppError, Ingredient, RecipeBox, RecipeDetails, RecipeSummary};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe summary
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeSummary {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub category: Option<String>,
    pub area: Option<String>,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(recipe: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: recipe.id,
            name: recipe.name,
            image_url: recipe.image_url,
            category: recipe.category,
            area: recipe.area,
        }
    }
}

impl From<FfiRecipeSummary> for RecipeSummary {
    fn from(ffi: FfiRecipeSummary) -> Self {
        RecipeSummary {
            id: ffi.id,
            name: ffi.name,
            image_url: ffi.image_url,
            category: ffi.category,
            area: ffi.area,
        }
    }
}

/// FFI-compatible ingredient line
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub ingredient: String,
    pub measure: Option<String>,
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            ingredient: ingredient.ingredient,
            measure: ingredient.measure,
        }
    }
}

/// FFI-compatible full recipe
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDetails {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    pub youtube_url: Option<String>,
    pub source: Option<String>,
    pub ingredients: Vec<FfiIngredient>,
}

impl From<RecipeDetails> for FfiRecipeDetails {
    fn from(details: RecipeDetails) -> Self {
        FfiRecipeDetails {
            id: details.id,
            name: details.name,
            category: details.category,
            area: details.area,
            instructions: details.instructions,
            image_url: details.image_url,
            tags: details.tags,
            youtube_url: details.youtube_url,
            source: details.source,
            ingredients: details.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// Storage could not be opened
    StorageError { message: String },
    /// HTTP client could not be built
    ClientError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::StorageError { message } => write!(f, "Storage error: {}", message),
            FfiRecipeError::ClientError { message } => write!(f, "Client error: {}", message),
            FfiRecipeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiRecipeError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<AppError> for FfiRecipeError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Storage(e) => FfiRecipeError::StorageError {
                message: e.to_string(),
            },
            AppError::Client(e) => FfiRecipeError::ClientError {
                message: e.to_string(),
            },
            AppError::Config(e) => FfiRecipeError::ConfigError {
                message: e.to_string(),
            },
            AppError::InvalidInput(msg) => FfiRecipeError::InvalidInput { message: msg },
        }
    }
}

/// Configuration passed once from the host app
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiConfig {
    /// Directory for persisted collections; in-memory when not specified
    pub data_dir: Option<String>,
    /// Storage key prefix (uses "@RecipeApp" if not specified)
    pub namespace: Option<String>,
    /// Remote API base URL (uses TheMealDB if not specified)
    pub api_base_url: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
}

struct FfiState {
    runtime: tokio::runtime::Runtime,
    recipe_box: RecipeBox,
    client: MealDbClient,
}

static STATE: OnceLock<FfiState> = OnceLock::new();

/// Create the tokio runtime shared by all FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Storage settings from an FFI config; a blank `data_dir` counts as unset
fn storage_config(config: &FfiConfig) -> StorageConfig {
    let mut storage = StorageConfig::default();
    if let Some(namespace) = &config.namespace {
        storage.namespace = namespace.clone();
    }
    storage.data_dir = config
        .data_dir
        .as_deref()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from);
    storage
}

fn api_config(config: &FfiConfig) -> ApiConfig {
    let mut api = ApiConfig::default();
    if let Some(base_url) = &config.api_base_url {
        api.base_url = base_url.clone();
    }
    if let Some(timeout) = config.timeout_seconds {
        api.timeout = timeout;
    }
    api
}

fn build_state(config: FfiConfig) -> Result<FfiState, FfiRecipeError> {
    let storage = storage_config(&config);
    let api = api_config(&config);

    let recipe_box = RecipeBox::open(&storage)?;
    let client = MealDbClient::new(&api).map_err(AppError::from)?;

    Ok(FfiState {
        runtime: create_runtime()?,
        recipe_box,
        client,
    })
}

fn state() -> Option<&'static FfiState> {
    let state = STATE.get();
    if state.is_none() {
        error!("recipe-app used before initialize() was called");
    }
    state
}

/// Open the persistence substrate and HTTP client for this process.
///
/// Must be called once before any other function. Later calls are ignored.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn initialize(config: Option<FfiConfig>) -> Result<(), FfiRecipeError> {
    if STATE.get().is_some() {
        warn!("initialize() called more than once, keeping the first configuration");
        return Ok(());
    }

    let new_state = build_state(config.unwrap_or_default())?;
    if STATE.set(new_state).is_err() {
        warn!("initialize() raced with another call, keeping the first configuration");
    }
    Ok(())
}

fn collection_list(kind: CollectionKind) -> Vec<FfiRecipeSummary> {
    let Some(state) = state() else {
        return Vec::new();
    };
    state
        .runtime
        .block_on(state.recipe_box.collection(kind).list())
        .into_iter()
        .map(Into::into)
        .collect()
}

fn collection_add(kind: CollectionKind, recipe: FfiRecipeSummary) -> bool {
    let Some(state) = state() else {
        return false;
    };
    state
        .runtime
        .block_on(state.recipe_box.collection(kind).add(recipe.into()))
}

fn collection_remove(kind: CollectionKind, id: &str) -> bool {
    let Some(state) = state() else {
        return false;
    };
    state
        .runtime
        .block_on(state.recipe_box.collection(kind).remove(id))
}

fn collection_contains(kind: CollectionKind, id: &str) -> bool {
    let Some(state) = state() else {
        return false;
    };
    state
        .runtime
        .block_on(state.recipe_box.collection(kind).contains(id))
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn library_list() -> Vec<FfiRecipeSummary> {
    collection_list(CollectionKind::Library)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn library_add(recipe: FfiRecipeSummary) -> bool {
    collection_add(CollectionKind::Library, recipe)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn library_remove(id: String) -> bool {
    collection_remove(CollectionKind::Library, &id)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn library_contains(id: String) -> bool {
    collection_contains(CollectionKind::Library, &id)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn favorites_list() -> Vec<FfiRecipeSummary> {
    collection_list(CollectionKind::Favorites)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn favorites_add(recipe: FfiRecipeSummary) -> bool {
    collection_add(CollectionKind::Favorites, recipe)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn favorites_remove(id: String) -> bool {
    collection_remove(CollectionKind::Favorites, &id)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn favorites_contains(id: String) -> bool {
    collection_contains(CollectionKind::Favorites, &id)
}

/// Search recipes by ingredient. Empty on any failure.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_by_ingredient(ingredient: String) -> Vec<FfiRecipeSummary> {
    let Some(state) = state() else {
        return Vec::new();
    };
    state
        .runtime
        .block_on(state.client.search_by_ingredient(&ingredient))
        .into_iter()
        .map(Into::into)
        .collect()
}

/// Full recipe details, `None` when not found or unreachable.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_recipe_details(id: String) -> Option<FfiRecipeDetails> {
    let state = state()?;
    state
        .runtime
        .block_on(state.client.get_details_by_id(&id))
        .map(Into::into)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teriyaki() -> FfiRecipeSummary {
        FfiRecipeSummary {
            id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            image_url: "https://example.com/52772.jpg".to_string(),
            category: Some("Chicken".to_string()),
            area: None,
        }
    }

    #[test]
    fn test_ffi_summary_conversion() {
        let summary: RecipeSummary = teriyaki().into();
        assert_eq!(summary.id, "52772");
        assert_eq!(summary.category.as_deref(), Some("Chicken"));

        let back: FfiRecipeSummary = summary.into();
        assert_eq!(back, teriyaki());
    }

    #[test]
    fn test_ffi_details_conversion() {
        let details = RecipeDetails {
            id: "1".to_string(),
            name: "Soup".to_string(),
            ingredients: vec![Ingredient {
                ingredient: "water".to_string(),
                measure: None,
            }],
            ..Default::default()
        };

        let ffi: FfiRecipeDetails = details.into();
        assert_eq!(ffi.ingredients.len(), 1);
        assert_eq!(ffi.ingredients[0].ingredient, "water");
    }

    #[test]
    fn test_app_error_mapping() {
        let err: FfiRecipeError = AppError::InvalidInput("empty namespace".to_string()).into();
        assert!(matches!(err, FfiRecipeError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "Invalid input: empty namespace");
    }

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }

    #[test]
    fn test_blank_data_dir_keeps_collections_in_memory() {
        let config = FfiConfig {
            data_dir: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(storage_config(&config).data_dir.is_none());

        let state = build_state(config).unwrap();
        assert!(format!("{:?}", state.recipe_box.library()).contains("\"memory\""));
    }

    #[test]
    fn test_ffi_config_overrides_defaults() {
        let config = FfiConfig {
            data_dir: Some("/tmp/recipes".to_string()),
            namespace: Some("@Test".to_string()),
            api_base_url: None,
            timeout_seconds: Some(3),
        };

        let storage = storage_config(&config);
        assert_eq!(storage.data_dir, Some(PathBuf::from("/tmp/recipes")));
        assert_eq!(storage.namespace, "@Test");

        let api = api_config(&config);
        assert_eq!(api.timeout, 3);
        assert_eq!(api.base_url, ApiConfig::default().base_url);
    }

    // The only test in this binary that touches the process-wide state
    #[test]
    fn test_collections_after_initialize() {
        initialize(None).unwrap();
        // A second call keeps the first state
        initialize(None).unwrap();

        assert!(library_add(teriyaki()));
        assert!(library_add(teriyaki()));
        assert_eq!(library_list().len(), 1);
        assert!(library_contains("52772".to_string()));
        assert!(!favorites_contains("52772".to_string()));

        assert!(library_remove("52772".to_string()));
        assert!(library_list().is_empty());
        assert!(!favorites_add(FfiRecipeSummary {
            id: String::new(),
            ..teriyaki()
        }));
    }
}
