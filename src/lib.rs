//! On-device recipe collections backed by TheMealDB.
//!
//! The core of the crate is [`CollectionStore`]: an id-deduplicated,
//! insertion-ordered list of [`RecipeSummary`] persisted under one key of a
//! [`KeyValueStore`]. [`RecipeBox`] opens the backend once and builds the
//! library and favorites collections over it. [`MealDbClient`] supplies
//! search results and recipe details.
//!
//! ```no_run
//! use recipe_app::{AppConfig, RecipeBox, RecipeSummary};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let recipe_box = RecipeBox::open(&config.storage)?;
//!
//! let recipe = RecipeSummary::new(
//!     "52772",
//!     "Teriyaki Chicken Casserole",
//!     "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
//! );
//! assert!(recipe_box.library().add(recipe).await);
//! assert!(recipe_box.library().contains("52772").await);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod collection;
pub mod config;
pub mod detail;
pub mod error;
pub mod model;
pub mod recipe_box;
pub mod storage;
pub mod uniffi_bindings;

pub use client::{MealDbClient, RecipeSource};
pub use collection::{CollectionKind, CollectionStore};
pub use config::{ApiConfig, AppConfig, StorageConfig};
pub use detail::{DetailError, RecipeDetailView, ToggleAction, ToggleOutcome};
pub use error::{AppError, ClientError, StorageError};
pub use model::{Ingredient, RecipeDetails, RecipeSummary};
pub use recipe_box::RecipeBox;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Search TheMealDB for recipes using `ingredient`, with default API settings.
///
/// Request failures yield an empty list; only building the HTTP client can
/// fail.
pub async fn search_recipes(ingredient: &str) -> Result<Vec<RecipeSummary>, AppError> {
    let client = MealDbClient::new(&ApiConfig::default())?;
    Ok(client.search_by_ingredient(ingredient).await)
}

/// Fetch full details for recipe `id`, with default API settings.
pub async fn fetch_recipe_details(id: &str) -> Result<Option<RecipeDetails>, AppError> {
    let client = MealDbClient::new(&ApiConfig::default())?;
    Ok(client.get_details_by_id(id).await)
}
