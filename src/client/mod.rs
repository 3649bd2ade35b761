mod mealdb;

pub use mealdb::MealDbClient;

use async_trait::async_trait;

use crate::model::{RecipeDetails, RecipeSummary};

/// Remote source of recipe search results and details.
///
/// Implementations never fail: network, status and parse errors are logged
/// and answered with an empty list or `None`.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Recipes that use `ingredient`. Only `id`, `name` and `image_url` are set.
    async fn search_by_ingredient(&self, ingredient: &str) -> Vec<RecipeSummary>;

    /// Full recipe for `id`, `None` when unknown or unreachable.
    async fn get_details_by_id(&self, id: &str) -> Option<RecipeDetails>;
}
