use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::client::RecipeSource;
use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::model::{null_as_empty, Ingredient, RecipeDetails, RecipeSummary};

/// TheMealDB exposes at most this many numbered ingredient slots per meal
const MAX_INGREDIENT_SLOTS: usize = 20;

/// Envelope of every TheMealDB response; `meals` is `null` when nothing matched
#[derive(Deserialize)]
struct MealsResponse<T> {
    meals: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct MealHit {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    thumbnail: String,
}

impl From<MealHit> for RecipeSummary {
    fn from(hit: MealHit) -> Self {
        RecipeSummary::new(hit.id, hit.name, hit.thumbnail)
    }
}

/// Client for TheMealDB's public JSON API.
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        Self::with_base_url(config.base_url.clone(), Some(config.timeout_duration()))
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-app/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_meals<T>(&self, path: &str, query: &str) -> Result<Vec<T>, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[("i", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let body: MealsResponse<T> = response.json().await?;
        Ok(body.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn search_by_ingredient(&self, ingredient: &str) -> Vec<RecipeSummary> {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            debug!("Search ingredient is empty, returning no results");
            return Vec::new();
        }

        match self.fetch_meals::<MealHit>("filter.php", ingredient).await {
            Ok(hits) if hits.is_empty() => {
                info!("No meals found for ingredient: {}", ingredient);
                Vec::new()
            }
            Ok(hits) => hits.into_iter().map(RecipeSummary::from).collect(),
            Err(e) => {
                error!("Error searching recipes for '{}': {}", ingredient, e);
                Vec::new()
            }
        }
    }

    async fn get_details_by_id(&self, id: &str) -> Option<RecipeDetails> {
        if id.is_empty() {
            debug!("Recipe id is empty, returning nothing");
            return None;
        }

        match self.fetch_meals::<Map<String, Value>>("lookup.php", id).await {
            Ok(meals) => match meals.first().and_then(details_from_meal) {
                Some(details) => Some(details),
                None => {
                    info!("No meal found for id: {}", id);
                    None
                }
            },
            Err(e) => {
                error!("Error fetching recipe details for {}: {}", id, e);
                None
            }
        }
    }
}

/// Non-blank string field of a raw meal object
fn text_field(meal: &Map<String, Value>, key: &str) -> Option<String> {
    meal.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn details_from_meal(meal: &Map<String, Value>) -> Option<RecipeDetails> {
    let id = text_field(meal, "idMeal")?;

    // Slots are filled from 1 upward; the first empty one ends the list
    let mut ingredients = Vec::new();
    for slot in 1..=MAX_INGREDIENT_SLOTS {
        let Some(ingredient) = text_field(meal, &format!("strIngredient{}", slot)) else {
            break;
        };
        ingredients.push(Ingredient {
            ingredient,
            measure: text_field(meal, &format!("strMeasure{}", slot)),
        });
    }

    let tags = text_field(meal, "strTags")
        .map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(RecipeDetails {
        id,
        name: text_field(meal, "strMeal").unwrap_or_default(),
        category: text_field(meal, "strCategory"),
        area: text_field(meal, "strArea"),
        instructions: text_field(meal, "strInstructions"),
        image_url: text_field(meal, "strMealThumb").unwrap_or_default(),
        tags,
        youtube_url: text_field(meal, "strYoutube"),
        source: text_field(meal, "strSource"),
        ingredients,
    })
}
