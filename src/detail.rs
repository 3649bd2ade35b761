//! State behind the recipe detail screen.
//!
//! Combines remote recipe details with the user's library and favorites
//! membership, and turns the "save" and "favorite" buttons into store calls.

use log::{info, warn};
use thiserror::Error;

use crate::client::RecipeSource;
use crate::collection::{CollectionKind, CollectionStore};
use crate::model::{RecipeDetails, RecipeSummary};
use crate::recipe_box::RecipeBox;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DetailError {
    #[error("No recipe id provided")]
    MissingId,

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

/// Which way a toggle tried to move a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Add,
    Remove,
}

/// Result of pressing a membership toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The store reported failure; membership is unchanged
    Failed { action: ToggleAction },
}

/// A loaded recipe plus its current membership in both collections.
pub struct RecipeDetailView<'a> {
    recipe_box: &'a RecipeBox,
    details: RecipeDetails,
    in_library: bool,
    is_favorite: bool,
}

impl<'a> RecipeDetailView<'a> {
    /// Fetch `id` from `source` and read its membership in both collections.
    pub async fn load(
        source: &dyn RecipeSource,
        recipe_box: &'a RecipeBox,
        id: &str,
    ) -> Result<Self, DetailError> {
        if id.is_empty() {
            return Err(DetailError::MissingId);
        }

        let details = source
            .get_details_by_id(id)
            .await
            .ok_or_else(|| DetailError::NotFound(id.to_string()))?;

        let (in_library, is_favorite) = tokio::join!(
            recipe_box.library().contains(&details.id),
            recipe_box.favorites().contains(&details.id)
        );

        Ok(Self {
            recipe_box,
            details,
            in_library,
            is_favorite,
        })
    }

    pub fn details(&self) -> &RecipeDetails {
        &self.details
    }

    pub fn in_library(&self) -> bool {
        self.in_library
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// The record that gets stored when this recipe is saved.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary::from(&self.details)
    }

    /// Add to the library, or remove if already there.
    pub async fn toggle_library(&mut self) -> ToggleOutcome {
        let outcome = self.toggle(CollectionKind::Library, self.in_library).await;
        apply(&mut self.in_library, outcome);
        outcome
    }

    /// Mark as favorite, or unmark if already a favorite.
    pub async fn toggle_favorite(&mut self) -> ToggleOutcome {
        let outcome = self.toggle(CollectionKind::Favorites, self.is_favorite).await;
        apply(&mut self.is_favorite, outcome);
        outcome
    }

    async fn toggle(&self, kind: CollectionKind, is_member: bool) -> ToggleOutcome {
        let store: &CollectionStore = self.recipe_box.collection(kind);

        if is_member {
            if store.remove(&self.details.id).await {
                info!("{} has been removed from {}", self.details.name, kind);
                ToggleOutcome::Removed
            } else {
                warn!("Could not remove {} from {}", self.details.name, kind);
                ToggleOutcome::Failed {
                    action: ToggleAction::Remove,
                }
            }
        } else if store.add(self.summary()).await {
            info!("{} has been added to {}", self.details.name, kind);
            ToggleOutcome::Added
        } else {
            warn!("Could not add {} to {}", self.details.name, kind);
            ToggleOutcome::Failed {
                action: ToggleAction::Add,
            }
        }
    }
}

fn apply(flag: &mut bool, outcome: ToggleOutcome) {
    match outcome {
        ToggleOutcome::Added => *flag = true,
        ToggleOutcome::Removed => *flag = false,
        ToggleOutcome::Failed { .. } => {}
    }
}
