use serde::{Deserialize, Deserializer, Serialize};

/// Minimal identity and display record kept in a collection.
///
/// The serialized form is the persisted layout: `id`, `name`, `imageUrl`,
/// and `category` / `area` only when present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// Reads an explicit `null` as an empty string.
pub(crate) fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RecipeSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            category: None,
            area: None,
        }
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient: String,
    /// Quantity text as given upstream, e.g. "3/4 cup"
    pub measure: Option<String>,
}

/// Full recipe as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    pub youtube_url: Option<String>,
    pub source: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl From<&RecipeDetails> for RecipeSummary {
    fn from(details: &RecipeDetails) -> Self {
        RecipeSummary {
            id: details.id.clone(),
            name: details.name.clone(),
            image_url: details.image_url.clone(),
            category: details.category.clone(),
            area: details.area.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_camel_case_and_omits_missing_fields() {
        let summary = RecipeSummary::new(
            "52772",
            "Teriyaki Chicken Casserole",
            "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "52772");
        assert_eq!(
            json["imageUrl"],
            "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg"
        );
        assert!(json.get("category").is_none());
        assert!(json.get("area").is_none());
    }

    #[test]
    fn test_summary_tolerates_missing_display_fields() {
        let summary: RecipeSummary = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(summary.id, "1");
        assert!(summary.name.is_empty());
        assert!(summary.image_url.is_empty());
    }

    #[test]
    fn test_summary_reads_null_display_fields_as_empty() {
        let summary: RecipeSummary =
            serde_json::from_str(r#"{"id":"2","name":null,"imageUrl":null,"area":null}"#).unwrap();
        assert_eq!(summary, RecipeSummary::new("2", "", ""));
    }

    #[test]
    fn test_summary_from_details_keeps_identity_fields_only() {
        let details = RecipeDetails {
            id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            category: Some("Chicken".to_string()),
            area: Some("Japanese".to_string()),
            instructions: Some("Preheat oven to 350F.".to_string()),
            image_url: "https://example.com/52772.jpg".to_string(),
            tags: vec!["Meat".to_string(), "Casserole".to_string()],
            youtube_url: None,
            source: None,
            ingredients: vec![Ingredient {
                ingredient: "soy sauce".to_string(),
                measure: Some("3/4 cup".to_string()),
            }],
        };

        let summary = RecipeSummary::from(&details);
        assert_eq!(summary.id, "52772");
        assert_eq!(summary.name, "Teriyaki Chicken Casserole");
        assert_eq!(summary.image_url, "https://example.com/52772.jpg");
        assert_eq!(summary.category.as_deref(), Some("Chicken"));
        assert_eq!(summary.area.as_deref(), Some("Japanese"));
    }
}
