use std::sync::Arc;

use recipe_app::{FileStore, KeyValueStore, RecipeBox, RecipeSummary, StorageConfig};
use tempfile::TempDir;

fn storage_config(temp_dir: &TempDir) -> StorageConfig {
    StorageConfig {
        namespace: "@RecipeApp".to_string(),
        data_dir: Some(temp_dir.path().to_path_buf()),
    }
}

fn recipe(id: &str, name: &str) -> RecipeSummary {
    RecipeSummary {
        category: Some("Dessert".to_string()),
        ..RecipeSummary::new(id, name, format!("https://example.com/{}.jpg", id))
    }
}

#[tokio::test]
async fn test_collections_survive_reopening() {
    let temp_dir = TempDir::new().unwrap();

    {
        let recipe_box = RecipeBox::open(&storage_config(&temp_dir)).unwrap();
        assert!(recipe_box.library().add(recipe("52893", "Apple & Blackberry Crumble")).await);
        assert!(recipe_box.library().add(recipe("52768", "Apple Frangipan Tart")).await);
        assert!(recipe_box.favorites().add(recipe("52768", "Apple Frangipan Tart")).await);
    }

    let reopened = RecipeBox::open(&storage_config(&temp_dir)).unwrap();
    let ids: Vec<String> = reopened
        .library()
        .list()
        .await
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["52893", "52768"]);
    assert_eq!(reopened.favorites().list().await.len(), 1);
}

#[tokio::test]
async fn test_persisted_layout_is_a_plain_json_array() {
    let temp_dir = TempDir::new().unwrap();
    let recipe_box = RecipeBox::open(&storage_config(&temp_dir)).unwrap();
    assert!(recipe_box.library().add(recipe("52893", "Apple & Blackberry Crumble")).await);

    let store = FileStore::new(temp_dir.path());
    let raw = store.get("@RecipeApp:Library").await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "52893");
    assert_eq!(entries[0]["imageUrl"], "https://example.com/52893.jpg");
    assert_eq!(entries[0]["category"], "Dessert");
    assert!(entries[0].get("area").is_none());
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty_and_is_left_alone() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(temp_dir.path()));
    store.set("@RecipeApp:Favorites", "[{\"id\":").await.unwrap();

    let recipe_box = RecipeBox::with_storage(store.clone(), "@RecipeApp").unwrap();
    assert!(recipe_box.favorites().list().await.is_empty());
    assert!(!recipe_box.favorites().add(recipe("1", "One")).await);

    let raw = store.get("@RecipeApp:Favorites").await.unwrap();
    assert_eq!(raw.as_deref(), Some("[{\"id\":"));

    // The library lives under its own key and is unaffected
    assert!(recipe_box.library().add(recipe("1", "One")).await);
}
