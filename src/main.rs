use log::debug;
use std::env;

use recipe_app::{
    AppConfig, AppError, CollectionKind, MealDbClient, RecipeBox, RecipeDetailView,
    RecipeDetails, RecipeSource, RecipeSummary, ToggleOutcome,
};

const USAGE: &str = "Usage:
  recipe-app search <ingredient>
  recipe-app show <id>
  recipe-app <library|favorites> list
  recipe-app <library|favorites> add <id>
  recipe-app <library|favorites> remove <id>
  recipe-app <library|favorites> contains <id>";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().ok_or(USAGE)?;

    let config = AppConfig::load()?;
    debug!("{:#?}", config);

    // Opening may create the data directory, which blocks, so it runs before the runtime starts
    let recipe_box = RecipeBox::open(&config.storage)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(command, &args, &config, &recipe_box))
}

async fn run(
    command: &str,
    args: &[String],
    config: &AppConfig,
    recipe_box: &RecipeBox,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = MealDbClient::new(&config.api)?;

    match command {
        "search" => {
            let ingredient = args[1..].join(" ");
            let results = client.search_by_ingredient(&ingredient).await;
            if results.is_empty() {
                println!("No recipes found for '{}'", ingredient.trim());
            }
            for recipe in &results {
                print_summary(recipe);
            }
        }
        "show" => {
            let id = required_arg(args, 1)?;
            let view = RecipeDetailView::load(&client, recipe_box, id).await?;
            print_details(view.details());
            println!(
                "In library: {}  Favorite: {}",
                yes_no(view.in_library()),
                yes_no(view.is_favorite())
            );
        }
        "-h" | "--help" | "help" => println!("{}", USAGE),
        other => {
            let kind: CollectionKind = other.parse()?;
            let action = required_arg(args, 1)?;
            run_collection_command(&client, recipe_box, kind, action, args.get(2)).await?;
        }
    }

    Ok(())
}

async fn run_collection_command(
    client: &dyn RecipeSource,
    recipe_box: &RecipeBox,
    kind: CollectionKind,
    action: &str,
    id: Option<&String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = recipe_box.collection(kind);

    match action {
        "list" => {
            let recipes = store.list().await;
            if recipes.is_empty() {
                println!("Your {} is empty.", kind);
            }
            for recipe in &recipes {
                print_summary(recipe);
            }
        }
        "add" => {
            let id = id.ok_or(USAGE)?;
            let mut view = RecipeDetailView::load(client, recipe_box, id).await?;
            let already_member = match kind {
                CollectionKind::Library => view.in_library(),
                CollectionKind::Favorites => view.is_favorite(),
            };
            if already_member {
                println!("{} is already in your {}.", view.details().name, kind);
                return Ok(());
            }
            let outcome = match kind {
                CollectionKind::Library => view.toggle_library().await,
                CollectionKind::Favorites => view.toggle_favorite().await,
            };
            match outcome {
                ToggleOutcome::Added => {
                    println!("{} has been added to your {}.", view.details().name, kind)
                }
                _ => return Err(format!("Could not add recipe to {}", kind).into()),
            }
        }
        "remove" => {
            let id = id.ok_or(USAGE)?;
            if !store.remove(id).await {
                return Err(format!("Could not remove recipe from {}", kind).into());
            }
            println!("Removed {} from your {}.", id, kind);
        }
        "contains" => {
            let id = id.ok_or(USAGE)?;
            println!("{}", yes_no(store.contains(id).await));
        }
        other => {
            return Err(AppError::InvalidInput(format!("Unknown action '{}'\n{}", other, USAGE)).into())
        }
    }

    Ok(())
}

fn required_arg(args: &[String], index: usize) -> Result<&str, AppError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| AppError::InvalidInput(USAGE.to_string()))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn print_summary(recipe: &RecipeSummary) {
    let mut line = format!("{:>8}  {}", recipe.id, recipe.name);
    if let Some(category) = &recipe.category {
        line.push_str(&format!("  [{}]", category));
    }
    if let Some(area) = &recipe.area {
        line.push_str(&format!("  ({})", area));
    }
    println!("{}", line);
}

fn print_details(details: &RecipeDetails) {
    println!("{} ({})", details.name, details.id);
    if let Some(category) = &details.category {
        println!("Category: {}", category);
    }
    if let Some(area) = &details.area {
        println!("Area: {}", area);
    }
    if !details.tags.is_empty() {
        println!("Tags: {}", details.tags.join(", "));
    }
    println!("\nIngredients:");
    for item in &details.ingredients {
        match &item.measure {
            Some(measure) => println!("- {} {}", measure, item.ingredient),
            None => println!("- {}", item.ingredient),
        }
    }
    if let Some(instructions) = &details.instructions {
        println!("\nInstructions:\n{}", instructions);
    }
}
