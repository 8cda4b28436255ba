pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod search;
pub mod storage;
pub mod uniffi_bindings;

// Re-export commonly used types
pub use api::{Food2ForkClient, RecipeApi};
pub use builder::{RecipeSearch, RecipeSearchBuilder};
pub use config::SearchConfig;
pub use error::{FetchError, RecipeSearchError, SearchError, StoreError};
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use model::{Recipe, RecipeId, RecipesContainer};
pub use search::{mark_favorites, RecipeSearchService};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Search with configuration loaded from `config.toml` and the environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = recipe_search::search_recipes("chicken").await?;
/// for recipe in recipes {
///     println!("{} {}", if recipe.is_favorite { "*" } else { " " }, recipe.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(query: &str) -> Result<Vec<Recipe>, RecipeSearchError> {
    let service = RecipeSearch::builder().build()?;
    Ok(service.search(query).await?)
}
