use crate::api::RecipeApi;
use crate::error::SearchError;
use crate::favorites::FavoritesStore;
use crate::model::{Recipe, RecipeId};
use log::{error, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs searches and marks each result with its current favorite status
#[derive(Clone)]
pub struct RecipeSearchService {
    api: Arc<dyn RecipeApi>,
    favorites: FavoritesStore,
}

impl RecipeSearchService {
    pub fn new(api: Arc<dyn RecipeApi>, favorites: FavoritesStore) -> Self {
        RecipeSearchService { api, favorites }
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Search for `query` and annotate the results from one favorites snapshot.
    ///
    /// The query is sent as-is, blank or not. Every failure collapses into
    /// [`SearchError`]; the cause is only logged.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, SearchError> {
        let container = self.api.search(query).await.map_err(|e| {
            error!("Recipe search for {:?} failed: {}", query, e);
            SearchError::from(e)
        })?;

        let favorite_ids = self.favorite_ids().await;
        let recipes = mark_favorites(container.recipes, &favorite_ids);
        info!(
            "Found {} recipe(s) for {:?}, {} favorite(s)",
            recipes.len(),
            query,
            recipes.iter().filter(|r| r.is_favorite).count()
        );
        Ok(recipes)
    }

    /// Reads the favorites on the blocking pool, since the store does synchronous I/O.
    async fn favorite_ids(&self) -> HashSet<RecipeId> {
        let favorites = self.favorites.clone();
        tokio::task::spawn_blocking(move || favorites.favorite_ids())
            .await
            .unwrap_or_else(|e| {
                warn!("Favorites read did not complete, treating as empty: {}", e);
                HashSet::new()
            })
    }

    /// Fire-and-forget form of [`search`](Self::search).
    ///
    /// Spawns the search on the current tokio runtime and calls exactly one
    /// of `on_result` or `on_error` when it finishes.
    pub fn search_with_callbacks<R, E>(
        &self,
        query: impl Into<String>,
        on_result: R,
        on_error: E,
    ) -> JoinHandle<()>
    where
        R: FnOnce(Vec<Recipe>) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let service = self.clone();
        let query = query.into();
        tokio::spawn(async move {
            match service.search(&query).await {
                Ok(recipes) => on_result(recipes),
                Err(SearchError) => on_error(),
            }
        })
    }
}

/// Produce new recipes flagged by membership of their id in `favorite_ids`, keeping order.
pub fn mark_favorites(recipes: Vec<Recipe>, favorite_ids: &HashSet<RecipeId>) -> Vec<Recipe> {
    recipes
        .into_iter()
        .map(|recipe| {
            let favorite = favorite_ids.contains(&recipe.recipe_id);
            recipe.with_favorite(favorite)
        })
        .collect()
}
