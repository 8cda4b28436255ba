use crate::error::StoreError;
use crate::model::{Recipe, RecipeId};
use crate::storage::KeyValueStore;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// Key under which the serialized favorites list is stored
pub const FAVORITES_KEY: &str = "FAVORITES_KEY";

/// The user's favorited recipes, persisted as one JSON list in a [`KeyValueStore`]
///
/// Nothing is cached: every call reads the store, and every mutation is a
/// single read-modify-write followed by one synchronous `put`. Two mutations
/// racing from different threads can lose one of the updates (last writer wins).
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        FavoritesStore { store }
    }

    /// All favorited recipes.
    ///
    /// A missing, unreadable or corrupt value reads as no favorites.
    pub fn get_favorites(&self) -> Vec<Recipe> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read favorites, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Stored favorites are corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Ids of all favorited recipes, from a single read
    pub fn favorite_ids(&self) -> HashSet<RecipeId> {
        self.get_favorites()
            .into_iter()
            .map(|recipe| recipe.recipe_id)
            .collect()
    }

    pub fn is_favorite(&self, recipe_id: &RecipeId) -> bool {
        self.get_favorites()
            .iter()
            .any(|favorite| &favorite.recipe_id == recipe_id)
    }

    /// Adds `recipe` unless a favorite with the same id already exists.
    pub fn add_favorite(&self, recipe: &Recipe) -> Result<(), StoreError> {
        let mut favorites = self.get_favorites();
        if favorites.iter().any(|favorite| favorite.same_recipe(recipe)) {
            debug!("Recipe {} is already a favorite", recipe.recipe_id);
        } else {
            favorites.push(recipe.clone().with_favorite(true));
        }
        self.save(&favorites)
    }

    /// Removes every favorite sharing `recipe`'s id, whatever its other fields.
    pub fn remove_favorite(&self, recipe: &Recipe) -> Result<(), StoreError> {
        let mut favorites = self.get_favorites();
        favorites.retain(|favorite| !favorite.same_recipe(recipe));
        self.save(&favorites)
    }

    /// Flips the favorite state of `recipe` and returns the new state.
    pub fn toggle_favorite(&self, recipe: &Recipe) -> Result<bool, StoreError> {
        let mut favorites = self.get_favorites();
        let before = favorites.len();
        favorites.retain(|favorite| !favorite.same_recipe(recipe));

        let now_favorite = favorites.len() == before;
        if now_favorite {
            favorites.push(recipe.clone().with_favorite(true));
        }
        self.save(&favorites)?;
        Ok(now_favorite)
    }

    fn save(&self, favorites: &[Recipe]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(favorites)?;
        self.store.put(FAVORITES_KEY, &encoded)?;
        debug!("Saved {} favorite(s)", favorites.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn new_store() -> (Arc<MemoryStore>, FavoritesStore) {
        let backing = Arc::new(MemoryStore::new());
        let favorites = FavoritesStore::new(backing.clone());
        (backing, favorites)
    }

    fn ids(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.recipe_id.as_str()).collect()
    }

    #[test]
    fn test_empty_store_default() {
        let (_, favorites) = new_store();
        assert!(favorites.get_favorites().is_empty());
        assert!(favorites.favorite_ids().is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_, favorites) = new_store();
        let recipe = Recipe::new("1", "Pancakes");

        favorites.add_favorite(&recipe).unwrap();
        let once = favorites.get_favorites();
        favorites.add_favorite(&recipe).unwrap();
        let twice = favorites.get_favorites();

        assert_eq!(ids(&once), vec!["1"]);
        assert_eq!(ids(&twice), vec!["1"]);
    }

    #[test]
    fn test_no_duplicate_ids_for_distinct_values() {
        let (_, favorites) = new_store();
        favorites.add_favorite(&Recipe::new("1", "Pancakes")).unwrap();
        favorites
            .add_favorite(&Recipe::new("1", "Fluffy Pancakes"))
            .unwrap();

        let stored = favorites.get_favorites();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Pancakes");
    }

    #[test]
    fn test_remove_matches_by_id() {
        let (_, favorites) = new_store();
        favorites.add_favorite(&Recipe::new("1", "Pancakes")).unwrap();
        favorites.add_favorite(&Recipe::new("2", "Waffles")).unwrap();

        let mut changed = Recipe::new("1", "Renamed upstream");
        changed.image_url = "http://example.com/other.jpg".to_string();
        favorites.remove_favorite(&changed).unwrap();

        assert_eq!(ids(&favorites.get_favorites()), vec!["2"]);
        assert!(!favorites.is_favorite(&RecipeId::from("1")));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_, favorites) = new_store();
        favorites.add_favorite(&Recipe::new("1", "Pancakes")).unwrap();
        favorites.remove_favorite(&Recipe::new("9", "Other")).unwrap();
        assert_eq!(ids(&favorites.get_favorites()), vec!["1"]);
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let (backing, favorites) = new_store();
        backing.put(FAVORITES_KEY, "{{ definitely not json").unwrap();
        assert!(favorites.get_favorites().is_empty());

        // The next mutation overwrites the corrupt value.
        favorites.add_favorite(&Recipe::new("3", "Stew")).unwrap();
        assert_eq!(ids(&favorites.get_favorites()), vec!["3"]);
    }

    #[test]
    fn test_stored_entries_are_marked_favorite() {
        let (_, favorites) = new_store();
        favorites.add_favorite(&Recipe::new("1", "Pancakes")).unwrap();
        assert!(favorites.get_favorites()[0].is_favorite);
    }

    #[test]
    fn test_toggle_favorite() {
        let (_, favorites) = new_store();
        let recipe = Recipe::new("5", "Curry");

        assert!(favorites.toggle_favorite(&recipe).unwrap());
        assert!(favorites.is_favorite(&recipe.recipe_id));

        assert!(!favorites.toggle_favorite(&recipe).unwrap());
        assert!(favorites.get_favorites().is_empty());
    }

    #[test]
    fn test_clones_share_backing_store() {
        let (_, favorites) = new_store();
        let other = favorites.clone();
        favorites.add_favorite(&Recipe::new("1", "Pancakes")).unwrap();
        assert!(other.is_favorite(&RecipeId::from("1")));
    }
}
