//! UniFFI bindings for recipe-search
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Searches block on a tokio runtime owned by the call; favorites calls are synchronous.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::{FavoritesStore, FileStore, Recipe, RecipeSearchError, SearchConfig};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe summary
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub recipe_id: String,
    pub title: String,
    pub image_url: String,
    pub source_url: String,
    pub publisher: Option<String>,
    pub publisher_url: Option<String>,
    pub f2f_url: Option<String>,
    pub social_rank: Option<f64>,
    pub is_favorite: bool,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            recipe_id: recipe.recipe_id.to_string(),
            title: recipe.title,
            image_url: recipe.image_url,
            source_url: recipe.source_url,
            publisher: recipe.publisher,
            publisher_url: recipe.publisher_url,
            f2f_url: recipe.f2f_url,
            social_rank: recipe.social_rank,
            is_favorite: recipe.is_favorite,
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe {
            recipe_id: ffi.recipe_id.into(),
            title: ffi.title,
            image_url: ffi.image_url,
            source_url: ffi.source_url,
            publisher: ffi.publisher,
            publisher_url: ffi.publisher_url,
            f2f_url: ffi.f2f_url,
            social_rank: ffi.social_rank,
            is_favorite: ffi.is_favorite,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiSearchError {
    /// The search failed; no further detail is available
    SearchFailed,
    /// Favorites could not be written
    StorageError { message: String },
    /// Configuration error (missing API key, bad config file)
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiSearchError::SearchFailed => write!(f, "Something went wrong"),
            FfiSearchError::StorageError { message } => write!(f, "Storage error: {}", message),
            FfiSearchError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiSearchError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiSearchError {}

impl From<RecipeSearchError> for FfiSearchError {
    fn from(err: RecipeSearchError) -> Self {
        match err {
            RecipeSearchError::SearchError(_) => FfiSearchError::SearchFailed,
            RecipeSearchError::StoreError(e) => FfiSearchError::StorageError {
                message: e.to_string(),
            },
            e @ (RecipeSearchError::ConfigError(_)
            | RecipeSearchError::MissingApiKey
            | RecipeSearchError::ClientError(_)) => FfiSearchError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

impl From<crate::StoreError> for FfiSearchError {
    fn from(err: crate::StoreError) -> Self {
        RecipeSearchError::from(err).into()
    }
}

/// Configuration for searching recipes
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiSearchConfig {
    /// API key (uses FOOD2FORK_API_KEY if not specified)
    pub api_key: Option<String>,
    /// API root (uses the default endpoint if not specified)
    pub base_url: Option<String>,
    /// Optional timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Favorites file consulted when marking results
    pub favorites_path: Option<String>,
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiSearchError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiSearchError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn favorites_at(path: String) -> FavoritesStore {
    FavoritesStore::new(Arc::new(FileStore::new(path)))
}

/// Search recipes and mark the ones in the favorites file
///
/// # Arguments
/// * `query` - Free-text search query, sent as-is
/// * `config` - Optional client configuration
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(
    query: String,
    config: Option<FfiSearchConfig>,
) -> Result<Vec<FfiRecipe>, FfiSearchError> {
    let config = config.unwrap_or_default();

    let mut builder = crate::RecipeSearch::builder().config(SearchConfig::default());
    if let Some(api_key) = config.api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(base_url) = config.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(timeout_secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(path) = config.favorites_path {
        builder = builder.favorites_path(path);
    }
    let service = builder.build()?;

    let rt = create_runtime()?;
    let recipes = rt
        .block_on(service.search(&query))
        .map_err(|_| FfiSearchError::SearchFailed)?;
    Ok(recipes.into_iter().map(FfiRecipe::from).collect())
}

/// All recipes stored in the favorites file at `favorites_path`
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_favorites(favorites_path: String) -> Vec<FfiRecipe> {
    favorites_at(favorites_path)
        .get_favorites()
        .into_iter()
        .map(FfiRecipe::from)
        .collect()
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn add_favorite(favorites_path: String, recipe: FfiRecipe) -> Result<(), FfiSearchError> {
    Ok(favorites_at(favorites_path).add_favorite(&recipe.into())?)
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn remove_favorite(favorites_path: String, recipe: FfiRecipe) -> Result<(), FfiSearchError> {
    Ok(favorites_at(favorites_path).remove_favorite(&recipe.into())?)
}

/// Flip a recipe's favorite state; returns true when it is now a favorite
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn toggle_favorite(favorites_path: String, recipe: FfiRecipe) -> Result<bool, FfiSearchError> {
    Ok(favorites_at(favorites_path).toggle_favorite(&recipe.into())?)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
