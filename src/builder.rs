use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    FavoritesStore, FileStore, Food2ForkClient, KeyValueStore, RecipeApi, RecipeSearchError,
    RecipeSearchService, SearchConfig,
};

/// Where the favorites are persisted
#[derive(Clone, Default)]
enum FavoritesBackend {
    /// Use the configured favorites file
    #[default]
    Configured,
    /// Use a specific file
    File(PathBuf),
    /// Use a caller-provided store
    Store(Arc<dyn KeyValueStore>),
}

/// Builder for wiring a [`RecipeSearchService`] from configuration
#[derive(Default)]
pub struct RecipeSearchBuilder {
    config: Option<SearchConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    favorites: FavoritesBackend,
    api: Option<Arc<dyn RecipeApi>>,
}

impl RecipeSearchBuilder {
    /// Start from an explicit configuration instead of loading one
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key sent with every search
    ///
    /// # Example
    /// ```
    /// use recipe_search::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at a different API root
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests, overriding the configured whole seconds
    ///
    /// # Example
    /// ```
    /// use recipe_search::RecipeSearch;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeSearch::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Persist favorites in `path`
    pub fn favorites_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.favorites = FavoritesBackend::File(path.into());
        self
    }

    /// Persist favorites in a caller-provided store
    pub fn favorites_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.favorites = FavoritesBackend::Store(store);
        self
    }

    /// Use a caller-provided API client; the key, base URL and timeout are then ignored
    pub fn api(mut self, api: Arc<dyn RecipeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the service
    ///
    /// # Errors
    /// Returns `RecipeSearchError` if:
    /// - No configuration was given and loading it fails
    /// - No API key is available and no client was provided
    /// - The HTTP client cannot be constructed
    pub fn build(self) -> Result<RecipeSearchService, RecipeSearchError> {
        let mut config = match self.config {
            Some(config) => config,
            None => SearchConfig::load()?,
        };

        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        let timeout = self.timeout.unwrap_or_else(|| config.timeout());

        let store: Arc<dyn KeyValueStore> = match self.favorites {
            FavoritesBackend::Configured => Arc::new(FileStore::new(config.favorites_path.clone())),
            FavoritesBackend::File(path) => Arc::new(FileStore::new(path)),
            FavoritesBackend::Store(store) => store,
        };

        let api: Arc<dyn RecipeApi> = match self.api {
            Some(api) => api,
            None => Arc::new(Food2ForkClient::with_timeout(&config, timeout)?),
        };

        Ok(RecipeSearchService::new(api, FavoritesStore::new(store)))
    }
}

/// Main entry point for the builder API
pub struct RecipeSearch;

impl RecipeSearch {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_search::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder();
    /// ```
    pub fn builder() -> RecipeSearchBuilder {
        RecipeSearchBuilder::default()
    }
}
