use thiserror::Error;

/// The single failure signal a search can produce.
///
/// Transport failures, non-success statuses and unreadable bodies all collapse
/// into this value. The underlying cause is logged where it happens and is not
/// carried to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Something went wrong while searching for recipes")]
pub struct SearchError;

/// Why a request to the remote search API failed
#[derive(Error, Debug)]
pub enum FetchError {
    /// Could not reach the API or read its response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Search API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The body was absent or not a recipe list
    #[error("Invalid response body: {0}")]
    Body(#[from] serde_json::Error),
}

impl From<FetchError> for SearchError {
    fn from(_: FetchError) -> Self {
        SearchError
    }
}

/// Errors raised by a persisted key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage
    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing file exists but is not a string map
    #[error("Storage file {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },
}

/// Top-level error for setting up the recipe repository
#[derive(Error, Debug)]
pub enum RecipeSearchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// No API key in configuration or environment
    #[error("Missing API key: set RECIPE_SEARCH__API_KEY or FOOD2FORK_API_KEY")]
    MissingApiKey,

    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    ClientError(#[from] reqwest::Error),

    /// Favorites storage error
    #[error("Storage error: {0}")]
    StoreError(#[from] StoreError),

    /// A search failed
    #[error(transparent)]
    SearchError(#[from] SearchError),
}
