use crate::config::SearchConfig;
use crate::error::{FetchError, RecipeSearchError};
use crate::model::RecipesContainer;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Remote recipe search endpoint
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Run one search for `query` and return the recipes in response order
    async fn search(&self, query: &str) -> Result<RecipesContainer, FetchError>;
}

/// Client for a Food2Fork-style `search?key=..&q=..` API
pub struct Food2ForkClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Food2ForkClient {
    /// Create a client from configuration
    pub fn new(config: &SearchConfig) -> Result<Self, RecipeSearchError> {
        Self::with_timeout(config, config.timeout())
    }

    /// Create a client from configuration with an explicit request timeout
    pub fn with_timeout(
        config: &SearchConfig,
        timeout: Duration,
    ) -> Result<Self, RecipeSearchError> {
        let api_key = config
            .resolve_api_key()
            .ok_or(RecipeSearchError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Food2ForkClient {
            client,
            api_key,
            base_url: config.base_url.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Food2ForkClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RecipeApi for Food2ForkClient {
    async fn search(&self, query: &str) -> Result<RecipesContainer, FetchError> {
        debug!("Searching recipes for {:?}", query);

        let response = self
            .client
            .get(self.search_url())
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let container: RecipesContainer = serde_json::from_str(&body)?;
        debug!("Search returned {} recipe(s)", container.recipes.len());
        Ok(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_search_sends_key_and_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "fake_api_key".into()),
                Matcher::UrlEncoded("q".into(), "chicken soup".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"count": 1, "recipes": [{"recipe_id": "1", "title": "Soup"}]}"#)
            .create_async()
            .await;

        let client = Food2ForkClient::with_base_url("fake_api_key".to_string(), server.url());
        let container = client.search("chicken soup").await.unwrap();

        assert_eq!(container.recipes.len(), 1);
        assert_eq!(container.recipes[0].title, "Soup");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_status_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": "limit"}"#)
            .create_async()
            .await;

        let client = Food2ForkClient::with_base_url("fake_api_key".to_string(), server.url());
        let result = client.search("pie").await;

        assert!(matches!(result, Err(FetchError::Status(s)) if s.as_u16() == 403));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_unparseable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = Food2ForkClient::with_base_url("fake_api_key".to_string(), server.url());
        assert!(matches!(
            client.search("pie").await,
            Err(FetchError::Body(_))
        ));
    }

    #[tokio::test]
    async fn test_search_empty_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .create_async()
            .await;

        let client = Food2ForkClient::with_base_url("fake_api_key".to_string(), server.url());
        assert!(client.search("pie").await.is_err());
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let client = Food2ForkClient::with_base_url(
            "k".to_string(),
            "http://localhost/api/".to_string(),
        );
        assert_eq!(client.search_url(), "http://localhost/api/search");
    }

    #[test]
    fn test_new_requires_api_key() {
        let _env = crate::config::ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let original_key = std::env::var(crate::config::API_KEY_ENV).ok();
        std::env::remove_var(crate::config::API_KEY_ENV);

        let result = Food2ForkClient::new(&SearchConfig::default());
        assert!(matches!(result, Err(RecipeSearchError::MissingApiKey)));

        if let Some(key) = original_key {
            std::env::set_var(crate::config::API_KEY_ENV, key);
        }
    }
}
