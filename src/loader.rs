use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use crate::builder::RecipeLoaderBuilder;
use crate::config::LoaderConfig;
use crate::{LoadError, RouteParams};

/// A server-side loader invoked by the host framework before a page renders.
///
/// The returned value becomes the page data handed to the template.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, params: &RouteParams) -> Result<Value, LoadError>;
}

/// Loads recipe detail data from the recipe API
///
/// Holds no state besides the HTTP client, so one instance can serve
/// concurrent renders. Nothing is cached: every call issues one request.
#[derive(Debug, Clone)]
pub struct RecipeLoader {
    client: Client,
    base_url: String,
}

impl RecipeLoader {
    pub(crate) fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn builder() -> RecipeLoaderBuilder {
        RecipeLoaderBuilder::default()
    }

    /// Create a loader from a [`LoaderConfig`]
    pub fn from_config(config: &LoaderConfig) -> Result<Self, LoadError> {
        Self::builder().config(config).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the recipe resource. `id` is inserted verbatim.
    pub fn recipe_url(&self, id: &str) -> String {
        format!("{}/api/recipe/{}", self.base_url, id)
    }

    /// Fetch a single recipe by id
    ///
    /// The body is parsed as JSON whatever the status. A non-success status
    /// yields [`LoadError::Upstream`] with the parsed body as payload.
    pub async fn fetch_recipe(&self, id: &str) -> Result<Value, LoadError> {
        let url = self.recipe_url(id);
        debug!("Fetching recipe from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Upstream responded with {} ({} bytes)", status, body.len());

        let data: Value = serde_json::from_slice(&body)?;

        if status.is_success() {
            Ok(data)
        } else {
            warn!("Loading recipe '{}' failed with {}: {}", id, status, data);
            Err(LoadError::Upstream {
                status,
                payload: data,
            })
        }
    }
}

#[async_trait]
impl PageLoader for RecipeLoader {
    async fn load(&self, params: &RouteParams) -> Result<Value, LoadError> {
        let id = params.id()?;
        self.fetch_recipe(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[test]
    fn test_recipe_url_verbatim() {
        let loader = RecipeLoader::new(Client::new(), "http://localhost:8000".to_string());
        assert_eq!(
            loader.recipe_url("0a1b-2c3d"),
            "http://localhost:8000/api/recipe/0a1b-2c3d"
        );
    }

    #[tokio::test]
    async fn test_load_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/recipe/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"Soup","servings":4}"#)
            .expect(1)
            .create_async()
            .await;

        let loader = RecipeLoader::builder().base_url(server.url()).build().unwrap();
        let params = RouteParams::new().with("id", "42");
        let data = loader.load(&params).await.unwrap();

        assert_eq!(data, json!({"name": "Soup", "servings": 4}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_load_missing_id_sends_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let loader = RecipeLoader::builder().base_url(server.url()).build().unwrap();
        let result = loader.load(&RouteParams::new()).await;

        assert!(matches!(result, Err(LoadError::MissingParam(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_null_body_is_success() {
        // The API answers unknown ids with 200 and `null`
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/recipe/unknown")
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let loader = RecipeLoader::builder().base_url(server.url()).build().unwrap();
        let data = loader.fetch_recipe("unknown").await.unwrap();
        assert!(data.is_null());
    }
}
