use std::time::Duration;

use reqwest::{Client, Url};

use crate::config::{LoaderConfig, DEFAULT_BASE_URL};
use crate::{LoadError, RecipeLoader};

/// Builder for configuring a [`RecipeLoader`]
#[derive(Debug, Default)]
pub struct RecipeLoaderBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl RecipeLoaderBuilder {
    /// Set the base URL of the recipe API
    ///
    /// # Example
    /// ```
    /// use recipe_loader::RecipeLoader;
    ///
    /// let builder = RecipeLoader::builder()
    ///     .base_url("http://localhost:8000");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for the request
    ///
    /// Without one, or with a zero duration, the loader waits for the
    /// upstream indefinitely.
    ///
    /// # Example
    /// ```
    /// use recipe_loader::RecipeLoader;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeLoader::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use a prebuilt HTTP client. A timeout set on the builder is ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Apply values from a [`LoaderConfig`]
    pub fn config(mut self, config: &LoaderConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = config.timeout_duration();
        self
    }

    /// Build the loader
    ///
    /// # Errors
    /// Returns `BuilderError` if the base URL is empty or unparseable, or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<RecipeLoader, LoadError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(LoadError::BuilderError(
                "Base URL must not be empty".to_string(),
            ));
        }
        Url::parse(&base_url)
            .map_err(|e| LoadError::BuilderError(format!("Invalid base URL '{base_url}': {e}")))?;

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.timeout.filter(|t| !t.is_zero()) {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    LoadError::BuilderError(format!("Failed to create HTTP client: {e}"))
                })?
            }
        };

        Ok(RecipeLoader::new(client, base_url))
    }
}
