//! Server-side page-data loader for recipe detail pages.
//!
//! The host framework calls [`PageLoader::load`] with the route parameters of
//! a `/recipe/[id]` route; the loader fetches `{base_url}/api/recipe/{id}` and
//! returns the parsed JSON body as page data.
//!
//! ```no_run
//! use recipe_loader::{PageLoader, RecipeLoader, RouteParams};
//!
//! # async fn run() -> Result<(), recipe_loader::LoadError> {
//! let loader = RecipeLoader::builder()
//!     .base_url("http://localhost:8000")
//!     .build()?;
//! let data = loader.load(&RouteParams::new().with("id", "42")).await?;
//! println!("{data}");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod loader;
pub mod params;

pub use builder::RecipeLoaderBuilder;
pub use crate::config::LoaderConfig;
pub use error::LoadError;
pub use loader::{PageLoader, RecipeLoader};
pub use params::RouteParams;

use serde_json::Value;

/// Fetch a recipe using configuration from `recipe_loader.toml` and the
/// environment
pub async fn load_recipe(id: &str) -> Result<Value, LoadError> {
    let config = LoaderConfig::load()?;
    RecipeLoader::from_config(&config)?.fetch_recipe(id).await
}
