use async_trait::async_trait;
use log::debug;
use tokio::fs;

use crate::error::BrowseError;
use crate::model::Recipe;
use crate::sources::RecipeSource;

/// Loader for the bundled JSON fallback file.
///
/// No cache: the file is re-read on every call.
pub struct LocalStore {
    path: String,
}

impl LocalStore {
    pub fn new(path: impl Into<String>) -> Self {
        LocalStore { path: path.into() }
    }

    pub async fn load_all(&self) -> Result<Vec<Recipe>, BrowseError> {
        let raw = fs::read_to_string(&self.path).await?;
        let recipes: Vec<Recipe> = serde_json::from_str(&raw)?;
        debug!("Loaded {} recipes from {}", recipes.len(), self.path);
        Ok(recipes)
    }

    /// Linear scan for the recipe with the given id.
    pub async fn find_by_id(&self, id: &str) -> Result<Recipe, BrowseError> {
        let recipes = self.load_all().await?;
        recipes
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(BrowseError::NotFound)
    }
}

#[async_trait]
impl RecipeSource for LocalStore {
    fn source_name(&self) -> &str {
        "local"
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>, BrowseError> {
        self.load_all().await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Recipe, BrowseError> {
        self.find_by_id(id).await
    }
}
