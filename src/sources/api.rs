use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::config::BrowseConfig;
use crate::error::BrowseError;
use crate::model::{Recipe, SearchHit};
use crate::sources::RecipeSource;

/// Client for the recipe backend API.
///
/// Every request is bounded by the configured client-side timeout; timeouts
/// surface as [`BrowseError::Timeout`] rather than a generic network error.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NewsletterResponse {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &BrowseConfig) -> Result<Self, BrowseError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(ApiClient {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Text search via `POST /search`
    pub async fn search_by_text(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchHit>, BrowseError> {
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&json!({ "query": query, "top_k": top_k }))
            .send()
            .await?;
        let response = check_status(response)?;
        let hits: Vec<SearchHit> = response.json().await?;
        debug!("Text search '{}' returned {} hits", query, hits.len());
        Ok(hits)
    }

    /// Ingredient search rides the same `/search` route, carrying the
    /// ingredient list alongside a joined query string.
    pub async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<SearchHit>, BrowseError> {
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&json!({
                "query": ingredients.join(", "),
                "top_k": 50,
                "ingredients": ingredients,
            }))
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// List recipes with category filter and pagination, `GET /recipes`
    pub async fn list_recipes(
        &self,
        category: &str,
        page: usize,
        limit: usize,
    ) -> Result<Vec<Recipe>, BrowseError> {
        let response = self
            .client
            .get(format!("{}/recipes", self.base_url))
            .query(&[
                ("category", category),
                ("page", &page.to_string()),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Fetch one recipe by id, `GET /recipes/:id`. A 404 is a distinct
    /// not-found condition, not a generic HTTP failure.
    pub async fn get_recipe(&self, id: &str) -> Result<Recipe, BrowseError> {
        let response = self
            .client
            .get(format!(
                "{}/recipes/{}",
                self.base_url,
                urlencoding::encode(id)
            ))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BrowseError::NotFound);
        }
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Popular recipes, `GET /popular`
    pub async fn popular(&self, limit: usize) -> Result<Vec<SearchHit>, BrowseError> {
        let response = self
            .client
            .get(format!("{}/popular", self.base_url))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Available categories, `GET /categories`
    pub async fn list_categories(&self) -> Result<Vec<String>, BrowseError> {
        let response = self
            .client
            .get(format!("{}/categories", self.base_url))
            .send()
            .await?;
        let response = check_status(response)?;
        let body: CategoriesResponse = response.json().await?;
        Ok(body.categories)
    }

    /// Subscribe an email address to the newsletter
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<String, BrowseError> {
        let response = self
            .client
            .post(format!("{}/newsletter/subscribe", self.base_url))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        let response = check_status(response)?;
        let body: NewsletterResponse = response.json().await?;
        Ok(body
            .message
            .unwrap_or_else(|| "Subscribed successfully".to_string()))
    }

    /// Liveness probe, `GET /health`. Swallows every error.
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

fn check_status(response: Response) -> Result<Response, BrowseError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BrowseError::Http(status.as_u16()))
    }
}

#[async_trait]
impl RecipeSource for ApiClient {
    fn source_name(&self) -> &str {
        "api"
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>, BrowseError> {
        let response = self
            .client
            .get(format!("{}/recipes", self.base_url))
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Recipe, BrowseError> {
        self.get_recipe(id).await
    }
}
