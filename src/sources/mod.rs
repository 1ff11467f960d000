mod api;
mod local;
mod sample;

pub use api::ApiClient;
pub use local::LocalStore;
pub use sample::{sample_recipes, SampleSource};

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::error::BrowseError;
use crate::model::Recipe;

/// Unified seam over the places recipe data can come from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short name used in log output (e.g. "api", "local")
    fn source_name(&self) -> &str;

    /// Fetch the full recipe set
    async fn fetch_all(&self) -> Result<Vec<Recipe>, BrowseError>;

    /// Fetch a single recipe by its id
    async fn fetch_by_id(&self, id: &str) -> Result<Recipe, BrowseError>;
}

/// Ordered chain of recipe sources tried until one succeeds.
///
/// Each source gets exactly one attempt. No retries, no backoff.
pub struct FallbackChain {
    sources: Vec<Arc<dyn RecipeSource>>,
}

impl FallbackChain {
    pub fn new(sources: Vec<Arc<dyn RecipeSource>>) -> Self {
        FallbackChain { sources }
    }

    /// Walk the chain and return the first full recipe set that loads.
    pub async fn fetch_all(&self) -> Result<Vec<Recipe>, BrowseError> {
        let mut failures: Vec<String> = Vec::new();

        for source in &self.sources {
            match source.fetch_all().await {
                Ok(recipes) => {
                    info!(
                        "Loaded {} recipes from {}",
                        recipes.len(),
                        source.source_name()
                    );
                    return Ok(recipes);
                }
                Err(e) => {
                    warn!("Recipe source '{}' failed: {}", source.source_name(), e);
                    failures.push(format!("{}: {}", source.source_name(), e));
                }
            }
        }

        Err(BrowseError::AllSourcesFailed(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl RecipeSource for FailingSource {
        fn source_name(&self) -> &str {
            "failing"
        }

        async fn fetch_all(&self) -> Result<Vec<Recipe>, BrowseError> {
            Err(BrowseError::Network("unreachable".to_string()))
        }

        async fn fetch_by_id(&self, _id: &str) -> Result<Recipe, BrowseError> {
            Err(BrowseError::Network("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_chain_falls_through_to_sample() {
        let chain = FallbackChain::new(vec![Arc::new(FailingSource), Arc::new(SampleSource)]);
        let recipes = chain.fetch_all().await.unwrap();
        assert_eq!(recipes.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_chain_reports_failure() {
        let chain = FallbackChain::new(vec![Arc::new(FailingSource)]);
        let err = chain.fetch_all().await.unwrap_err();
        assert!(matches!(err, BrowseError::AllSourcesFailed(_)));
        assert!(err.to_string().contains("failing"));
    }
}
