use thiserror::Error;

/// Errors that can occur while browsing recipes
#[derive(Error, Debug)]
pub enum BrowseError {
    /// The request exceeded the client-side timeout
    #[error("Request timeout")]
    Timeout,

    /// The server answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// A single-recipe fetch came back 404
    #[error("Recipe not found")]
    NotFound,

    /// Connection-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Failed to read the local fallback file
    #[error("Unable to load recipe data: {0}")]
    LocalData(#[from] std::io::Error),

    /// Failed to parse recipe data
    #[error("Failed to parse recipe data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Every source in the fallback chain failed
    #[error("All recipe sources failed: {0}")]
    AllSourcesFailed(String),
}

impl From<reqwest::Error> for BrowseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BrowseError::Timeout
        } else if let Some(status) = err.status() {
            BrowseError::Http(status.as_u16())
        } else {
            BrowseError::Network(err.to_string())
        }
    }
}

impl BrowseError {
    /// Whether the detail page may fall through to the local file.
    /// An explicit 404 never does.
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, BrowseError::NotFound)
    }
}
