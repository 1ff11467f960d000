pub mod config;
pub mod controllers;
pub mod error;
pub mod model;
pub mod render;
pub mod sources;

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

pub use crate::config::BrowseConfig;
pub use crate::controllers::{
    DetailController, DropdownEvent, ListController, ListState, SearchMode, SuggestController,
};
pub use crate::error::BrowseError;
pub use crate::model::{Ingredient, Recipe, SearchHit};

/// Build the full listing page markup: recipe-of-the-day panel, popular row,
/// the paginated grid and its controls.
///
/// Data comes from the configured fallback chain (API, then the local file,
/// then the built-in sample set), so this always renders something.
pub async fn browse(config: &BrowseConfig) -> Result<String, BrowseError> {
    let mut controller = ListController::new(config)?;
    controller.load().await?;
    debug!(
        "Rendering page {} of {}",
        controller.state.current_page(),
        controller.state.total_pages()
    );

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());

    let mut page = String::new();
    if let Some(panel) = controller.render_recipe_of_the_day(seed) {
        page.push_str(&panel);
    }
    page.push_str(&controller.render_popular().await);
    page.push_str(&controller.render_grid());
    page.push_str(&controller.render_pagination());
    Ok(page)
}

/// Build the detail page markup for one recipe, with optional keyword
/// highlighting carried over from a search.
pub async fn recipe_page(
    config: &BrowseConfig,
    id: &str,
    keyword: Option<&str>,
) -> Result<String, BrowseError> {
    let controller = DetailController::new(config)?;
    Ok(controller.render_page(id, keyword).await)
}
