use std::sync::Arc;

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;

use crate::config::BrowseConfig;
use crate::error::BrowseError;
use crate::model::Recipe;
use crate::render::{self, highlight, render_instructions, GRID_CARD};
use crate::sources::{ApiClient, LocalStore};

/// Resolves and renders a single recipe page.
pub struct DetailController {
    api: Arc<ApiClient>,
    store: LocalStore,
    placeholder: String,
}

impl DetailController {
    pub fn new(config: &BrowseConfig) -> Result<Self, BrowseError> {
        Ok(DetailController {
            api: Arc::new(ApiClient::new(config)?),
            store: LocalStore::new(config.local_data_path.clone()),
            placeholder: config.placeholder_image.clone(),
        })
    }

    pub fn with_sources(api: Arc<ApiClient>, store: LocalStore, placeholder: String) -> Self {
        DetailController {
            api,
            store,
            placeholder,
        }
    }

    /// Resolve a recipe by id: API first, then the local file.
    ///
    /// An explicit 404 from the API fails immediately without touching the
    /// local file; only transient failures fall through.
    pub async fn resolve(&self, id: &str) -> Result<Recipe, BrowseError> {
        match self.api.get_recipe(id).await {
            Ok(recipe) => Ok(recipe),
            Err(err) if !err.allows_fallback() => Err(err),
            Err(err) => {
                warn!("API recipe fetch failed, trying local data: {}", err);
                self.store.find_by_id(id).await
            }
        }
    }

    /// Resolve and render in one step, turning failures into the page's
    /// error fragment instead of propagating them.
    pub async fn render_page(&self, id: &str, keyword: Option<&str>) -> String {
        match self.resolve(id).await {
            Ok(recipe) => self.render(&recipe, keyword),
            Err(err) => self.render_error(&err),
        }
    }

    /// Detail markup with optional keyword highlighting across title,
    /// category, area, ingredients and instructions.
    pub fn render(&self, recipe: &Recipe, keyword: Option<&str>) -> String {
        let keyword = keyword.unwrap_or("");
        let instructions = recipe.instructions.as_deref();
        let minutes = render::estimated_minutes(instructions, &GRID_CARD);
        let image = recipe.image.as_deref().unwrap_or(&self.placeholder);

        let mut ingredients = String::new();
        for ing in recipe.ingredients.iter().filter(|ing| !ing.is_blank()) {
            ingredients.push_str("        <li>\n");
            if let Some(measure) = ing.measure() {
                ingredients.push_str(&format!(
                    "            <span class=\"ingredient-measure\">{}</span>\n",
                    highlight(measure, keyword)
                ));
            }
            ingredients.push_str(&format!(
                "            <span class=\"ingredient-name\">{}</span>\n        </li>\n",
                highlight(ing.name(), keyword)
            ));
        }
        if ingredients.is_empty() {
            ingredients.push_str("        <li>Ingredient information not available</li>\n");
        }

        format!(
            concat!(
                "<a href=\"/\" class=\"back-button\">\u{2190} Back</a>\n",
                "<div class=\"recipe-header\">\n",
                "    <h1>{title}</h1>\n",
                "    <div class=\"recipe-meta\">\n",
                "        <div class=\"recipe-meta-item\"><strong>Category:</strong> {category}</div>\n",
                "        <div class=\"recipe-meta-item\"><strong>Cuisine:</strong> {area}</div>\n",
                "        <div class=\"recipe-meta-item\"><strong>Time:</strong> ~{minutes} mins</div>\n",
                "    </div>\n",
                "</div>\n",
                "<div class=\"recipe-image-container\">\n",
                "    <img src=\"{image}\" alt=\"{alt}\" data-fallback-src=\"{placeholder}\" />\n",
                "</div>\n",
                "<div class=\"recipe-content\">\n",
                "    <div class=\"recipe-sidebar\">\n",
                "        <h2>Ingredients</h2>\n",
                "        <ul class=\"ingredients-list\">\n",
                "{ingredients}",
                "        </ul>\n",
                "    </div>\n",
                "    <div class=\"recipe-main\">\n",
                "        <h2>Instructions</h2>\n",
                "        <div class=\"instructions\">{instructions}</div>\n",
                "    </div>\n",
                "</div>\n",
            ),
            title = highlight(&recipe.title, keyword),
            category = highlight(&recipe.category, keyword),
            area = highlight(&recipe.area, keyword),
            minutes = minutes,
            image = encode_double_quoted_attribute(image),
            alt = encode_double_quoted_attribute(&recipe.title),
            placeholder = encode_double_quoted_attribute(&self.placeholder),
            ingredients = ingredients,
            instructions = render_instructions(instructions, Some(keyword)),
        )
    }

    /// Error fragment shown in place of the detail view.
    pub fn render_error(&self, err: &BrowseError) -> String {
        let message = match err {
            BrowseError::NotFound => "Recipe not found",
            _ => "Unable to load recipe. Please try again later.",
        };
        format!(
            concat!(
                "<div class=\"error\">\n",
                "    <p>{message}</p>\n",
                "    <a href=\"/\" class=\"back-button\">\u{2190} Back to Home</a>\n",
                "</div>\n",
            ),
            message = encode_text(message),
        )
    }
}
