use std::sync::Arc;

use log::warn;

use crate::config::BrowseConfig;
use crate::error::BrowseError;
use crate::model::Recipe;
use crate::render;
use crate::sources::{ApiClient, FallbackChain, LocalStore, RecipeSource, SampleSource};

/// Filter button labels mapped to the backend's canonical category strings.
/// Unmapped labels pass through unchanged.
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("Stir-fry Veggies", "Vegetarian"),
    ("Grilled Chicken", "Chicken"),
    ("Pasta", "Pasta"),
    ("Side Dishes", "Side"),
    ("Salads", "Side"),
    ("Red Meat Dishes", "Beef"),
    ("Dessert", "Dessert"),
    ("Chicken", "Chicken"),
    ("Beef", "Beef"),
    ("Seafood", "Seafood"),
    ("Vegetarian", "Vegetarian"),
];

const MAX_VISIBLE_PAGES: usize = 5;
const POPULAR_LIMIT: usize = 4;

/// State of the listing view.
///
/// `filtered` is always derived from `all`; `page` is 1-based and every
/// filter or search action resets it to 1.
#[derive(Debug, Clone)]
pub struct ListState {
    all: Vec<Recipe>,
    filtered: Vec<Recipe>,
    filter: String,
    page: usize,
    page_size: usize,
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        ListState {
            all: Vec::new(),
            filtered: Vec::new(),
            filter: "all".to_string(),
            page: 1,
            page_size,
        }
    }

    /// Replace the loaded set wholesale and reset filter and page.
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        self.all = recipes;
        self.filtered = self.all.clone();
        self.filter = "all".to_string();
        self.page = 1;
    }

    pub fn all(&self) -> &[Recipe] {
        &self.all
    }

    pub fn filtered(&self) -> &[Recipe] {
        &self.filtered
    }

    pub fn current_filter(&self) -> &str {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Apply a category filter button. "all" and "Quick Meal" restore the
    /// unfiltered set; everything else is a case-insensitive substring match
    /// against the mapped canonical category.
    pub fn filter_by_category(&mut self, label: &str) {
        self.page = 1;
        self.filter = label.to_string();

        if label.eq_ignore_ascii_case("all") || label == "Quick Meal" {
            self.filtered = self.all.clone();
            return;
        }

        let canonical = CATEGORY_MAP
            .iter()
            .find(|(name, _)| *name == label)
            .map_or(label, |(_, canonical)| canonical);
        let needle = canonical.to_lowercase();

        self.filtered = self
            .all
            .iter()
            .filter(|recipe| recipe.category.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }

    /// Local text search over title, category, area and ingredient names.
    /// An empty query restores the unfiltered set.
    pub fn search(&mut self, query: &str) {
        self.page = 1;
        let needle = query.trim().to_lowercase();

        if needle.is_empty() {
            self.filtered = self.all.clone();
            return;
        }

        self.filtered = self
            .all
            .iter()
            .filter(|recipe| recipe_matches(recipe, &needle))
            .cloned()
            .collect();
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size)
    }

    /// Recipes on the current page.
    pub fn visible(&self) -> &[Recipe] {
        let start = (self.page - 1) * self.page_size;
        if start >= self.filtered.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    /// Navigate to a page. Out-of-range requests are ignored.
    pub fn go_to_page(&mut self, page: usize) {
        if page < 1 || page > self.total_pages() {
            return;
        }
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// The page numbers to show: at most five consecutive pages centered on
    /// the current one, shifted to stay in range at the edges.
    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages())
    }
}

fn recipe_matches(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe.category.to_lowercase().contains(needle)
        || recipe.area.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ing| ing.name().to_lowercase().contains(needle))
}

fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total);
    if end - start + 1 < MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }
    (start..=end).collect()
}

/// Drives the paginated grid: loads data through the fallback chain and
/// renders the visible slice plus pagination controls.
pub struct ListController {
    api: Arc<ApiClient>,
    chain: FallbackChain,
    placeholder: String,
    pub state: ListState,
}

impl ListController {
    pub fn new(config: &BrowseConfig) -> Result<Self, BrowseError> {
        let api = Arc::new(ApiClient::new(config)?);
        let local = Arc::new(LocalStore::new(config.local_data_path.clone()));
        let chain = FallbackChain::new(vec![
            api.clone() as Arc<dyn RecipeSource>,
            local,
            Arc::new(SampleSource),
        ]);

        Ok(ListController {
            api,
            chain,
            placeholder: config.placeholder_image.clone(),
            state: ListState::new(config.page_size),
        })
    }

    pub fn api(&self) -> Arc<ApiClient> {
        self.api.clone()
    }

    /// Populate the grid: API, then the local file, then the sample set.
    /// The sample source is terminal and never fails.
    pub async fn load(&mut self) -> Result<(), BrowseError> {
        let recipes = self.chain.fetch_all().await?;
        self.state.set_recipes(recipes);
        Ok(())
    }

    /// Grid markup for the current page, or the empty-state message.
    pub fn render_grid(&self) -> String {
        let visible = self.state.visible();
        if visible.is_empty() {
            return "<p class=\"no-results\">No recipes found.</p>".to_string();
        }
        visible
            .iter()
            .map(|recipe| render::grid_card(recipe, &self.placeholder))
            .collect()
    }

    /// Pagination controls. Empty when everything fits on one page.
    pub fn render_pagination(&self) -> String {
        let total = self.state.total_pages();
        if total <= 1 {
            return String::new();
        }

        let page = self.state.current_page();
        let shown = self.state.visible().len();
        let first = (page - 1) * self.state.page_size + 1;
        let last = first + shown - 1;

        let mut out = String::new();
        out.push_str("<div class=\"pagination-container\">\n");
        out.push_str(&format!(
            "    <div class=\"pagination-info\">Showing {first}-{last} of {} recipes</div>\n",
            self.state.filtered.len()
        ));
        out.push_str("    <div class=\"pagination-buttons\">\n");
        out.push_str(&format!(
            "        <button class=\"pagination-btn\" data-page=\"{}\"{}>\u{2190} Previous</button>\n",
            page.saturating_sub(1),
            if page == 1 { " disabled" } else { "" }
        ));
        for number in self.state.page_numbers() {
            out.push_str(&format!(
                "        <button class=\"pagination-btn page-number{}\" data-page=\"{number}\">{number}</button>\n",
                if number == page { " active" } else { "" }
            ));
        }
        out.push_str(&format!(
            "        <button class=\"pagination-btn\" data-page=\"{}\"{}>Next \u{2192}</button>\n",
            page + 1,
            if page == total { " disabled" } else { "" }
        ));
        out.push_str("    </div>\n</div>\n");
        out
    }

    /// Popular row: the backend's ranking when it answers, otherwise the
    /// longest-instruction recipes from the loaded set.
    pub async fn render_popular(&self) -> String {
        match self.api.popular(POPULAR_LIMIT).await {
            Ok(hits) => hits
                .into_iter()
                .map(Recipe::from)
                .map(|recipe| render::compact_card(&recipe, &self.placeholder))
                .collect(),
            Err(e) => {
                warn!("Popular endpoint unavailable, using local ranking: {}", e);
                let mut recipes: Vec<&Recipe> = self.state.all().iter().collect();
                recipes.sort_by_key(|r| {
                    std::cmp::Reverse(r.instructions.as_deref().map_or(0, str::len))
                });
                recipes
                    .into_iter()
                    .take(POPULAR_LIMIT)
                    .map(|recipe| render::compact_card(recipe, &self.placeholder))
                    .collect()
            }
        }
    }

    /// Sidebar panel picked from the loaded set. The caller supplies the
    /// seed so the pick stays deterministic under test.
    pub fn render_recipe_of_the_day(&self, seed: u64) -> Option<String> {
        let all = self.state.all();
        if all.is_empty() {
            return None;
        }
        let recipe = &all[(seed % all.len() as u64) as usize];
        Some(render::day_panel(recipe, &self.placeholder))
    }
}
