use serde::{Deserialize, Serialize};

/// One dish, as served by the recipe API and the bundled fallback file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Ingredient entries arrive in two shapes: a bare string, or an object
/// pairing the ingredient with a measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    Plain(String),
    Detailed {
        ingredient: String,
        #[serde(default)]
        measure: Option<String>,
    },
}

impl Ingredient {
    pub fn name(&self) -> &str {
        match self {
            Ingredient::Plain(name) => name,
            Ingredient::Detailed { ingredient, .. } => ingredient,
        }
    }

    /// The measure, if present and not just whitespace.
    pub fn measure(&self) -> Option<&str> {
        match self {
            Ingredient::Plain(_) => None,
            Ingredient::Detailed { measure, .. } => {
                measure.as_deref().filter(|m| !m.trim().is_empty())
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name().trim().is_empty()
    }
}

/// One row of a search response from `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub score: f32,
}

impl From<SearchHit> for Recipe {
    fn from(hit: SearchHit) -> Self {
        Recipe {
            id: hit.id,
            title: hit.title,
            category: hit.category,
            area: hit.area,
            instructions: None,
            ingredients: Vec::new(),
            image: hit.image,
        }
    }
}
