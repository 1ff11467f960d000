use async_trait::async_trait;

use crate::error::BrowseError;
use crate::model::{Ingredient, Recipe};
use crate::sources::RecipeSource;

/// Terminal fallback: a fixed sample set shown when both the API and the
/// local file are unavailable.
pub struct SampleSource;

#[async_trait]
impl RecipeSource for SampleSource {
    fn source_name(&self) -> &str {
        "sample"
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>, BrowseError> {
        Ok(sample_recipes())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Recipe, BrowseError> {
        sample_recipes()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(BrowseError::NotFound)
    }
}

/// The built-in sample recipes.
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".to_string(),
            title: "The Secret to Perfectly Make Avocado Tofu".to_string(),
            category: "Vegetarian".to_string(),
            area: "Japanese".to_string(),
            instructions: Some(
                "Slice the tofu into even cubes and pat dry. Halve the avocado and scoop \
                 into a bowl. Whisk soy sauce, sesame oil and lime juice, then toss \
                 everything gently and top with sesame seeds."
                    .to_string(),
            ),
            ingredients: vec![
                Ingredient::Detailed {
                    ingredient: "Tofu".to_string(),
                    measure: Some("300g".to_string()),
                },
                Ingredient::Detailed {
                    ingredient: "Avocado".to_string(),
                    measure: Some("1".to_string()),
                },
                Ingredient::Plain("Soy sauce".to_string()),
                Ingredient::Plain("Sesame seeds".to_string()),
            ],
            image: Some("assets/images/thai-green-curry.png".to_string()),
        },
        Recipe {
            id: "2".to_string(),
            title: "Make sesame fulfilling dumplings".to_string(),
            category: "Side".to_string(),
            area: "Chinese".to_string(),
            instructions: Some(
                "Mix the filling, spoon into wrappers, fold and steam for eight minutes. \
                 Serve with a sesame dipping sauce."
                    .to_string(),
            ),
            ingredients: vec![
                Ingredient::Plain("Dumpling wrappers".to_string()),
                Ingredient::Plain("Ground pork".to_string()),
                Ingredient::Plain("Sesame oil".to_string()),
            ],
            image: Some("assets/images/scrambled-eggs.png".to_string()),
        },
        Recipe {
            id: "3".to_string(),
            title: "Mastering the Art of Homemade Pizza".to_string(),
            category: "Pasta".to_string(),
            area: "Italian".to_string(),
            instructions: Some(
                "Dissolve the yeast in warm water and knead with flour, salt and olive oil \
                 until smooth. Let the dough rise for an hour, then stretch it thin on a \
                 floured surface. Spread the tomato sauce, tear the mozzarella over the top \
                 and bake on a preheated stone at the highest oven setting until the crust \
                 blisters. Finish with fresh basil."
                    .to_string(),
            ),
            ingredients: vec![
                Ingredient::Detailed {
                    ingredient: "Flour".to_string(),
                    measure: Some("500g".to_string()),
                },
                Ingredient::Detailed {
                    ingredient: "Mozzarella".to_string(),
                    measure: Some("200g".to_string()),
                },
                Ingredient::Plain("Tomato sauce".to_string()),
                Ingredient::Plain("Fresh basil".to_string()),
            ],
            image: Some("assets/images/margherita-pizza.png".to_string()),
        },
        Recipe {
            id: "4".to_string(),
            title: "How to Make the Perfect Fruit Mix".to_string(),
            category: "Dessert".to_string(),
            area: "American".to_string(),
            instructions: Some(
                "Dice the fruit into bite-sized pieces, squeeze over fresh orange juice \
                 and chill before serving."
                    .to_string(),
            ),
            ingredients: vec![
                Ingredient::Plain("Seasonal fruit".to_string()),
                Ingredient::Plain("Orange juice".to_string()),
                Ingredient::Plain("Mint".to_string()),
            ],
            image: Some("assets/images/thai-green-curry.png".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_has_four_recipes() {
        assert_eq!(sample_recipes().len(), 4);
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let recipes = sample_recipes();
        let mut ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), recipes.len());
    }

    #[tokio::test]
    async fn test_sample_source_never_fails() {
        let recipes = SampleSource.fetch_all().await.unwrap();
        assert!(!recipes.is_empty());
    }
}
