use std::collections::BTreeMap;

use log::warn;

use crate::catalog::RecipeCatalog;
use crate::error::CatalogError;
use crate::models::{MealCategory, Recipe};

/// Read-only recipe catalog held in memory.
///
/// Only the current (highest) version of each recipe identity is kept.
pub struct InMemoryCatalog {
    /// Current recipes keyed by identity.
    recipes: BTreeMap<u32, Recipe>,
}

impl InMemoryCatalog {
    /// Create a catalog from recipes, keeping the highest version per identity.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut map: BTreeMap<u32, Recipe> = BTreeMap::new();
        for recipe in recipes {
            match map.get(&recipe.id) {
                Some(existing) if existing.version >= recipe.version => {}
                _ => {
                    map.insert(recipe.id, recipe);
                }
            }
        }
        Self { recipes: map }
    }

    /// Get the current version of a recipe.
    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    /// All current recipes in identity order.
    pub fn all_recipes(&self) -> Vec<&Recipe> {
        self.recipes.values().collect()
    }

    /// Count of current recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the catalog holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCatalog for InMemoryCatalog {
    fn recipes_by_category(&self, category: MealCategory) -> Result<Vec<Recipe>, CatalogError> {
        let matching: Vec<Recipe> = self
            .recipes
            .values()
            .filter(|r| r.matches(category))
            .filter(|r| {
                if r.ingredients.is_empty() {
                    warn!(
                        "Skipping recipe {} '{}' v{}: no ingredients",
                        r.id, r.title, r.version
                    );
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect();

        if matching.is_empty() {
            return Err(CatalogError::NotFound(category));
        }
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, NutrientProfile, RecipeIngredient};

    fn item() -> RecipeIngredient {
        RecipeIngredient {
            ingredient: Ingredient {
                id: 1,
                name: "Egg".to_string(),
                price_per_unit: 30,
                unit_class: "mass".to_string(),
                nutrient_unit: "kg".to_string(),
                nutrients: NutrientProfile::default(),
            },
            quantity: 0.1,
            unit: "kg".to_string(),
        }
    }

    fn recipe(id: u32, version: u32, title: &str, breakfast: bool) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            description: String::new(),
            servings: 1,
            preparation_time: 5,
            ingredients: vec![item()],
            is_breakfast: breakfast,
            is_lunch: !breakfast,
            is_dinner: false,
            is_snack: false,
            version,
        }
    }

    #[test]
    fn test_keeps_highest_version() {
        let catalog = InMemoryCatalog::new(vec![
            recipe(1, 2, "Omelette v2", true),
            recipe(1, 1, "Omelette v1", true),
            recipe(1, 3, "Omelette v3", true),
            recipe(2, 1, "Salad", false),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().title, "Omelette v3");
    }

    #[test]
    fn test_recipes_by_category_filters() {
        let catalog = InMemoryCatalog::new(vec![
            recipe(1, 1, "Omelette", true),
            recipe(2, 1, "Salad", false),
            recipe(3, 1, "Pancakes", true),
        ]);

        let breakfast = catalog.recipes_by_category(MealCategory::Breakfast).unwrap();
        let titles: Vec<&str> = breakfast.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Omelette", "Pancakes"]);
    }

    #[test]
    fn test_recipes_by_category_not_found() {
        let catalog = InMemoryCatalog::new(vec![recipe(1, 1, "Omelette", true)]);
        let err = catalog.recipes_by_category(MealCategory::Snack).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(MealCategory::Snack)));
    }

    #[test]
    fn test_recipes_without_ingredients_are_skipped() {
        let mut empty = recipe(1, 1, "Air", true);
        empty.ingredients.clear();
        let catalog = InMemoryCatalog::new(vec![empty]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.recipes_by_category(MealCategory::Breakfast).is_err());
    }
}
