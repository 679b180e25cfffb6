use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::PlanError;
use crate::models::Ingredient;

/// Meal slot a recipe can be planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealCategory {
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
            MealCategory::Snack => "snack",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = PlanError;

    /// Case-insensitive parse. Misspellings get the closest category suggested.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        if let Some(category) = Self::ALL.into_iter().find(|c| c.as_str() == input) {
            return Ok(category);
        }

        let closest = Self::ALL
            .into_iter()
            .map(|c| (c, jaro_winkler(c.as_str(), &input)))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let message = match closest {
            Some((c, _)) => format!("unknown meal category '{}' (did you mean '{}'?)", s, c),
            None => format!("unknown meal category '{}'", s),
        };
        Err(PlanError::InvalidInput(message))
    }
}

/// A recipe's use of one ingredient, in recipe-specific quantity and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: String,
}

/// A versioned recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Base serving count the ingredient quantities are written for.
    pub servings: i32,

    /// Minutes.
    #[serde(default)]
    pub preparation_time: u32,

    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,

    #[serde(default)]
    pub is_breakfast: bool,

    #[serde(default)]
    pub is_lunch: bool,

    #[serde(default)]
    pub is_dinner: bool,

    #[serde(default)]
    pub is_snack: bool,

    #[serde(default = "first_version")]
    pub version: u32,
}

fn first_version() -> u32 {
    1
}

impl Recipe {
    /// Whether the recipe is flagged for `category`.
    pub fn matches(&self, category: MealCategory) -> bool {
        match category {
            MealCategory::Breakfast => self.is_breakfast,
            MealCategory::Lunch => self.is_lunch,
            MealCategory::Dinner => self.is_dinner,
            MealCategory::Snack => self.is_snack,
        }
    }

    /// Categories this recipe is flagged for.
    pub fn categories(&self) -> Vec<MealCategory> {
        MealCategory::ALL
            .into_iter()
            .filter(|c| self.matches(*c))
            .collect()
    }
}
