pub mod ingredient;
pub mod meal_plan;
pub mod nutrients;
pub mod params;
pub mod recipe;

pub use ingredient::Ingredient;
pub use meal_plan::MealPlan;
pub use nutrients::NutrientProfile;
pub use params::MealPlanParams;
pub use recipe::{MealCategory, Recipe, RecipeIngredient};
