mod memory;
mod persistence;

pub use memory::InMemoryCatalog;
pub use persistence::{load_recipes, save_recipes};

use crate::error::CatalogError;
use crate::models::{MealCategory, Recipe};

/// Source of candidate recipes for the planner.
///
/// Returns `CatalogError::NotFound` when nothing matches, never an empty list.
pub trait RecipeCatalog: Send + Sync {
    fn recipes_by_category(&self, category: MealCategory) -> Result<Vec<Recipe>, CatalogError>;
}
