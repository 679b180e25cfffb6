use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::Recipe;
use crate::units::UnitConverter;

/// One recipe assigned to one meal slot.
///
/// `recipe` is a private snapshot: after [`MealPlan::adjust_servings`] its
/// quantities are expressed in default units for `servings` people and its
/// `servings` equals the plan's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub recipe_id: u32,

    pub recipe_version: u32,

    /// Requested serving count.
    pub servings: i32,

    /// Scheduled time of the meal. Set on plans emitted by the planner.
    #[serde(default)]
    pub meal_time: Option<NaiveDateTime>,

    pub recipe: Recipe,
}

impl MealPlan {
    /// Build an unadjusted meal plan for `servings` people from a recipe.
    pub fn new(recipe: &Recipe, servings: i32) -> Self {
        Self {
            recipe_id: recipe.id,
            recipe_version: recipe.version,
            servings,
            meal_time: None,
            recipe: recipe.clone(),
        }
    }

    /// Ratio of requested servings to the snapshot's servings.
    ///
    /// Fails with `InvalidServings` if either count is not positive.
    pub fn servings_ratio(&self) -> Result<f64> {
        if self.servings <= 0 || self.recipe.servings <= 0 {
            return Err(PlanError::InvalidServings {
                servings: self.servings,
                recipe_servings: self.recipe.servings,
            });
        }
        Ok(self.servings as f64 / self.recipe.servings as f64)
    }

    /// Rescale the recipe snapshot to the requested servings.
    ///
    /// Every ingredient quantity is converted to its unit class's default unit
    /// and multiplied by `servings / recipe.servings`.
    pub fn adjust_servings(&mut self, converter: &impl UnitConverter) -> Result<()> {
        let ratio = self.servings_ratio()?;

        for item in self.recipe.ingredients.iter_mut() {
            let class = item.ingredient.class()?;
            let default_unit = converter.default_unit(class.as_str());
            if default_unit.is_empty() {
                return Err(PlanError::UnsupportedUnitClass(
                    item.ingredient.unit_class.clone(),
                ));
            }

            let converted =
                converter.convert(item.quantity, &item.unit, default_unit, class.as_str())?;

            item.quantity = converted * ratio;
            item.unit = default_unit.to_string();
        }

        self.recipe.servings = self.servings;
        Ok(())
    }
}
