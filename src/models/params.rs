use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::nutrients::NUTRIENT_NAMES;
use crate::models::{MealCategory, NutrientProfile};

/// What a planning request asks for: the date range, the meal slot, serving
/// count, nutrient targets with their allowed band, and budget bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanParams {
    pub start_date: NaiveDate,

    /// Exclusive.
    pub end_date: NaiveDate,

    #[serde(default)]
    pub meal_time: NaiveTime,

    pub meal_category: MealCategory,

    pub servings: i32,

    #[serde(default)]
    pub target_budget: Option<f64>,

    #[serde(default)]
    pub max_budget: Option<f64>,

    pub target_nutrients: NutrientProfile,

    pub min_nutrients: NutrientProfile,

    pub max_nutrients: NutrientProfile,
}

impl MealPlanParams {
    /// Load and validate a request from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let params: MealPlanParams = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject requests the planner cannot score meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.servings <= 0 {
            return Err(PlanError::InvalidServings {
                servings: self.servings,
                recipe_servings: 0,
            });
        }

        let profiles = [
            ("target", &self.target_nutrients),
            ("min", &self.min_nutrients),
            ("max", &self.max_nutrients),
        ];
        for (label, profile) in profiles {
            if !profile.is_non_negative() {
                return Err(PlanError::InvalidInput(format!(
                    "{} nutrients must be non-negative",
                    label
                )));
            }
        }

        let mins = self.min_nutrients.values();
        let maxs = self.max_nutrients.values();
        for (i, name) in NUTRIENT_NAMES.iter().enumerate() {
            if mins[i] > maxs[i] {
                return Err(PlanError::InvalidInput(format!(
                    "min {} ({}) exceeds max {} ({})",
                    name, mins[i], name, maxs[i]
                )));
            }
        }

        if let (Some(target), Some(max)) = (self.target_budget, self.max_budget) {
            if target > max {
                return Err(PlanError::InvalidInput(format!(
                    "target budget ({}) exceeds max budget ({})",
                    target, max
                )));
            }
        }

        Ok(())
    }
}
