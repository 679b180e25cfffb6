use crate::error::{PlanError, Result};
use crate::models::{MealPlan, MealPlanParams, NutrientProfile};
use crate::planner::constants::OUT_OF_BAND_PENALTY;
use crate::units::UnitConverter;

/// Scoring breakdown for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Total nutrients of the plan at the requested servings.
    pub nutrients: NutrientProfile,
    /// Total ingredient cost in the smallest currency unit.
    pub cost: f64,
    /// Lower is better.
    pub fitness: f64,
}

/// Penalty for one nutrient dimension.
///
/// Outside [min, max] the distance to the violated bound counts double;
/// inside the band the distance to target counts once.
pub fn nutrient_penalty(value: f64, target: f64, min: f64, max: f64) -> f64 {
    if value < min {
        OUT_OF_BAND_PENALTY * (min - value)
    } else if value > max {
        OUT_OF_BAND_PENALTY * (value - max)
    } else {
        (target - value).abs()
    }
}

/// Sum of the six nutrient penalties for a totals vector.
pub fn nutrient_penalties(totals: &NutrientProfile, params: &MealPlanParams) -> f64 {
    let values = totals.values();
    let targets = params.target_nutrients.values();
    let mins = params.min_nutrients.values();
    let maxs = params.max_nutrients.values();

    (0..values.len())
        .map(|i| nutrient_penalty(values[i], targets[i], mins[i], maxs[i]))
        .sum()
}

/// Score a serving-adjusted candidate against the request.
///
/// Each ingredient quantity is normalized into the ingredient's nutrient unit,
/// then scaled by `params.servings / plan.recipe.servings`.
/// Formula: Σ nutrient penalties − total cost
pub fn evaluate_plan(
    plan: &MealPlan,
    params: &MealPlanParams,
    converter: &impl UnitConverter,
) -> Result<Evaluation> {
    if params.servings <= 0 || plan.recipe.servings <= 0 {
        return Err(PlanError::InvalidServings {
            servings: params.servings,
            recipe_servings: plan.recipe.servings,
        });
    }
    let scaling = params.servings as f64 / plan.recipe.servings as f64;

    let mut nutrients = NutrientProfile::default();
    let mut cost = 0.0;

    for item in &plan.recipe.ingredients {
        let ingredient = &item.ingredient;
        let class = ingredient.class()?;

        let normalized = converter.convert(
            item.quantity,
            &item.unit,
            &ingredient.nutrient_unit,
            class.as_str(),
        )?;
        let scaled = normalized * scaling;

        nutrients += ingredient.nutrients.scaled(scaled);
        cost += ingredient.price_per_unit as f64 * scaled;
    }

    let fitness = nutrient_penalties(&nutrients, params) - cost;

    Ok(Evaluation {
        nutrients,
        cost,
        fitness,
    })
}

/// Fitness of a candidate. Lower is better.
pub fn calculate_fitness(
    plan: &MealPlan,
    params: &MealPlanParams,
    converter: &impl UnitConverter,
) -> Result<f64> {
    evaluate_plan(plan, params, converter).map(|e| e.fitness)
}
