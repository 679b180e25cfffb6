use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::models::MealPlanParams;
use crate::planner::{evaluate_plan, DayPlan, Termination};
use crate::units::UnitConverter;

/// Flattened view of one planned day, as printed and exported.
#[derive(Debug, Clone, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub recipe_id: u32,
    pub title: String,
    pub servings: i32,
    pub fitness: f64,
    pub calories: f64,
    pub protein: f64,
    pub cost: f64,
    pub generations: usize,
    pub termination: Termination,
}

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Re-score every emitted plan for display.
pub fn day_rows(
    days: &[DayPlan],
    params: &MealPlanParams,
    converter: &impl UnitConverter,
) -> Result<Vec<DayRow>> {
    days.iter()
        .map(|day| {
            let eval = evaluate_plan(&day.meal_plan, params, converter)?;
            Ok(DayRow {
                date: day.date,
                recipe_id: day.meal_plan.recipe_id,
                title: day.meal_plan.recipe.title.clone(),
                servings: day.meal_plan.servings,
                fitness: day.fitness,
                calories: eval.nutrients.calories,
                protein: eval.nutrients.protein,
                cost: eval.cost,
                generations: day.generations,
                termination: day.termination,
            })
        })
        .collect()
}

/// Total cost over all planned days.
pub fn total_cost(rows: &[DayRow]) -> f64 {
    rows.iter().map(|r| r.cost).sum()
}

/// Write the day table to a CSV file.
pub fn write_csv(rows: &[DayRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "date",
        "recipe_id",
        "title",
        "servings",
        "fitness",
        "calories",
        "protein",
        "cost",
        "generations",
        "termination",
    ])?;

    for row in rows {
        wtr.write_record([
            row.date.to_string(),
            row.recipe_id.to_string(),
            row.title.clone(),
            row.servings.to_string(),
            format!("{:.3}", row.fitness),
            format!("{:.1}", row.calories),
            format!("{:.1}", row.protein),
            format!("{:.2}", row.cost),
            row.generations.to_string(),
            row.termination.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the emitted meal plans with their search reports to a JSON file.
pub fn write_json(days: &[DayPlan], rows: &[DayRow], path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "total_cost": truncate(total_cost(rows), 2),
        "days": days.iter().zip(rows).map(|(day, row)| {
            serde_json::json!({
                "date": day.date,
                "meal_plan": day.meal_plan,
                "fitness": truncate(day.fitness, 3),
                "calories": truncate(row.calories, 1),
                "protein": truncate(row.protein, 1),
                "cost": truncate(row.cost, 2),
                "generations": day.generations,
                "termination": day.termination,
                "history": day.history.iter().map(|f| truncate(*f, 3)).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}
