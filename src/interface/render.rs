use crate::interface::output::{total_cost, DayRow};
use crate::models::MealPlanParams;

/// One-line comparison of the plan's total cost against the budget bounds.
pub fn budget_summary(total: f64, params: &MealPlanParams) -> String {
    let mut parts = vec![format!("Total cost: {:.2}", total)];

    if let Some(target) = params.target_budget {
        let diff = total - target;
        let sign = if diff >= 0.0 { "+" } else { "" };
        parts.push(format!("target {:.2} ({}{:.2})", target, sign, diff));
    }

    if let Some(max) = params.max_budget {
        let status = if total > max { "OVER" } else { "within" };
        parts.push(format!("max {:.2} ({})", max, status));
    }

    parts.join(" | ")
}

/// Display the planned days in a formatted table.
pub fn display_day_plans(rows: &[DayRow], params: &MealPlanParams) {
    if rows.is_empty() {
        println!("No meals planned (empty date range).");
        return;
    }

    println!();
    println!(
        "=== {} Plan: {} to {} ===",
        params.meal_category, params.start_date, params.end_date
    );
    println!();

    let max_title_len = rows.iter().map(|r| r.title.len()).max().unwrap_or(10);

    for row in rows {
        println!(
            "{}  {:<width$}  x{:<2} fitness {:>10.2} | {:>6.0} cal {:>5.1} g protein | cost {:>8.2}  ({} gen, {})",
            row.date,
            row.title,
            row.servings,
            row.fitness,
            row.calories,
            row.protein,
            row.cost,
            row.generations,
            row.termination,
            width = max_title_len
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Days planned: {}", rows.len());
    println!("{}", budget_summary(total_cost(rows), params));
    println!();
}

/// Display the units known for a unit class.
pub fn display_units(unit_class: &str, units: &[String]) {
    if units.is_empty() {
        println!("{}: (no units)", unit_class);
        return;
    }
    println!("{} units: {}", unit_class, units.join(", "));
}
