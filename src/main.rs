use clap::Parser;
use log::info;
use std::path::Path;

use recipe_planner_rs::catalog::{load_recipes, InMemoryCatalog};
use recipe_planner_rs::cli::{Cli, Command, UnitsAction};
use recipe_planner_rs::error::{PlanError, Result};
use recipe_planner_rs::interface::{
    day_rows, display_day_plans, display_units, write_csv, write_json,
};
use recipe_planner_rs::models::{MealCategory, MealPlanParams};
use recipe_planner_rs::planner::{GeneticMealPlanner, PlannerConfig};
use recipe_planner_rs::units::{StaticUnitConverter, UnitClass, UnitConverter};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            recipes,
            params,
            config,
            category,
            seed,
            population,
            generations,
            workers,
            csv,
            json,
        } => {
            let mut config = match config {
                Some(path) => PlannerConfig::load(path)?,
                None => PlannerConfig::default(),
            };
            // CLI flags override the file.
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(n) = population {
                config.population_size = n;
            }
            if let Some(n) = generations {
                config.max_generations = n;
            }
            if workers.is_some() {
                config.workers = workers;
            }

            cmd_plan(
                &recipes,
                &params,
                category,
                config,
                csv.as_deref(),
                json.as_deref(),
            )
        }
        Command::Units { action } => cmd_units(action),
    }
}

/// Plan one meal per day and report the result.
fn cmd_plan(
    recipes_path: &Path,
    params_path: &Path,
    category: Option<MealCategory>,
    config: PlannerConfig,
    csv_path: Option<&Path>,
    json_path: Option<&Path>,
) -> Result<()> {
    let recipes = load_recipes(recipes_path)?;
    let catalog = InMemoryCatalog::new(recipes);
    println!("Loaded {} recipes", catalog.len());

    let mut params = MealPlanParams::load(params_path)?;
    if let Some(category) = category {
        params.meal_category = category;
    }
    let converter = StaticUnitConverter::from_config(&config.units);

    let planner = GeneticMealPlanner::new(config, &catalog, &converter)?;
    let days = planner.plan_request(&params)?;
    let rows = day_rows(&days, &params, &converter)?;

    display_day_plans(&rows, &params);

    if let Some(path) = csv_path {
        write_csv(&rows, path)?;
        info!("Wrote CSV to {}", path.display());
        println!("Day table saved to {}", path.display());
    }
    if let Some(path) = json_path {
        write_json(&days, &rows, path)?;
        info!("Wrote JSON to {}", path.display());
        println!("Plans saved to {}", path.display());
    }

    Ok(())
}

/// Run a conversion or list the units of a class.
fn cmd_units(action: UnitsAction) -> Result<()> {
    let converter = StaticUnitConverter::default();

    match action {
        UnitsAction::Convert {
            quantity,
            from,
            to,
            unit_class,
        } => {
            let class = parse_class(&unit_class)?;
            let converted = converter.convert(quantity, &from, &to, class.as_str())?;
            println!("{} {} = {} {}", quantity, from, converted, to);
        }
        UnitsAction::List { unit_class } => {
            let class = parse_class(&unit_class)?;
            display_units(class.as_str(), &converter.available_units(class.as_str()));
        }
    }

    Ok(())
}

fn parse_class(name: &str) -> Result<UnitClass> {
    UnitClass::parse(name).ok_or_else(|| PlanError::UnsupportedUnitClass(name.to_string()))
}
