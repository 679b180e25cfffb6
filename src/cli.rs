use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::MealCategory;

/// recipe_planner: picks one recipe per day that best fits nutrient targets and budget.
#[derive(Parser, Debug)]
#[command(name = "recipe_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan one meal per day for the request in a params file.
    Plan {
        /// Path to the recipe catalog JSON file.
        #[arg(short, long)]
        recipes: PathBuf,

        /// Path to the meal plan parameters JSON file.
        #[arg(short, long)]
        params: PathBuf,

        /// Path to a planner configuration JSON file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Meal category to plan, overriding the params file.
        #[arg(long)]
        category: Option<MealCategory>,

        /// Seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,

        /// Candidates per generation.
        #[arg(long)]
        population: Option<usize>,

        /// Generation budget per day.
        #[arg(long)]
        generations: Option<usize>,

        /// Worker threads.
        #[arg(long)]
        workers: Option<usize>,

        /// Write the day table to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the plans with their search reports to a JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Inspect the unit conversion tables.
    Units {
        #[command(subcommand)]
        action: UnitsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum UnitsAction {
    /// Convert a quantity between two units of one class.
    Convert {
        quantity: f64,
        from: String,
        to: String,

        /// Unit class: mass or volume.
        #[arg(long = "class")]
        unit_class: String,
    },

    /// List the units known for a class.
    List {
        /// Unit class: mass or volume.
        #[arg(long = "class")]
        unit_class: String,
    },
}
