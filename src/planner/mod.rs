pub mod config;
pub mod constants;
pub mod fitness;
pub mod genetic;
pub mod population;

pub use config::PlannerConfig;
pub use constants::*;
pub use fitness::{
    calculate_fitness, evaluate_plan, nutrient_penalties, nutrient_penalty, Evaluation,
};
pub use genetic::{day_count, is_stagnant, DayPlan, GeneticMealPlanner, Termination};
pub use population::Population;
