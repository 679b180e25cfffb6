pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod units;

pub use error::{PlanError, Result};
pub use models::{MealPlan, MealPlanParams, Recipe};
