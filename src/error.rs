use thiserror::Error;

use crate::models::MealCategory;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("No recipes available for meal category: {0}")]
    EmptyCatalog(MealCategory),

    #[error("Unsupported unit class: {0:?}")]
    UnsupportedUnitClass(String),

    #[error("Unit conversion error: {0}")]
    UnitConversion(#[from] ConversionError),

    #[error("Invalid servings: meal plan has {servings}, recipe has {recipe_servings}")]
    InvalidServings { servings: i32, recipe_servings: i32 },

    #[error("Recipe catalog error: {0}")]
    Catalog(CatalogError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures reported by a [`crate::catalog::RecipeCatalog`].
///
/// `NotFound` is the "nothing matched" outcome and is kept apart from backend
/// failures so the planner can report it as [`PlanError::EmptyCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no recipes found for {0}")]
    NotFound(MealCategory),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by a [`crate::units::UnitConverter`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown unit class {0:?}")]
    UnknownUnitClass(String),

    #[error("unsupported conversion from {from:?} to {to:?} ({unit_class})")]
    UnsupportedConversion {
        from: String,
        to: String,
        unit_class: String,
    },
}

impl From<CatalogError> for PlanError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(category) => PlanError::EmptyCatalog(category),
            other => PlanError::Catalog(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
