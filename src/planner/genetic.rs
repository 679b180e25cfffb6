use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::catalog::RecipeCatalog;
use crate::error::{PlanError, Result};
use crate::models::{MealCategory, MealPlan, MealPlanParams, Recipe};
use crate::planner::config::PlannerConfig;
use crate::planner::constants::{
    IMPROVEMENT_THRESHOLD, SECONDS_PER_DAY, STAGNATION_MIN_GENERATIONS, STAGNATION_WINDOW,
};
use crate::planner::population::Population;
use crate::units::UnitConverter;

/// Why a day's optimization stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// `max_generations` were evaluated.
    GenerationBudget,
    /// Best fitness stopped moving.
    Stagnation,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::GenerationBudget => f.write_str("generation budget"),
            Termination::Stagnation => f.write_str("stagnation"),
        }
    }
}

/// Outcome of the optimization run for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// Best candidate, stamped with the day's meal time.
    pub meal_plan: MealPlan,
    pub fitness: f64,
    /// Generations evaluated before stopping.
    pub generations: usize,
    pub termination: Termination,
    /// Running best fitness, one entry per generation.
    pub history: Vec<f64>,
}

/// Number of planning days in `[start, end)`, rounding a partial day up.
pub fn day_count(start: NaiveDateTime, end: NaiveDateTime) -> usize {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    let day_millis = SECONDS_PER_DAY * 1000;
    ((millis + day_millis - 1) / day_millis) as usize
}

/// Whether the running best has stopped improving.
///
/// True once more than `STAGNATION_MIN_GENERATIONS` generations have elapsed
/// and no step within the trailing `STAGNATION_WINDOW` entries moved by more
/// than `IMPROVEMENT_THRESHOLD`.
pub fn is_stagnant(history: &[f64]) -> bool {
    if history.len() <= STAGNATION_MIN_GENERATIONS + 1 {
        return false;
    }
    let window = &history[history.len() - STAGNATION_WINDOW - 1..];
    window
        .windows(2)
        .all(|step| (step[1] - step[0]).abs() <= IMPROVEMENT_THRESHOLD)
}

/// Genetic search for one recipe per day over a date range.
///
/// Days run one after another; within a day, seeding, evaluation and crossover
/// run on the planner's own worker pool.
pub struct GeneticMealPlanner<'a, C: RecipeCatalog, U: UnitConverter> {
    config: PlannerConfig,
    catalog: &'a C,
    converter: &'a U,
    pool: ThreadPool,
}

impl<'a, C: RecipeCatalog, U: UnitConverter> GeneticMealPlanner<'a, C, U> {
    pub fn new(config: PlannerConfig, catalog: &'a C, converter: &'a U) -> Result<Self> {
        config.validate()?;

        let workers = config.worker_count();
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;

        debug!(
            "Planner ready: population {}, generations {}, crossover {}, {} workers",
            config.population_size, config.max_generations, config.crossover_rate, workers
        );
        debug!(
            "Mutation rate {} is recorded but not applied",
            config.mutation_rate
        );

        Ok(Self {
            config,
            catalog,
            converter,
            pool,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn population_size(&self) -> usize {
        self.config.population_size
    }

    pub fn max_generations(&self) -> usize {
        self.config.max_generations
    }

    pub fn crossover_rate(&self) -> f64 {
        self.config.crossover_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.config.mutation_rate
    }

    /// One meal plan per day in `[start, end)`, in date order.
    pub fn plan(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        meal_time: NaiveTime,
        category: MealCategory,
        params: &MealPlanParams,
    ) -> Result<Vec<MealPlan>> {
        let days = self.plan_days(start, end, meal_time, category, params)?;
        Ok(days.into_iter().map(|day| day.meal_plan).collect())
    }

    /// Like [`plan`](Self::plan), with the per-day search report.
    ///
    /// Seeds the run from `config.seed`, or from entropy when unset.
    pub fn plan_days(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        meal_time: NaiveTime,
        category: MealCategory,
        params: &MealPlanParams,
    ) -> Result<Vec<DayPlan>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.plan_days_with_rng(start, end, meal_time, category, params, &mut rng)
    }

    /// Plan the range described by a validated request.
    pub fn plan_request(&self, params: &MealPlanParams) -> Result<Vec<DayPlan>> {
        params.validate()?;
        self.plan_days(
            params.start_date.and_time(NaiveTime::default()),
            params.end_date.and_time(NaiveTime::default()),
            params.meal_time,
            params.meal_category,
            params,
        )
    }

    /// Plan with an explicit root generator. Any failure aborts the whole range.
    pub fn plan_days_with_rng(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        meal_time: NaiveTime,
        category: MealCategory,
        params: &MealPlanParams,
        rng: &mut StdRng,
    ) -> Result<Vec<DayPlan>> {
        let days = day_count(start, end);
        info!("Planning {} {} meal(s) from {}", days, category, start.date());

        let mut plans = Vec::with_capacity(days);
        for offset in 0..days {
            let date = start
                .date()
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| {
                    PlanError::InvalidInput(format!(
                        "date out of range: {} + {} days",
                        start.date(),
                        offset
                    ))
                })?;

            let recipes = self.catalog.recipes_by_category(category)?;
            debug!("{}: {} candidate recipes", date, recipes.len());

            let day = self.optimize_day(&recipes, date, meal_time, category, params, rng)?;
            info!(
                "{}: '{}' fitness {:.2} after {} generations ({})",
                date, day.meal_plan.recipe.title, day.fitness, day.generations, day.termination
            );
            plans.push(day);
        }

        Ok(plans)
    }

    /// Run the generation loop for one day and return its best candidate.
    pub fn optimize_day(
        &self,
        recipes: &[Recipe],
        date: NaiveDate,
        meal_time: NaiveTime,
        category: MealCategory,
        params: &MealPlanParams,
        rng: &mut StdRng,
    ) -> Result<DayPlan> {
        let converter = self.converter;
        let size = self.config.population_size;
        let max_generations = self.config.max_generations;
        let crossover_rate = self.config.crossover_rate;

        let mut population = self.pool.install(|| {
            Population::initialize(recipes, category, size, params.servings, converter, rng)
        })?;

        let mut best: Option<(MealPlan, f64)> = None;
        let mut history: Vec<f64> = Vec::with_capacity(max_generations);
        let mut termination = Termination::GenerationBudget;

        for generation in 0..max_generations {
            self.pool.install(|| population.evaluate(params, converter))?;

            if let Some((idx, fitness)) = population.best() {
                let improves = match &best {
                    Some((_, current)) => fitness < *current,
                    None => true,
                };
                if improves {
                    best = Some((population.members()[idx].clone(), fitness));
                }
            }

            let running = match &best {
                Some((_, fitness)) => *fitness,
                None => break,
            };
            history.push(running);
            debug!("{} generation {}: best {:.4}", date, generation, running);

            if is_stagnant(&history) {
                termination = Termination::Stagnation;
                break;
            }
            if generation + 1 == max_generations {
                break;
            }

            population = population.select(rng)?;
            self.pool.install(|| population.crossover(crossover_rate, rng))?;
        }

        let (mut meal_plan, fitness) = best.ok_or_else(|| {
            PlanError::InvalidInput(format!("no candidates were evaluated for {}", date))
        })?;
        meal_plan.meal_time = Some(date.and_time(meal_time));

        Ok(DayPlan {
            date,
            meal_plan,
            fitness,
            generations: history.len(),
            termination,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::{Ingredient, NutrientProfile, RecipeIngredient};
    use crate::units::StaticUnitConverter;

    fn datetime(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn recipe(id: u32, calories: f64) -> Recipe {
        Recipe {
            id,
            title: format!("Bowl {}", id),
            description: String::new(),
            servings: 2,
            preparation_time: 10,
            ingredients: vec![RecipeIngredient {
                ingredient: Ingredient {
                    id,
                    name: "Oats".to_string(),
                    price_per_unit: 3,
                    unit_class: "mass".to_string(),
                    nutrient_unit: "kg".to_string(),
                    nutrients: NutrientProfile::new(calories, 10.0, 5.0, 60.0, 8.0, 2.0),
                },
                quantity: 250.0,
                unit: "g".to_string(),
            }],
            is_breakfast: true,
            is_lunch: false,
            is_dinner: false,
            is_snack: false,
            version: 1,
        }
    }

    fn params() -> MealPlanParams {
        MealPlanParams {
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            meal_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            meal_category: MealCategory::Breakfast,
            servings: 2,
            target_budget: None,
            max_budget: None,
            target_nutrients: NutrientProfile::new(400.0, 10.0, 5.0, 40.0, 5.0, 2.0),
            min_nutrients: NutrientProfile::default(),
            max_nutrients: NutrientProfile::new(800.0, 20.0, 10.0, 80.0, 10.0, 4.0),
        }
    }

    fn config(seed: u64) -> PlannerConfig {
        PlannerConfig {
            population_size: 12,
            max_generations: 30,
            workers: Some(2),
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_day_count_rounds_partial_days_up() {
        assert_eq!(day_count(datetime(1, 0), datetime(4, 0)), 3);
        assert_eq!(day_count(datetime(1, 0), datetime(3, 6)), 3);
        assert_eq!(day_count(datetime(1, 0), datetime(1, 1)), 1);
    }

    #[test]
    fn test_day_count_sub_second_range_is_one_day() {
        let start = datetime(1, 0);
        assert_eq!(day_count(start, start + chrono::Duration::milliseconds(500)), 1);
        assert_eq!(day_count(start, start + chrono::Duration::milliseconds(1)), 1);
    }

    #[test]
    fn test_day_count_empty_or_inverted() {
        assert_eq!(day_count(datetime(2, 0), datetime(2, 0)), 0);
        assert_eq!(day_count(datetime(3, 0), datetime(1, 0)), 0);
    }

    #[test]
    fn test_is_stagnant_needs_enough_generations() {
        assert!(!is_stagnant(&[5.0; 11]));
        assert!(is_stagnant(&[5.0; 12]));
    }

    #[test]
    fn test_is_stagnant_sees_recent_improvement() {
        let mut history = vec![5.0; 14];
        history[10] = 4.0;
        assert!(!is_stagnant(&history));

        // Improvement outside the trailing window does not count.
        let mut history = vec![5.0; 20];
        history[0] = 100.0;
        assert!(is_stagnant(&history));

        // Moves below the threshold are not improvement.
        let history: Vec<f64> = (0..15).map(|i| 10.0 - 0.005 * i as f64).collect();
        assert!(is_stagnant(&history));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let catalog = InMemoryCatalog::new(vec![recipe(1, 400.0)]);
        let converter = StaticUnitConverter::default();
        let bad = PlannerConfig {
            crossover_rate: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            GeneticMealPlanner::new(bad, &catalog, &converter),
            Err(PlanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_recipe_stagnates() {
        let catalog = InMemoryCatalog::new(vec![recipe(1, 400.0)]);
        let converter = StaticUnitConverter::default();
        let planner = GeneticMealPlanner::new(config(1), &catalog, &converter).unwrap();

        let days = planner
            .plan_days(
                datetime(1, 0),
                datetime(2, 0),
                NaiveTime::default(),
                MealCategory::Breakfast,
                &params(),
            )
            .unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].termination, Termination::Stagnation);
        assert_eq!(days[0].generations, STAGNATION_MIN_GENERATIONS + 2);
        assert_eq!(days[0].history.len(), days[0].generations);
    }

    #[test]
    fn test_generation_budget_bounds_run() {
        let catalog = InMemoryCatalog::new(vec![recipe(1, 400.0), recipe(2, 600.0)]);
        let converter = StaticUnitConverter::default();
        let config = PlannerConfig {
            max_generations: 3,
            ..config(2)
        };
        let planner = GeneticMealPlanner::new(config, &catalog, &converter).unwrap();

        let days = planner
            .plan_days(
                datetime(1, 0),
                datetime(2, 0),
                NaiveTime::default(),
                MealCategory::Breakfast,
                &params(),
            )
            .unwrap();
        assert_eq!(days[0].generations, 3);
        assert_eq!(days[0].termination, Termination::GenerationBudget);
    }

    #[test]
    fn test_history_never_gets_worse() {
        let recipes: Vec<Recipe> = (1..=6).map(|i| recipe(i, 100.0 * i as f64)).collect();
        let catalog = InMemoryCatalog::new(recipes);
        let converter = StaticUnitConverter::default();
        let planner = GeneticMealPlanner::new(config(3), &catalog, &converter).unwrap();

        let days = planner.plan_request(&params()).unwrap();
        assert_eq!(days.len(), 3);
        for day in &days {
            assert!(day.history.windows(2).all(|w| w[1] <= w[0]));
            assert_eq!(day.history.last().copied(), Some(day.fitness));
        }
    }

    #[test]
    fn test_plan_stamps_meal_time_in_date_order() {
        let recipes: Vec<Recipe> = (1..=4).map(|i| recipe(i, 150.0 * i as f64)).collect();
        let catalog = InMemoryCatalog::new(recipes);
        let converter = StaticUnitConverter::default();
        let planner = GeneticMealPlanner::new(config(4), &catalog, &converter).unwrap();
        let breakfast = NaiveTime::from_hms_opt(7, 30, 0).unwrap();

        let plans = planner
            .plan(
                datetime(1, 0),
                datetime(4, 0),
                breakfast,
                MealCategory::Breakfast,
                &params(),
            )
            .unwrap();

        assert_eq!(plans.len(), 3);
        for (offset, plan) in plans.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2026, 5, 1 + offset as u32).unwrap();
            assert_eq!(plan.meal_time, Some(date.and_time(breakfast)));
            assert!(plan.recipe.is_breakfast);
        }
    }

    #[test]
    fn test_empty_range_skips_catalog() {
        let catalog = InMemoryCatalog::new(vec![]);
        let converter = StaticUnitConverter::default();
        let planner = GeneticMealPlanner::new(config(5), &catalog, &converter).unwrap();

        let plans = planner
            .plan(
                datetime(3, 0),
                datetime(1, 0),
                NaiveTime::default(),
                MealCategory::Snack,
                &params(),
            )
            .unwrap();
        assert!(plans.is_empty());
    }
}
