use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use crate::error::{PlanError, Result};
use crate::models::{MealCategory, MealPlan, MealPlanParams, Recipe};
use crate::planner::constants::SWAP_PROBABILITY;
use crate::planner::fitness::calculate_fitness;
use crate::units::UnitConverter;

/// Draw one seed per parallel worker from the root generator, in index order.
fn worker_seeds(rng: &mut StdRng, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.next_u64()).collect()
}

/// One generation of candidate meal plans for a single day.
///
/// `fitness` is either empty (not yet evaluated) or paired index-for-index
/// with `members`.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<MealPlan>,
    fitness: Vec<f64>,
}

impl Population {
    /// Wrap existing candidates as an unevaluated population.
    pub fn from_members(members: Vec<MealPlan>) -> Self {
        Self {
            members,
            fitness: Vec::new(),
        }
    }

    /// Seed `size` candidates by sampling `recipes` uniformly with replacement.
    ///
    /// Each candidate is built at `servings` and serving-adjusted. Runs on the
    /// current rayon pool; every worker owns one output slot.
    pub fn initialize(
        recipes: &[Recipe],
        category: MealCategory,
        size: usize,
        servings: i32,
        converter: &impl UnitConverter,
        rng: &mut StdRng,
    ) -> Result<Self> {
        if recipes.is_empty() {
            return Err(PlanError::EmptyCatalog(category));
        }

        let members = worker_seeds(rng, size)
            .into_par_iter()
            .map(|seed| {
                let mut worker_rng = StdRng::seed_from_u64(seed);
                let recipe = &recipes[worker_rng.gen_range(0..recipes.len())];
                let mut plan = MealPlan::new(recipe, servings);
                plan.adjust_servings(converter)?;
                Ok(plan)
            })
            .collect::<Result<Vec<MealPlan>>>()?;

        Ok(Self::from_members(members))
    }

    /// Score every member. The first failure aborts the whole phase.
    pub fn evaluate(
        &mut self,
        params: &MealPlanParams,
        converter: &impl UnitConverter,
    ) -> Result<()> {
        let mut fitness = vec![0.0; self.members.len()];

        fitness
            .par_iter_mut()
            .zip(self.members.par_iter())
            .try_for_each(|(slot, plan)| -> Result<()> {
                *slot = calculate_fitness(plan, params, converter)?;
                Ok(())
            })?;

        self.fitness = fitness;
        Ok(())
    }

    /// Index and fitness of the lowest-fitness member, if evaluated.
    pub fn best(&self) -> Option<(usize, f64)> {
        if !self.is_evaluated() {
            return None;
        }
        let mut best_idx = 0;
        for i in 1..self.fitness.len() {
            if self.fitness[i] < self.fitness[best_idx] {
                best_idx = i;
            }
        }
        Some((best_idx, self.fitness[best_idx]))
    }

    /// Binary tournament selection.
    ///
    /// Every output slot holds the better of two distinct random draws from
    /// this population; ties go to the second draw. `self` is left untouched.
    /// A single-member population is copied as is.
    pub fn select(&self, rng: &mut StdRng) -> Result<Population> {
        if !self.is_evaluated() {
            return Err(PlanError::InvalidInput(
                "cannot select from an unevaluated population".to_string(),
            ));
        }

        let n = self.members.len();
        if n < 2 {
            return Ok(self.clone());
        }

        let mut members = Vec::with_capacity(n);
        let mut fitness = Vec::with_capacity(n);
        for _ in 0..n {
            let first = rng.gen_range(0..n);
            let mut second = rng.gen_range(0..n - 1);
            if second >= first {
                second += 1;
            }

            let winner = if self.fitness[first] < self.fitness[second] {
                first
            } else {
                second
            };
            members.push(self.members[winner].clone());
            fitness.push(self.fitness[winner]);
        }

        Ok(Population { members, fitness })
    }

    /// Positional crossover over pairs (0, 1), (2, 3), ...
    ///
    /// A pair swaps places with probability `crossover_rate * SWAP_PROBABILITY`.
    /// An odd trailing member is never touched. Candidates are only permuted,
    /// so previous fitness values are dropped. A rate outside [0, 1] is rejected
    /// before any draw.
    pub fn crossover(&mut self, crossover_rate: f64, rng: &mut StdRng) -> Result<()> {
        if !(0.0..=1.0).contains(&crossover_rate) {
            return Err(PlanError::InvalidConfig(format!(
                "crossover_rate must be within [0, 1], got {}",
                crossover_rate
            )));
        }

        let pairs = self.members.len() / 2;
        let seeds = worker_seeds(rng, pairs);

        self.members[..pairs * 2]
            .par_chunks_mut(2)
            .zip(seeds.par_iter())
            .for_each(|(pair, seed)| {
                let mut worker_rng = StdRng::seed_from_u64(*seed);
                let crosses = worker_rng.gen_bool(crossover_rate);
                let swaps = worker_rng.gen_bool(SWAP_PROBABILITY);
                if crosses && swaps {
                    pair.swap(0, 1);
                }
            });

        self.fitness.clear();
        Ok(())
    }

    pub fn members(&self) -> &[MealPlan] {
        &self.members
    }

    /// Fitness values, empty until evaluated.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        !self.members.is_empty() && self.fitness.len() == self.members.len()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
