/// Default number of candidates per generation.
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Default generation budget per day.
pub const DEFAULT_MAX_GENERATIONS: usize = 50;

/// Default probability that a pair is considered for a positional swap.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.7;

/// Default mutation rate. Carried in configuration only; no operator uses it.
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

// ─────────────────────────────────────────────────────────────────────────────
// Fitness
// ─────────────────────────────────────────────────────────────────────────────

/// Multiplier on the distance outside the [min, max] nutrient band.
pub const OUT_OF_BAND_PENALTY: f64 = 2.0;

// ─────────────────────────────────────────────────────────────────────────────
// Recombination and termination
// ─────────────────────────────────────────────────────────────────────────────

/// Probability that a pair chosen for crossover actually swaps.
pub const SWAP_PROBABILITY: f64 = 0.5;

/// Generations that must elapse before stagnation can end a run.
pub const STAGNATION_MIN_GENERATIONS: usize = 10;

/// Trailing generations inspected for improvement.
pub const STAGNATION_WINDOW: usize = 10;

/// Smallest change in best fitness that counts as improvement.
pub const IMPROVEMENT_THRESHOLD: f64 = 0.01;

/// Seconds in a planning day.
pub const SECONDS_PER_DAY: i64 = 86_400;
