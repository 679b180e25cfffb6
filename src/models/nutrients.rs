use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Nutrient amounts across the six tracked dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    #[serde(default)]
    pub calories: f64,

    #[serde(default)]
    pub protein: f64,

    #[serde(default)]
    pub fat: f64,

    #[serde(default)]
    pub carbs: f64,

    #[serde(default)]
    pub fiber: f64,

    #[serde(default)]
    pub sugar: f64,
}

/// Names of the nutrient dimensions, in [`NutrientProfile::values`] order.
pub const NUTRIENT_NAMES: [&str; 6] = ["calories", "protein", "fat", "carbs", "fiber", "sugar"];

impl NutrientProfile {
    pub fn new(calories: f64, protein: f64, fat: f64, carbs: f64, fiber: f64, sugar: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
            fiber,
            sugar,
        }
    }

    /// Values in fixed dimension order: calories, protein, fat, carbs, fiber, sugar.
    #[inline]
    pub fn values(&self) -> [f64; 6] {
        [
            self.calories,
            self.protein,
            self.fat,
            self.carbs,
            self.fiber,
            self.sugar,
        ]
    }

    /// Every field multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
        }
    }

    pub fn is_non_negative(&self) -> bool {
        self.values().iter().all(|v| *v >= 0.0)
    }
}

impl AddAssign for NutrientProfile {
    fn add_assign(&mut self, other: Self) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.fat += other.fat;
        self.carbs += other.carbs;
        self.fiber += other.fiber;
        self.sugar += other.sugar;
    }
}
