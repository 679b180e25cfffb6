use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::NutrientProfile;
use crate::units::UnitClass;

/// An ingredient with pricing and nutritional data.
///
/// `nutrients` and `price_per_unit` are both given per one `nutrient_unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u32,

    pub name: String,

    /// Price in the smallest currency unit.
    pub price_per_unit: i64,

    /// "mass" or "volume". Kept as text so unsupported classes survive loading
    /// and are rejected when the ingredient is used.
    pub unit_class: String,

    pub nutrient_unit: String,

    #[serde(default)]
    pub nutrients: NutrientProfile,
}

impl Ingredient {
    /// Parsed unit class, or `UnsupportedUnitClass`.
    pub fn class(&self) -> Result<UnitClass> {
        UnitClass::parse(&self.unit_class)
            .ok_or_else(|| PlanError::UnsupportedUnitClass(self.unit_class.clone()))
    }
}
