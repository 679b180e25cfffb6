use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::units::{UnitClass, UnitConverter};

type RateTable = HashMap<&'static str, HashMap<&'static str, f64>>;

fn rates(row: &[(&'static str, f64)]) -> HashMap<&'static str, f64> {
    row.iter().copied().collect()
}

/// Direct conversion factors between mass units.
static MASS_RATES: LazyLock<RateTable> = LazyLock::new(|| {
    HashMap::from([
        ("kg", rates(&[("g", 1000.0), ("lb", 2.20462), ("oz", 35.274)])),
        ("g", rates(&[("kg", 0.001), ("lb", 0.00220462), ("oz", 0.035274)])),
        ("lb", rates(&[("g", 453.592), ("kg", 0.453592), ("oz", 16.0)])),
        ("oz", rates(&[("g", 28.3495), ("kg", 0.0283495), ("lb", 0.0625)])),
    ])
});

/// Direct conversion factors between volume units.
static VOLUME_RATES: LazyLock<RateTable> = LazyLock::new(|| {
    HashMap::from([
        (
            "l",
            rates(&[
                ("ml", 1000.0),
                ("fl-oz", 33.814),
                ("cups", 4.22675),
                ("pt", 2.11338),
                ("qt", 1.05669),
                ("gal", 0.264172),
                ("tsp", 202.884),
                ("tbsp", 67.628),
            ]),
        ),
        (
            "ml",
            rates(&[
                ("l", 0.001),
                ("fl-oz", 0.033814),
                ("cups", 0.00422675),
                ("pt", 0.00211338),
                ("qt", 0.00105669),
                ("gal", 0.000264172),
                ("tsp", 0.202884),
                ("tbsp", 0.067628),
            ]),
        ),
        (
            "fl-oz",
            rates(&[
                ("l", 0.0295735),
                ("ml", 29.5735),
                ("cups", 0.125),
                ("pt", 0.0625),
                ("qt", 0.03125),
                ("gal", 0.0078125),
                ("tsp", 6.0),
                ("tbsp", 2.0),
            ]),
        ),
        (
            "cups",
            rates(&[
                ("l", 0.236588),
                ("ml", 236.588),
                ("fl-oz", 8.0),
                ("pt", 0.5),
                ("qt", 0.25),
                ("gal", 0.0625),
                ("tsp", 48.0),
                ("tbsp", 16.0),
            ]),
        ),
        (
            "pt",
            rates(&[
                ("l", 0.473176),
                ("ml", 473.176),
                ("fl-oz", 16.0),
                ("cups", 2.0),
                ("qt", 0.5),
                ("gal", 0.125),
                ("tsp", 96.0),
                ("tbsp", 32.0),
            ]),
        ),
        (
            "qt",
            rates(&[
                ("l", 0.946353),
                ("ml", 946.353),
                ("fl-oz", 32.0),
                ("cups", 4.0),
                ("pt", 2.0),
                ("gal", 0.25),
                ("tsp", 192.0),
                ("tbsp", 64.0),
            ]),
        ),
        (
            "gal",
            rates(&[
                ("l", 3.78541),
                ("ml", 3785.41),
                ("fl-oz", 128.0),
                ("cups", 16.0),
                ("pt", 8.0),
                ("qt", 4.0),
                ("tsp", 768.0),
                ("tbsp", 256.0),
            ]),
        ),
        (
            "tsp",
            rates(&[
                ("l", 0.00492892),
                ("ml", 4.92892),
                ("fl-oz", 0.166667),
                ("cups", 0.0208333),
                ("pt", 0.0104167),
                ("qt", 0.00520833),
                ("gal", 0.00130208),
                ("tbsp", 0.333333),
            ]),
        ),
        (
            "tbsp",
            rates(&[
                ("l", 0.0147868),
                ("ml", 14.7868),
                ("fl-oz", 0.5),
                ("cups", 0.0625),
                ("pt", 0.03125),
                ("qt", 0.015625),
                ("gal", 0.00390625),
                ("tsp", 3.0),
            ]),
        ),
    ])
});

fn rates_for(class: UnitClass) -> &'static RateTable {
    match class {
        UnitClass::Mass => &MASS_RATES,
        UnitClass::Volume => &VOLUME_RATES,
    }
}

/// Default units the converter normalizes ingredient quantities into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    pub default_mass_unit: String,
    pub default_volume_unit: String,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            default_mass_unit: "kg".to_string(),
            default_volume_unit: "l".to_string(),
        }
    }
}

/// Unit converter backed by fixed mass and volume rate tables.
#[derive(Debug, Clone)]
pub struct StaticUnitConverter {
    default_mass_unit: String,
    default_volume_unit: String,
}

impl StaticUnitConverter {
    pub fn new(default_mass_unit: &str, default_volume_unit: &str) -> Self {
        Self {
            default_mass_unit: default_mass_unit.to_string(),
            default_volume_unit: default_volume_unit.to_string(),
        }
    }

    pub fn from_config(config: &UnitsConfig) -> Self {
        Self::new(&config.default_mass_unit, &config.default_volume_unit)
    }
}

impl Default for StaticUnitConverter {
    fn default() -> Self {
        Self::from_config(&UnitsConfig::default())
    }
}

impl UnitConverter for StaticUnitConverter {
    fn convert(
        &self,
        quantity: f64,
        from: &str,
        to: &str,
        unit_class: &str,
    ) -> Result<f64, ConversionError> {
        if from == to {
            return Ok(quantity);
        }

        let class = UnitClass::parse(unit_class)
            .ok_or_else(|| ConversionError::UnknownUnitClass(unit_class.to_string()))?;

        let rate = rates_for(class)
            .get(from)
            .and_then(|row| row.get(to))
            .ok_or_else(|| ConversionError::UnsupportedConversion {
                from: from.to_string(),
                to: to.to_string(),
                unit_class: unit_class.to_string(),
            })?;

        Ok(quantity * rate)
    }

    fn default_unit(&self, unit_class: &str) -> &str {
        match UnitClass::parse(unit_class) {
            Some(UnitClass::Mass) => &self.default_mass_unit,
            Some(UnitClass::Volume) => &self.default_volume_unit,
            None => "",
        }
    }

    fn available_units(&self, unit_class: &str) -> Vec<String> {
        let Some(class) = UnitClass::parse(unit_class) else {
            return Vec::new();
        };
        let mut units: Vec<String> = rates_for(class).keys().map(|u| u.to_string()).collect();
        units.sort();
        units
    }

    fn is_valid_unit(&self, unit: &str, unit_class: &str) -> bool {
        UnitClass::parse(unit_class)
            .map(|class| rates_for(class).contains_key(unit))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> StaticUnitConverter {
        StaticUnitConverter::new("kg", "l")
    }

    #[test]
    fn test_convert_known_pairs() {
        let c = converter();
        let cases = [
            (1.0, "kg", "g", "mass", 1000.0),
            (1000.0, "g", "kg", "mass", 1.0),
            (1.0, "kg", "lb", "mass", 2.20462),
            (1.0, "lb", "g", "mass", 453.592),
            (1.0, "l", "ml", "volume", 1000.0),
            (1.0, "fl-oz", "cups", "volume", 0.125),
        ];
        for (qty, from, to, class, want) in cases {
            let got = c.convert(qty, from, to, class).unwrap();
            assert!((got - want).abs() < 1e-9, "{} {} -> {}: {}", qty, from, to, got);
        }
    }

    #[test]
    fn test_same_unit_is_identity() {
        let c = converter();
        assert_eq!(c.convert(3.5, "kg", "kg", "mass").unwrap(), 3.5);
        // Identity short-circuits before the class is checked.
        assert_eq!(c.convert(3.5, "pinch", "pinch", "other").unwrap(), 3.5);
    }

    #[test]
    fn test_cross_class_conversion_fails() {
        let c = converter();
        let err = c.convert(1.0, "kg", "ml", "mass").unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedConversion { .. }));
    }

    #[test]
    fn test_unknown_class_fails() {
        let c = converter();
        let err = c.convert(1.0, "kg", "g", "energy").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnitClass("energy".to_string()));
    }

    #[test]
    fn test_default_unit() {
        let c = converter();
        assert_eq!(c.default_unit("mass"), "kg");
        assert_eq!(c.default_unit("volume"), "l");
        assert_eq!(c.default_unit("unsupported"), "");
    }

    #[test]
    fn test_available_and_valid_units() {
        let c = converter();
        assert_eq!(c.available_units("mass"), vec!["g", "kg", "lb", "oz"]);
        assert_eq!(c.available_units("volume").len(), 9);
        assert!(c.available_units("length").is_empty());

        assert!(c.is_valid_unit("kg", "mass"));
        assert!(c.is_valid_unit("l", "volume"));
        assert!(!c.is_valid_unit("l", "mass"));
        assert!(!c.is_valid_unit("kg", "volume"));
    }
}
