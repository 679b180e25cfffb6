mod converter;

pub use converter::{StaticUnitConverter, UnitsConfig};

use crate::error::ConversionError;

/// Class of measurement an ingredient quantity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitClass {
    Mass,
    Volume,
}

impl UnitClass {
    /// Parse a unit class name. Returns `None` for anything but "mass" or "volume".
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "mass" => Some(UnitClass::Mass),
            "volume" => Some(UnitClass::Volume),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitClass::Mass => "mass",
            UnitClass::Volume => "volume",
        }
    }
}

impl std::fmt::Display for UnitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement-unit conversion service.
///
/// Implementations hold no per-call state and are shared read-only across
/// planner workers.
pub trait UnitConverter: Send + Sync {
    /// Convert `quantity` from `from` to `to` within `unit_class`.
    fn convert(
        &self,
        quantity: f64,
        from: &str,
        to: &str,
        unit_class: &str,
    ) -> std::result::Result<f64, ConversionError>;

    /// Default unit for a unit class, or an empty string for unknown classes.
    fn default_unit(&self, unit_class: &str) -> &str;

    /// Units known for a class, sorted. Empty for unknown classes.
    fn available_units(&self, unit_class: &str) -> Vec<String>;

    /// Whether `unit` is a known unit of `unit_class`.
    fn is_valid_unit(&self, unit: &str, unit_class: &str) -> bool;
}
