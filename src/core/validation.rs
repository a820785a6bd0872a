use crate::core::units::{LengthUnit, WeightUnit};
use crate::error::ValidationError;
use crate::models::{CaseItem, Dimensions, GearItem, ProtectionLevel, Weight, WeightClass};
use serde::{Deserialize, Serialize};

/// Capacity in kilograms assumed for each weight class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightClassCapacities {
    pub light: f64,
    pub medium: f64,
    pub heavy: f64,
}

impl WeightClassCapacities {
    #[inline]
    pub fn capacity_kg(&self, class: WeightClass) -> f64 {
        match class {
            WeightClass::Light => self.light,
            WeightClass::Medium => self.medium,
            WeightClass::Heavy => self.heavy,
        }
    }
}

impl Default for WeightClassCapacities {
    fn default() -> Self {
        Self {
            light: 5.0,
            medium: 15.0,
            heavy: 40.0,
        }
    }
}

/// Gear that passed validation, normalized to cm / kg
#[derive(Debug, Clone)]
pub struct CheckedGear<'a> {
    pub item: &'a GearItem,
    pub dims_cm: [f64; 3],
    pub weight_kg: f64,
}

/// Case that passed validation, normalized to cm / kg
#[derive(Debug, Clone)]
pub struct CheckedCase<'a> {
    pub item: &'a CaseItem,
    pub interior_cm: [f64; 3],
    pub capacity_kg: f64,
    pub protection_level: ProtectionLevel,
}

pub fn check_gear(gear: &GearItem) -> Result<CheckedGear<'_>, ValidationError> {
    let id = gear.id.as_str();
    let fail = |field: &str, reason: &str| ValidationError::gear(id, field, reason);

    if id.trim().is_empty() {
        return Err(fail("id", "must not be empty"));
    }

    let dims = gear.dimensions.as_ref().ok_or_else(|| fail("dimensions", "is missing"))?;
    let dims_cm = normalize_dimensions(dims, "dimensions", false).map_err(|(f, r)| fail(f.as_str(), r.as_str()))?;

    let weight = gear.weight.as_ref().ok_or_else(|| fail("weight", "is missing"))?;
    let weight_kg = normalize_weight(weight, "weight").map_err(|(f, r)| fail(f.as_str(), r.as_str()))?;

    Ok(CheckedGear {
        item: gear,
        dims_cm,
        weight_kg,
    })
}

pub fn check_case<'a>(
    case: &'a CaseItem,
    capacities: &WeightClassCapacities,
) -> Result<CheckedCase<'a>, ValidationError> {
    let id = case.id.as_str();
    let fail = |field: &str, reason: &str| ValidationError::case(id, field, reason);

    if id.trim().is_empty() {
        return Err(fail("id", "must not be empty"));
    }

    let dims = case
        .interior_dimensions
        .as_ref()
        .ok_or_else(|| fail("interiorDimensions", "is missing"))?;
    // Interior axes are divisors in the fit ratio, so zero is rejected too
    let interior_cm = normalize_dimensions(dims, "interiorDimensions", true).map_err(|(f, r)| fail(f.as_str(), r.as_str()))?;

    let capacity_kg = match (&case.max_weight, case.weight_class) {
        (Some(max_weight), _) => normalize_weight(max_weight, "maxWeight").map_err(|(f, r)| fail(f.as_str(), r.as_str()))?,
        (None, Some(class)) => capacities.capacity_kg(class),
        (None, None) => return Err(fail("maxWeight", "is missing and no weightClass is set")),
    };

    let protection_level = case
        .protection_level
        .ok_or_else(|| fail("protectionLevel", "is missing"))?;

    Ok(CheckedCase {
        item: case,
        interior_cm,
        capacity_kg,
        protection_level,
    })
}

type FieldFailure = (String, String);

fn normalize_dimensions(dims: &Dimensions, prefix: &str, strictly_positive: bool) -> Result<[f64; 3], FieldFailure> {
    let unit = dims
        .unit
        .parse::<LengthUnit>()
        .map_err(|e| (format!("{prefix}.unit"), format!("has {e}")))?;

    let axes = [("length", dims.length), ("width", dims.width), ("height", dims.height)];
    let mut out = [0.0; 3];
    for (slot, (name, value)) in out.iter_mut().zip(axes) {
        check_number(value, strictly_positive).map_err(|reason| (format!("{prefix}.{name}"), reason))?;
        *slot = value * unit.to_cm();
    }
    Ok(out)
}

fn normalize_weight(weight: &Weight, prefix: &str) -> Result<f64, FieldFailure> {
    let unit = weight
        .unit
        .parse::<WeightUnit>()
        .map_err(|e| (format!("{prefix}.unit"), format!("has {e}")))?;
    check_number(weight.value, false).map_err(|reason| (format!("{prefix}.value"), reason))?;
    Ok(weight.value * unit.to_kg())
}

fn check_number(value: f64, strictly_positive: bool) -> Result<(), String> {
    if !value.is_finite() {
        return Err("must be a finite number".to_string());
    }
    if value < 0.0 {
        return Err("must not be negative".to_string());
    }
    if strictly_positive && value == 0.0 {
        return Err("must be greater than zero".to_string());
    }
    Ok(())
}
