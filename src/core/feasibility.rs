use crate::core::validation::{CheckedCase, CheckedGear};
use crate::models::{Axis, Infeasibility};

/// Default slack allowed per axis, in centimetres
pub const DEFAULT_MARGIN_CM: f64 = 0.5;

/// Hard pass/fail gate that runs before any weighted scoring
///
/// Returns `None` when the gear fits on every axis (within `margin_cm`) and is
/// no heavier than the case capacity. When both checks fail the dimensional
/// reason is reported.
#[inline]
pub fn check_feasibility(
    gear: &CheckedGear<'_>,
    case: &CheckedCase<'_>,
    margin_cm: f64,
) -> Option<Infeasibility> {
    let axes = oversize_axes(&gear.dims_cm, &case.interior_cm, margin_cm);
    if !axes.is_empty() {
        return Some(Infeasibility::Oversize { axes });
    }

    if gear.weight_kg > case.capacity_kg {
        return Some(Infeasibility::Overweight {
            gear_kg: gear.weight_kg,
            capacity_kg: case.capacity_kg,
        });
    }

    None
}

/// Axes on which the gear exceeds the interior plus margin
#[inline]
pub fn oversize_axes(gear_cm: &[f64; 3], interior_cm: &[f64; 3], margin_cm: f64) -> Vec<Axis> {
    Axis::ALL
        .iter()
        .zip(gear_cm.iter().zip(interior_cm.iter()))
        .filter(|(_, (gear, interior))| **gear > **interior + margin_cm)
        .map(|(axis, _)| *axis)
        .collect()
}
