use crate::models::{CaseItem, GearItem, ProtectionLevel, ScoringWeights};

/// Score for a case with no brand or category affinity
pub const NEUTRAL_BRAND_SCORE: u8 = 50;
/// Score for a case whose compatibility hints name the gear's category or id
pub const HINT_BRAND_SCORE: u8 = 80;
pub const EXACT_BRAND_SCORE: u8 = 100;

const PROTECTION_BASELINE: i32 = 50;
const FEATURE_BONUS: i32 = 10;

/// Gear categories that benefit from rigid cases
pub fn default_fragile_categories() -> Vec<String> {
    vec!["microphone".to_string(), "interface".to_string(), "mixer".to_string()]
}

/// Calculate the dimension score (0-100) for a feasible pair
///
/// Takes the mean of the per-axis `gear / interior` ratios and maps it through
/// [`fit_curve`]. Both arrays must be in the same unit and every interior axis
/// must be positive.
#[inline]
pub fn dimension_score(gear_cm: &[f64; 3], interior_cm: &[f64; 3]) -> u8 {
    let avg_ratio = gear_cm
        .iter()
        .zip(interior_cm.iter())
        .map(|(gear, interior)| gear / interior)
        .sum::<f64>()
        / 3.0;

    to_score(fit_curve(avg_ratio))
}

/// Tolerance curve over the average fill ratio
///
/// ```text
///   ratio < 0.5         0 -> 50     (too much empty space)
///   0.5 <= ratio <= 0.9 50 -> 100   (snug band)
///   ratio > 0.9         100 -> 50   (tight, floored at 50)
/// ```
#[inline]
pub fn fit_curve(avg_ratio: f64) -> f64 {
    if avg_ratio < 0.5 {
        avg_ratio.max(0.0) * 100.0
    } else if avg_ratio <= 0.9 {
        50.0 + (avg_ratio - 0.5) / 0.4 * 50.0
    } else {
        (100.0 - (avg_ratio - 0.9) / 0.1 * 50.0).max(50.0)
    }
}

/// Calculate the protection score (0-100)
///
/// Scoring formula:
/// score = 50
///     + 10 per feature (waterproof, shockproof, dustproof, crushproof)
///     + level adjustment (high +15, medium +5, low -10)
///     + case type adjustment, fragile gear only (hard/flight +10, soft -5)
pub fn protection_score(
    case: &CaseItem,
    level: ProtectionLevel,
    gear_category: &str,
    fragile_categories: &[String],
) -> u8 {
    let features = [case.waterproof, case.shockproof, case.dustproof, case.crushproof];
    let mut score = PROTECTION_BASELINE + FEATURE_BONUS * features.iter().filter(|f| **f).count() as i32;

    score += match level {
        ProtectionLevel::High => 15,
        ProtectionLevel::Medium => 5,
        ProtectionLevel::Low => -10,
    };

    if is_fragile(gear_category, fragile_categories) {
        score += case_type_adjustment(&case.case_type);
    }

    score.clamp(0, 100) as u8
}

fn case_type_adjustment(case_type: &str) -> i32 {
    let case_type = case_type.to_lowercase();
    if case_type.contains("hard") || case_type.contains("flight") {
        10
    } else if case_type.contains("soft") {
        -5
    } else {
        0
    }
}

/// Whether the category names one of the fragile equipment families
#[inline]
pub fn is_fragile(category: &str, fragile_categories: &[String]) -> bool {
    let category = category.to_lowercase();
    !category.is_empty()
        && fragile_categories
            .iter()
            .any(|fragile| !fragile.is_empty() && category.contains(&fragile.to_lowercase()))
}

/// Calculate the brand/category affinity score
pub fn brand_score(gear: &GearItem, case: &CaseItem) -> u8 {
    let gear_brand = gear.brand.trim();
    if let Some(case_brand) = case.brand.as_deref().map(str::trim) {
        if !gear_brand.is_empty() && case_brand.eq_ignore_ascii_case(gear_brand) {
            return EXACT_BRAND_SCORE;
        }
    }

    let category = gear.category.trim().to_lowercase();
    let hinted = case.compatible_with.iter().any(|hint| {
        let hint = hint.trim();
        if hint.is_empty() {
            return false;
        }
        if hint == gear.id {
            return true;
        }
        let hint = hint.to_lowercase();
        !category.is_empty() && (hint.contains(&category) || category.contains(&hint))
    });

    if hinted {
        HINT_BRAND_SCORE
    } else {
        NEUTRAL_BRAND_SCORE
    }
}

/// Weighted combination of the sub-scores
#[inline]
pub fn overall_score(dimension: u8, protection: u8, brand: u8, weights: &ScoringWeights) -> u8 {
    to_score(
        dimension as f64 * weights.dimension
            + protection as f64 * weights.protection
            + brand as f64 * weights.brand,
    )
}

#[inline]
fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
