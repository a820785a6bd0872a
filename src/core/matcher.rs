use crate::core::{
    feasibility::{check_feasibility, DEFAULT_MARGIN_CM},
    scoring::{brand_score, default_fragile_categories, dimension_score, overall_score, protection_score},
    validation::{check_case, check_gear, CheckedCase, CheckedGear, WeightClassCapacities},
};
use crate::error::{EngineConfigError, ValidationError};
use crate::models::{CaseItem, GearItem, MatchResult, ScoringWeights};

/// Tunables for the compatibility engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Per-axis slack in centimetres for the fit gate
    pub margin_cm: f64,
    pub fragile_categories: Vec<String>,
    pub weight_classes: WeightClassCapacities,
    pub weights: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            margin_cm: DEFAULT_MARGIN_CM,
            fragile_categories: default_fragile_categories(),
            weight_classes: WeightClassCapacities::default(),
            weights: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Margin must be finite and >= 0; class capacities finite and > 0
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if !self.margin_cm.is_finite() || self.margin_cm < 0.0 {
            return Err(EngineConfigError::InvalidMargin(self.margin_cm));
        }

        let classes = &self.weight_classes;
        for (name, capacity) in [("light", classes.light), ("medium", classes.medium), ("heavy", classes.heavy)] {
            if !capacity.is_finite() || capacity <= 0.0 {
                return Err(EngineConfigError::InvalidCapacity(name, capacity));
            }
        }

        Ok(())
    }
}

/// Options for a ranking run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    /// Keep zero-score (infeasible) candidates, for diagnostic display
    pub include_infeasible: bool,
    pub limit: Option<usize>,
}

/// Result of ranking a candidate set
#[derive(Debug)]
pub struct RankedMatches {
    pub matches: Vec<MatchResult>,
    /// Candidates excluded because their record failed validation
    pub rejected: Vec<ValidationError>,
    pub total_candidates: usize,
}

/// Gear-to-case compatibility engine
///
/// # Pipeline Stages
/// 1. Validation and unit normalization
/// 2. Feasibility gate (fit + weight)
/// 3. Dimension, protection and brand sub-scores
/// 4. Weighted overall score
///
/// The engine holds configuration only and never mutates, so one instance can
/// be shared freely across threads.
#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    config: EngineConfig,
}

impl CompatibilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one gear/case pair
    ///
    /// Malformed input on either side is returned as a [`ValidationError`].
    /// A pair that fails the feasibility gate is a successful result with
    /// `compatibility_score == 0` and `infeasibility` set.
    pub fn score_match(&self, gear: &GearItem, case: &CaseItem) -> Result<MatchResult, ValidationError> {
        let gear = check_gear(gear)?;
        let case = check_case(case, &self.config.weight_classes)?;
        Ok(self.score_checked(&gear, &case))
    }

    /// Score and rank candidate cases for one gear item
    ///
    /// # Arguments
    /// * `gear` - The gear to protect
    /// * `cases` - Candidate cases, in catalog order
    /// * `options` - Infeasible inclusion and result limit
    ///
    /// # Returns
    /// Matches sorted by overall score, then dimension score, then input
    /// order. Invalid candidates are reported in `rejected`; an invalid gear
    /// record fails the whole call.
    pub fn rank_candidates(
        &self,
        gear: &GearItem,
        cases: &[CaseItem],
        options: &RankOptions,
    ) -> Result<RankedMatches, ValidationError> {
        let checked_gear = check_gear(gear)?;
        let total_candidates = cases.len();
        let mut rejected = Vec::new();

        let mut matches: Vec<MatchResult> = cases
            .iter()
            .filter_map(|case| match check_case(case, &self.config.weight_classes) {
                Ok(checked) => Some(self.score_checked(&checked_gear, &checked)),
                Err(err) => {
                    tracing::debug!("Excluding case {} from ranking for gear {}: {}", case.id, gear.id, err);
                    rejected.push(err);
                    None
                }
            })
            .filter(|result| options.include_infeasible || result.compatibility_score > 0)
            .collect();

        // Stable sort keeps input order for full ties
        matches.sort_by(|a, b| {
            b.compatibility_score
                .cmp(&a.compatibility_score)
                .then_with(|| b.dimension_score.cmp(&a.dimension_score))
        });

        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} candidates for gear {} ({} rejected)",
            matches.len(),
            total_candidates,
            gear.id,
            rejected.len()
        );

        Ok(RankedMatches {
            matches,
            rejected,
            total_candidates,
        })
    }

    fn score_checked(&self, gear: &CheckedGear<'_>, case: &CheckedCase<'_>) -> MatchResult {
        let gear_id = gear.item.id.clone();
        let case_id = case.item.id.clone();

        if let Some(reason) = check_feasibility(gear, case, self.config.margin_cm) {
            tracing::trace!("Case {} infeasible for gear {}: {:?}", case_id, gear_id, reason);
            return MatchResult {
                gear_id,
                case_id,
                compatibility_score: 0,
                dimension_score: 0,
                protection_score: 0,
                brand_score: 0,
                infeasibility: Some(reason),
            };
        }

        let dimension = dimension_score(&gear.dims_cm, &case.interior_cm);
        let protection = protection_score(
            case.item,
            case.protection_level,
            &gear.item.category,
            &self.config.fragile_categories,
        );
        let brand = brand_score(gear.item, case.item);
        let overall = overall_score(dimension, protection, brand, &self.config.weights);

        tracing::trace!(
            "Scored case {} for gear {}: overall={} dimension={} protection={} brand={}",
            case_id,
            gear_id,
            overall,
            dimension,
            protection,
            brand
        );

        MatchResult {
            gear_id,
            case_id,
            compatibility_score: overall,
            dimension_score: dimension,
            protection_score: protection,
            brand_score: brand,
            infeasibility: None,
        }
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::with_default_config()
    }
}
