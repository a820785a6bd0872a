// Core algorithm exports
pub mod feasibility;
pub mod matcher;
pub mod scoring;
pub mod synthetic;
pub mod units;
pub mod validation;

pub use feasibility::{check_feasibility, oversize_axes};
pub use matcher::{CompatibilityEngine, EngineConfig, RankOptions, RankedMatches};
pub use scoring::{brand_score, dimension_score, fit_curve, overall_score, protection_score};
pub use synthetic::{simulate_match, simulate_score};
pub use units::{LengthUnit, WeightUnit};
pub use validation::{check_case, check_gear, WeightClassCapacities};
