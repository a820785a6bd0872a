// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Axis, CaseItem, Dimensions, GearItem, Infeasibility, MatchResult, ProtectionLevel, ScoringWeights, Weight, WeightClass};
pub use requests::{RankRequest, ScoreRequest};
pub use responses::{GearCaseMatch, RankResponse};
