use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::RankOptions;

/// Request to rank every catalog case for one gear item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "gear_id", rename = "gearId")]
    pub gear_id: String,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(rename = "includeInfeasible", default)]
    pub include_infeasible: bool,
    #[serde(default)]
    pub profile: Option<String>,
}

impl RankRequest {
    pub fn options(&self) -> RankOptions {
        RankOptions {
            include_infeasible: self.include_infeasible,
            limit: self.limit,
        }
    }
}

/// Request to score a single gear/case pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "gear_id", rename = "gearId")]
    pub gear_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "case_id", rename = "caseId")]
    pub case_id: String,
    #[serde(default)]
    pub profile: Option<String>,
}
