use serde::{Deserialize, Serialize};
use crate::error::ValidationError;
use crate::models::domain::MatchResult;

/// Response for a ranking run
#[derive(Debug, Clone, Serialize)]
pub struct RankResponse {
    #[serde(rename = "gearId")]
    pub gear_id: String,
    pub matches: Vec<MatchResult>,
    pub rejected: Vec<ValidationError>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Storable form of a match, as kept by the catalog database
///
/// Feedback counters are accumulated outside the engine and always start at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearCaseMatch {
    pub id: uuid::Uuid,
    #[serde(rename = "gearId")]
    pub gear_id: String,
    #[serde(rename = "caseId")]
    pub case_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "dimensionScore")]
    pub dimension_score: u8,
    #[serde(rename = "featureScore")]
    pub feature_score: u8,
    #[serde(rename = "brandScore")]
    pub brand_score: u8,
    #[serde(rename = "helpfulCount")]
    pub helpful_count: u32,
    #[serde(rename = "notHelpfulCount")]
    pub not_helpful_count: u32,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&MatchResult> for GearCaseMatch {
    fn from(result: &MatchResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            gear_id: result.gear_id.clone(),
            case_id: result.case_id.clone(),
            compatibility_score: result.compatibility_score,
            dimension_score: result.dimension_score,
            feature_score: result.protection_score,
            brand_score: result.brand_score,
            helpful_count: 0,
            not_helpful_count: 0,
            created_at: chrono::Utc::now(),
        }
    }
}
