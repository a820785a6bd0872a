use serde::{Deserialize, Serialize};

use crate::error::WeightsError;

/// Bounding box or interior cavity, in the unit named by `unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_length_unit")]
    pub unit: String,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64, unit: &str) -> Self {
        Self {
            length,
            width,
            height,
            unit: unit.to_string(),
        }
    }
}

fn default_length_unit() -> String { "cm".to_string() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    #[serde(default = "default_weight_unit")]
    pub unit: String,
}

impl Weight {
    pub fn new(value: f64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
        }
    }
}

fn default_weight_unit() -> String { "kg".to_string() }

/// A piece of audio gear to be protected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub weight: Option<Weight>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(rename = "type", default)]
    pub gear_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    Low,
    Medium,
    High,
}

/// Coarse capacity class used when a case has no explicit `maxWeight`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    Light,
    Medium,
    Heavy,
}

/// A protective case and its usable cavity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "interiorDimensions", default)]
    pub interior_dimensions: Option<Dimensions>,
    #[serde(rename = "maxWeight", default)]
    pub max_weight: Option<Weight>,
    #[serde(rename = "weightClass", default)]
    pub weight_class: Option<WeightClass>,
    #[serde(rename = "protectionLevel", default)]
    pub protection_level: Option<ProtectionLevel>,
    #[serde(default)]
    pub waterproof: bool,
    #[serde(default)]
    pub shockproof: bool,
    #[serde(default)]
    pub dustproof: bool,
    #[serde(default)]
    pub crushproof: bool,
    #[serde(rename = "type", default)]
    pub case_type: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(rename = "compatibleWith", default)]
    pub compatible_with: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Length,
    Width,
    Height,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Length, Axis::Width, Axis::Height];
}

/// Why a pair failed the feasibility gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Infeasibility {
    /// Gear exceeds the cavity (plus margin) on these axes
    Oversize { axes: Vec<Axis> },
    Overweight {
        #[serde(rename = "gearKg")]
        gear_kg: f64,
        #[serde(rename = "capacityKg")]
        capacity_kg: f64,
    },
}

/// Scored gear/case pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "gearId")]
    pub gear_id: String,
    #[serde(rename = "caseId")]
    pub case_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "dimensionScore")]
    pub dimension_score: u8,
    #[serde(rename = "protectionScore")]
    pub protection_score: u8,
    #[serde(rename = "brandScore")]
    pub brand_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infeasibility: Option<Infeasibility>,
}

impl MatchResult {
    pub fn is_feasible(&self) -> bool {
        self.infeasibility.is_none()
    }
}

/// Weights of the three sub-scores in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub dimension: f64,
    pub protection: f64,
    pub brand: f64,
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), WeightsError> {
        let named = [
            ("dimension", self.dimension),
            ("protection", self.protection),
            ("brand", self.brand),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::InvalidWeight(name));
            }
        }
        if self.sum() <= 0.0 {
            return Err(WeightsError::ZeroSum);
        }
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.dimension + self.protection + self.brand
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            dimension: 0.6,
            protection: 0.3,
            brand: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights { dimension: 0.6, protection: -0.3, brand: 0.1 };
        assert_eq!(weights.validate(), Err(WeightsError::InvalidWeight("protection")));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let weights = ScoringWeights { dimension: 0.0, protection: 0.0, brand: 0.0 };
        assert_eq!(weights.validate(), Err(WeightsError::ZeroSum));
    }

    #[test]
    fn test_case_deserializes_catalog_shape() {
        let json = r#"{
            "id": "case-1",
            "interiorDimensions": {"length": 52, "width": 32, "height": 17, "unit": "cm"},
            "maxWeight": {"value": 5, "unit": "kg"},
            "protectionLevel": "high",
            "waterproof": true,
            "type": "Hard",
            "compatibleWith": ["Synthesizer"]
        }"#;

        let case: CaseItem = serde_json::from_str(json).unwrap();
        assert_eq!(case.protection_level, Some(ProtectionLevel::High));
        assert_eq!(case.case_type, "Hard");
        assert!(case.waterproof);
        assert!(!case.shockproof);
        assert_eq!(case.compatible_with, vec!["Synthesizer"]);
    }

    #[test]
    fn test_infeasibility_serializes_tagged() {
        let reason = Infeasibility::Oversize { axes: vec![Axis::Length, Axis::Height] };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["kind"], "oversize");
        assert_eq!(json["axes"][1], "height");
    }
}
