//! GearCase Algo - compatibility scoring for audio gear and protective cases
//!
//! This library scores how well a protective case suits a piece of audio gear
//! and ranks candidate cases. Scoring is a pure, deterministic pipeline:
//! a hard feasibility gate (fit + weight) followed by weighted dimension,
//! protection and brand sub-scores.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{CompatibilityEngine, EngineConfig, RankOptions, RankedMatches, simulate_score};
pub use error::{EngineConfigError, ValidationError, WeightsError};
pub use models::{CaseItem, GearItem, MatchResult, ScoringWeights, RankRequest, RankResponse, GearCaseMatch};
