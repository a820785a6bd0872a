use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which side of a gear/case pair a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Gear,
    Case,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Gear => f.write_str("gear"),
            ItemKind::Case => f.write_str("case"),
        }
    }
}

/// A malformed or missing field on a gear or case record
///
/// Returned directly by single-pair scoring and collected per candidate
/// when ranking, so one bad case never aborts a batch.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("invalid {item} `{item_id}`: field `{field}` {reason}")]
pub struct ValidationError {
    pub item: ItemKind,
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn gear(item_id: &str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: ItemKind::Gear,
            item_id: item_id.to_string(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn case(item_id: &str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: ItemKind::Case,
            item_id: item_id.to_string(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors for a scoring weight set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("weight `{0}` must be a finite, non-negative number")]
    InvalidWeight(&'static str),

    #[error("weights must not all be zero")]
    ZeroSum,
}

/// Errors for engine tunables outside the scoring weights
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineConfigError {
    #[error("margin_cm must be a finite, non-negative number (got {0})")]
    InvalidMargin(f64),

    #[error("capacity for weight class `{0}` must be a finite number greater than zero (got {1})")]
    InvalidCapacity(&'static str, f64),
}

/// Unit string not present in the conversion table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit `{0}`")]
pub struct UnknownUnit(pub String);
