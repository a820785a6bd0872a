use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::{ItemKind, ValidationError};
use crate::models::{CaseItem, GearItem};

/// Errors that can occur while loading or querying a catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("gear `{0}` not found in catalog")]
    UnknownGear(String),

    #[error("case `{0}` not found in catalog")]
    UnknownCase(String),

    /// The record exists but was dropped while loading
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Normalized gear and case records supplied by the catalog
///
/// File shape:
/// ```json
/// { "gear": [ ... ], "cases": [ ... ] }
/// ```
///
/// Records are decoded one at a time. A record whose fields have the wrong
/// JSON type lands in `rejected` with the offending field named, and the
/// rest of the catalog still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawCatalog")]
pub struct Catalog {
    pub gear: Vec<GearItem>,
    pub cases: Vec<CaseItem>,
    #[serde(skip_serializing)]
    pub rejected: Vec<ValidationError>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    gear: Vec<Value>,
    #[serde(default)]
    cases: Vec<Value>,
}

impl From<RawCatalog> for Catalog {
    fn from(raw: RawCatalog) -> Self {
        let mut catalog = Catalog::default();

        for (index, value) in raw.gear.iter().enumerate() {
            match GearItem::deserialize(value) {
                Ok(gear) => catalog.gear.push(gear),
                Err(err) => catalog.rejected.push(record_error(ItemKind::Gear, index, value, &err)),
            }
        }

        for (index, value) in raw.cases.iter().enumerate() {
            match CaseItem::deserialize(value) {
                Ok(case) => catalog.cases.push(case),
                Err(err) => catalog.rejected.push(record_error(ItemKind::Case, index, value, &err)),
            }
        }

        catalog
    }
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog: Catalog = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for err in &catalog.rejected {
            tracing::debug!("Dropped catalog record: {}", err);
        }

        tracing::debug!(
            "Loaded catalog {} ({} gear, {} cases, {} rejected)",
            path.display(),
            catalog.gear.len(),
            catalog.cases.len(),
            catalog.rejected.len()
        );

        Ok(catalog)
    }

    pub fn gear(&self, id: &str) -> Result<&GearItem, CatalogError> {
        match self.gear.iter().find(|g| g.id == id) {
            Some(gear) => Ok(gear),
            None => Err(self.missing(ItemKind::Gear, id)),
        }
    }

    pub fn case(&self, id: &str) -> Result<&CaseItem, CatalogError> {
        match self.cases.iter().find(|c| c.id == id) {
            Some(case) => Ok(case),
            None => Err(self.missing(ItemKind::Case, id)),
        }
    }

    /// Case records dropped while loading
    pub fn rejected_cases(&self) -> impl Iterator<Item = &ValidationError> {
        self.rejected.iter().filter(|err| err.item == ItemKind::Case)
    }

    fn missing(&self, kind: ItemKind, id: &str) -> CatalogError {
        if let Some(err) = self.rejected.iter().find(|err| err.item == kind && err.item_id == id) {
            return CatalogError::Invalid(err.clone());
        }
        match kind {
            ItemKind::Gear => CatalogError::UnknownGear(id.to_string()),
            ItemKind::Case => CatalogError::UnknownCase(id.to_string()),
        }
    }
}

/// Expected JSON shape of a record field
#[derive(Clone, Copy)]
enum Shape {
    Text,
    Number,
    Flag,
    TextList,
    Object,
    OneOf(&'static [&'static str]),
}

/// (path, shape, required, nullable)
type FieldRule = (&'static str, Shape, bool, bool);

const LEVELS: &[&str] = &["low", "medium", "high"];
const CLASSES: &[&str] = &["light", "medium", "heavy"];

const GEAR_FIELDS: &[FieldRule] = &[
    ("id", Shape::Text, true, false),
    ("name", Shape::Text, false, true),
    ("dimensions", Shape::Object, false, true),
    ("dimensions.length", Shape::Number, true, false),
    ("dimensions.width", Shape::Number, true, false),
    ("dimensions.height", Shape::Number, true, false),
    ("dimensions.unit", Shape::Text, false, false),
    ("weight", Shape::Object, false, true),
    ("weight.value", Shape::Number, true, false),
    ("weight.unit", Shape::Text, false, false),
    ("category", Shape::Text, false, false),
    ("brand", Shape::Text, false, false),
    ("type", Shape::Text, false, false),
];

const CASE_FIELDS: &[FieldRule] = &[
    ("id", Shape::Text, true, false),
    ("name", Shape::Text, false, true),
    ("interiorDimensions", Shape::Object, false, true),
    ("interiorDimensions.length", Shape::Number, true, false),
    ("interiorDimensions.width", Shape::Number, true, false),
    ("interiorDimensions.height", Shape::Number, true, false),
    ("interiorDimensions.unit", Shape::Text, false, false),
    ("maxWeight", Shape::Object, false, true),
    ("maxWeight.value", Shape::Number, true, false),
    ("maxWeight.unit", Shape::Text, false, false),
    ("weightClass", Shape::OneOf(CLASSES), false, true),
    ("protectionLevel", Shape::OneOf(LEVELS), false, true),
    ("waterproof", Shape::Flag, false, false),
    ("shockproof", Shape::Flag, false, false),
    ("dustproof", Shape::Flag, false, false),
    ("crushproof", Shape::Flag, false, false),
    ("type", Shape::Text, false, false),
    ("brand", Shape::Text, false, true),
    ("compatibleWith", Shape::TextList, false, false),
];

/// Turn a record that failed to decode into a field-level validation error
fn record_error(kind: ItemKind, index: usize, value: &Value, err: &serde_json::Error) -> ValidationError {
    let item_id = value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index));

    let rules = match kind {
        ItemKind::Gear => GEAR_FIELDS,
        ItemKind::Case => CASE_FIELDS,
    };

    let (field, reason) = locate_bad_field(value, rules).unwrap_or_else(|| ("record".to_string(), err.to_string()));

    ValidationError {
        item: kind,
        item_id,
        field,
        reason,
    }
}

/// First field, in rule order, whose JSON value has the wrong shape
fn locate_bad_field(value: &Value, rules: &[FieldRule]) -> Option<(String, String)> {
    if !value.is_object() {
        return Some(("record".to_string(), "must be an object".to_string()));
    }

    for &(path, shape, required, nullable) in rules {
        let pointer = format!("/{}", path.replace('.', "/"));
        let field = match value.pointer(&pointer) {
            Some(field) => field,
            None => {
                let parent = match path.rsplit_once('.') {
                    Some((parent, _)) => value.pointer(&format!("/{}", parent.replace('.', "/"))),
                    None => Some(value),
                };
                if required && parent.map_or(false, Value::is_object) {
                    return Some((path.to_string(), "is missing".to_string()));
                }
                continue;
            }
        };

        if field.is_null() && nullable {
            continue;
        }

        let reason = match shape {
            Shape::Text if !field.is_string() => "must be a string".to_string(),
            Shape::Number if !field.is_number() => "must be a finite number".to_string(),
            Shape::Flag if !field.is_boolean() => "must be true or false".to_string(),
            Shape::Object if !field.is_object() => "must be an object".to_string(),
            Shape::TextList if !field.as_array().map_or(false, |items| items.iter().all(Value::is_string)) => {
                "must be a list of strings".to_string()
            }
            Shape::OneOf(options) if !field.as_str().map_or(false, |s| options.contains(&s)) => {
                format!("must be one of {}", options.join(", "))
            }
            _ => continue,
        };

        return Some((path.to_string(), reason));
    }

    None
}
