//! Resource snapshots as handed over by the inventory

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SnapshotError;
use crate::model::Resource;

/// An ordered resource list. Order is only used for deterministic tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub resources: Vec<Resource>,
}

impl ResourceSnapshot {
    pub fn new(resources: Vec<Resource>) -> Self {
        ResourceSnapshot { resources }
    }

    /// Parse a snapshot document.
    ///
    /// Accepts a bare array of resources or an object with a `resources`
    /// array. `null` and every other shape fail fast.
    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("resources") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(SnapshotError::NotAList {
                        found: json_kind(&other),
                    })
                }
                None => {
                    return Err(SnapshotError::NotAList {
                        found: "an object without a resources field",
                    })
                }
            },
            other => {
                return Err(SnapshotError::NotAList {
                    found: json_kind(&other),
                })
            }
        };

        let resources = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|source| SnapshotError::InvalidResource { index, source })
            })
            .collect::<Result<Vec<Resource>, _>>()?;

        tracing::debug!("Parsed snapshot with {} resources", resources.len());
        Ok(ResourceSnapshot { resources })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
