//! Schema documents produced by the introspection source.
//!
//! ```json
//! { "models": [ { "name": "User", "fields": [ { "name": "id", "type": "Int" } ] } ] }
//! ```

use crate::{Table, TableId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Error type for schema loading.
#[derive(Debug)]
pub enum SchemaError {
    Parse(String),
    DuplicateModel(TableId),
    EmptyName,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::DuplicateModel(name) => write!(f, "Duplicate model: {}", name),
            Self::EmptyName => write!(f, "Model with empty name"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// The set of models to lay out on the canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub models: Vec<Table>,
}

impl Schema {
    pub fn new(models: Vec<Table>) -> Self {
        Self { models }
    }

    /// Parse and validate a schema document.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Model names must be non-empty and unique.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for model in &self.models {
            if model.name.as_str().is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if !seen.insert(model.name.clone()) {
                return Err(SchemaError::DuplicateModel(model.name.clone()));
            }
        }
        Ok(())
    }
}
