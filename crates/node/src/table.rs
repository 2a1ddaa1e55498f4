use crate::TableId;
use serde::{Deserialize, Serialize};

/// A single column of a model.
///
/// Field names follow the introspection output the schema source emits,
/// so `type`, `isList` and `isRequired` deserialize directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default = "default_required")]
    pub is_required: bool,
}

fn default_required() -> bool {
    true
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            is_list: false,
            is_required: true,
        }
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }
}

/// A database model shown as a draggable card on the canvas.
///
/// The table carries no geometry. Its position lives in the canvas
/// position registry, keyed by `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: TableId,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Table {
    pub fn new(name: impl Into<TableId>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}
