//! Custom-field domain types.

use serde::{Deserialize, Serialize};

/// Input kind of a custom field. `Select` fields carry an option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Date,
    Textarea,
}

impl FieldKind {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "select" => Some(Self::Select),
            "date" => Some(Self::Date),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }

    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Date => "date",
            Self::Textarea => "textarea",
        }
    }
}
