//! Category domain types.

use serde::{Deserialize, Serialize};

/// The two category families partitioning profiles, custom fields, and
/// statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Personal,
    ForSale,
}

impl CategoryType {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "personal" => Some(Self::Personal),
            "for_sale" => Some(Self::ForSale),
            _ => None,
        }
    }

    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::ForSale => "for_sale",
        }
    }
}
