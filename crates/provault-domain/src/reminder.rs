//! Reminder domain types.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a reminder. Reminders are only ever mutated by
/// dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Dismissed,
}

impl ReminderStatus {
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "pending" => Some(Self::Pending),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dismissed => "dismissed",
        }
    }
}

/// Reminder kind written by the verification sweep.
pub const VERIFICATION_KIND: &str = "verification";
