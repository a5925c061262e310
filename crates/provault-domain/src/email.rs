//! Email-pool domain types.

use serde::{Deserialize, Serialize};

/// Allocation state of a pooled email address.
///
/// `Free` addresses are claimable by the allocator; the free→used transition
/// happens exactly once per address. `Blocked` addresses are withheld by an
/// admin and never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Free,
    Used,
    Blocked,
}

impl EmailStatus {
    /// Parse from the stored string value. Returns `None` for unknown values.
    pub fn from_str_value(v: &str) -> Option<Self> {
        match v {
            "free" => Some(Self::Free),
            "used" => Some(Self::Used),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Used => "used",
            Self::Blocked => "blocked",
        }
    }
}

/// Minimal well-formedness check for an email address: exactly one `@` with
/// a non-empty local part and a dotted, non-empty domain.
pub fn validate_email_address(address: &str) -> bool {
    let mut parts = address.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_plain_addresses() {
        assert!(validate_email_address("a@x.com"));
        assert!(validate_email_address("first.last@mail.example.org"));
    }

    #[test]
    fn should_reject_malformed_addresses() {
        assert!(!validate_email_address("no-at-sign"));
        assert!(!validate_email_address("@x.com"));
        assert!(!validate_email_address("a@"));
        assert!(!validate_email_address("a@nodot"));
        assert!(!validate_email_address("a@.com"));
        assert!(!validate_email_address("a@x.com@y.com"));
    }

    #[test]
    fn should_round_trip_email_status() {
        for status in [EmailStatus::Free, EmailStatus::Used, EmailStatus::Blocked] {
            assert_eq!(EmailStatus::from_str_value(status.as_str()), Some(status));
        }
        assert_eq!(EmailStatus::from_str_value("expired"), None);
    }
}
