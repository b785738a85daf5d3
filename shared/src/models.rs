//! Domain enums shared across the NexusKart services
//!
//! These are stored as plain strings in the database and inside token
//! claims, so every variant has a stable wire form with exact round-trips
//! through `Display`/`FromStr`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a domain enum from its wire form fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct ParseEnumError(pub String);

/// Account role used for endpoint gating
///
/// `Admin` is granted at signup only through the provisioning code; every
/// other account is `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Whether this role satisfies an admin-only requirement
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Stable wire form, as stored in the database and token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    // Exact match: role strings are produced only by this crate, so any
    // other spelling is a malformed record or claim, not user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

/// Lifecycle state of a placed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::User, "USER")]
    #[case(Role::Admin, "ADMIN")]
    fn role_round_trips(#[case] role: Role, #[case] wire: &str) {
        assert_eq!(role.to_string(), wire);
        assert_eq!(wire.parse::<Role>().unwrap(), role);
    }

    #[rstest]
    #[case("user")]
    #[case("Admin")]
    #[case("")]
    #[case("SUPERUSER")]
    fn role_rejects_unknown_spellings(#[case] input: &str) {
        assert!(input.parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_uses_uppercase_wire_form() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::from_str::<Role>("\"USER\"").unwrap(), Role::User);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(!Role::default().is_admin());
    }

    #[rstest]
    #[case(OrderStatus::Pending, "PENDING")]
    #[case(OrderStatus::Completed, "COMPLETED")]
    #[case(OrderStatus::Cancelled, "CANCELLED")]
    fn order_status_round_trips(#[case] status: OrderStatus, #[case] wire: &str) {
        assert_eq!(status.to_string(), wire);
        assert_eq!(wire.parse::<OrderStatus>().unwrap(), status);
    }
}
