//! User identity, roles and account data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable user identifier backed by the store's integer key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value as stored.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a submitted role value is not in the closed role set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised role {0:?}")]
pub struct UnknownRoleError(pub String);

/// Account role, determining the landing page and which pages an account may
/// use.
///
/// The stored representation is the lowercase name. Submissions outside this
/// set are rejected at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Books and reviews meals.
    Student,
    /// Publishes menus and reviews the week's bookings.
    Manager,
    /// Creates and deletes accounts.
    Accommodation,
    /// Operates the dining-hall access check.
    Access,
}

impl Role {
    /// Stored lowercase name of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Manager => "manager",
            Self::Accommodation => "accommodation",
            Self::Access => "access",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Self::Student),
            "manager" => Ok(Self::Manager),
            "accommodation" => Ok(Self::Accommodation),
            "access" => Ok(Self::Access),
            other => Err(UnknownRoleError(other.to_owned())),
        }
    }
}

/// Application user as held in the store.
///
/// The `password` field carries the stored credential verbatim; it must never
/// be serialised into a response body. `username` exists in the schema but is
/// not populated by sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store identifier.
    pub id: UserId,
    /// Short initials shown alongside the surname.
    pub initials: String,
    /// Family name.
    pub surname: String,
    /// Optional login alias; unset for accounts created through sign-up.
    pub username: Option<String>,
    /// Login email address.
    pub email: String,
    /// Stored credential, compared verbatim at login.
    pub password: String,
    /// Account role.
    pub role: Role,
}

/// Field set required to create a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Short initials shown alongside the surname.
    pub initials: String,
    /// Family name.
    pub surname: String,
    /// Login email address.
    pub email: String,
    /// Credential stored verbatim.
    pub password: String,
    /// Account role.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("student", Role::Student)]
    #[case("manager", Role::Manager)]
    #[case("accommodation", Role::Accommodation)]
    #[case("access", Role::Access)]
    fn roles_parse_from_stored_names(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("admin")]
    #[case("Student")]
    fn unknown_roles_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<Role>().expect_err("unknown role");
        assert_eq!(err, UnknownRoleError(raw.to_owned()));
    }

    #[rstest]
    fn user_ids_round_trip_their_raw_value() {
        let id = UserId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }
}
