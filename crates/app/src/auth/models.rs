//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::uuids::TypedUuid;
use thiserror::Error;
use uuid::Uuid;

/// User
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user: UserUuid,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub fn new(user: UserUuid, role: Role) -> Self {
        Self { user, role }
    }

    #[must_use]
    pub fn admin(user: UserUuid) -> Self {
        Self::new(user, Role::Admin)
    }

    #[must_use]
    pub fn customer(user: UserUuid) -> Self {
        Self::new(user, Role::Customer)
    }

    /// The only predicate used to gate administrative operations.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this session may read a resource owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: UserUuid) -> bool {
        self.is_admin() || self.user == owner
    }
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub uuid: Uuid,
    pub user: UserUuid,
    pub role: Role,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: Uuid,
    pub user: UserUuid,
    pub role: Role,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

impl SessionRecord {
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.user, self.role)
    }
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub record: SessionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_role_is_admin() {
        assert!(Session::admin(UserUuid::new()).is_admin());
        assert!(!Session::customer(UserUuid::new()).is_admin());
    }

    #[test]
    fn customers_can_only_access_their_own_resources() {
        let owner = UserUuid::new();

        assert!(Session::customer(owner).can_access(owner));
        assert!(!Session::customer(UserUuid::new()).can_access(owner));
        assert!(Session::admin(UserUuid::new()).can_access(owner));
    }

    #[test]
    fn role_parses_lowercase_names() {
        assert_eq!("admin".parse(), Ok(Role::Admin));
        assert_eq!("customer".parse(), Ok(Role::Customer));
        assert_eq!(
            "Admin".parse::<Role>(),
            Err(UnknownRole("Admin".to_string()))
        );
    }
}
