//! Roles, allow-sets and the role gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// Caller access tier. `Public` is synthetic and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Public,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Public => "public",
        }
    }

    /// Parse a stored or presented role; anything unrecognised is `Public`.
    pub fn resolve(raw: Option<&str>) -> Role {
        raw.and_then(|r| r.parse().ok()).unwrap_or(Role::Public)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "public" => Ok(Role::Public),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles permitted to call an operation, fixed when the route is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowSet {
    /// "all": public, user and admin
    All,
    /// "a"
    #[default]
    Admin,
    /// "au"
    AdminOrUser,
    /// Explicit role list
    Only(&'static [Role]),
}

impl AllowSet {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            AllowSet::All => true,
            AllowSet::Admin => role == Role::Admin,
            AllowSet::AdminOrUser => matches!(role, Role::Admin | Role::User),
            AllowSet::Only(roles) => roles.contains(&role),
        }
    }
}

impl FromStr for AllowSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AllowSet::All),
            "a" => Ok(AllowSet::Admin),
            "au" => Ok(AllowSet::AdminOrUser),
            other => Err(DomainError::contract(format!(
                "Unknown allow-set shorthand '{other}'"
            ))),
        }
    }
}

/// Role gate: `Public` callers get Unauthorized, identified ones Forbidden.
pub fn validate_role(role: Role, allowed: AllowSet) -> Result<(), DomainError> {
    if allowed.allows(role) {
        return Ok(());
    }
    match role {
        Role::Public => Err(DomainError::unauthorized()),
        _ => Err(DomainError::forbidden()),
    }
}

/// Ownership check run after the role gate; admins bypass it.
pub fn ensure_owner_or_admin(
    role: Role,
    caller_id: Option<i64>,
    owner_id: i64,
) -> Result<(), DomainError> {
    match role {
        Role::Admin => Ok(()),
        Role::Public => Err(DomainError::unauthorized()),
        Role::User if caller_id == Some(owner_id) => Ok(()),
        Role::User => Err(DomainError::forbidden()),
    }
}
