//! Group, group role, and membership models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Per-group permission level. Declaration order gives the hierarchy,
/// so `Admin > Manager > Member` holds under the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupRole {
    Member,
    Manager,
    Admin,
}

impl GroupRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Member => "Member",
            GroupRole::Manager => "Manager",
            GroupRole::Admin => "Admin",
        }
    }

    /// Managers and admins moderate group content and membership.
    pub fn can_moderate(&self) -> bool {
        matches!(self, GroupRole::Manager | GroupRole::Admin)
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Member" => Ok(GroupRole::Member),
            "Manager" => Ok(GroupRole::Manager),
            "Admin" => Ok(GroupRole::Admin),
            other => Err(format!("Unknown group role: {}", other)),
        }
    }
}

/// Group entity. The creator is recorded for filtering; administrative
/// authority comes from holding the Admin role in the group, not from
/// this field.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(creator_id: Uuid, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Group {
            id: Uuid::new_v4(),
            creator_id,
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// New group creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
}

/// Group update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateGroup {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Membership record. One row per (user, group); the row is both the
/// membership and the permission level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupUserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub group_id: Uuid,
    pub role: GroupRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupUserRole {
    pub fn new(user_id: Uuid, group_id: Uuid, role: GroupRole) -> Self {
        let now = Utc::now();
        GroupUserRole {
            id: Uuid::new_v4(),
            user_id,
            group_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_role_hierarchy() {
        assert!(GroupRole::Admin > GroupRole::Manager);
        assert!(GroupRole::Manager > GroupRole::Member);
        assert!(GroupRole::Admin.can_moderate());
        assert!(GroupRole::Manager.can_moderate());
        assert!(!GroupRole::Member.can_moderate());
    }

    #[test]
    fn test_group_role_round_trip() {
        for role in [GroupRole::Member, GroupRole::Manager, GroupRole::Admin] {
            assert_eq!(role.as_str().parse::<GroupRole>(), Ok(role));
        }
        assert!("Owner".parse::<GroupRole>().is_err());
    }
}
