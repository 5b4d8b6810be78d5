//! Users and their roles.

use chrono::{DateTime, Utc};
use expapp_shared::types::{CompanyId, UserId};
use serde::{Deserialize, Serialize};

/// User role in the company hierarchy.
///
/// Roles are ordered from lowest to highest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Submits expenses.
    Employee = 0,
    /// Approves the expenses of their reports.
    Manager = 1,
    /// Manages users, rules and company settings.
    Admin = 2,
}

impl UserRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Login email, compared case-insensitively.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Role in the company.
    pub role: UserRole,
    /// Direct manager, if any.
    #[serde(default)]
    pub manager_id: Option<UserId>,
    /// Company the user belongs to.
    pub company_id: CompanyId,
    /// Whether the manager must approve before the rule's approvers see an expense.
    #[serde(default)]
    pub is_manager_approver: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if `email` identifies this user.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
