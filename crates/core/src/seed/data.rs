//! The fixed demo dataset.
//!
//! IDs are constant so reseeding replaces records instead of creating new
//! ones; timestamps are fixed offsets from `SEED_EPOCH`.

use chrono::{DateTime, NaiveDate, Utc};
use expapp_shared::types::{CompanyId, CurrencyCode, ExpenseId, Money, RuleId, UserId};
use rust_decimal::Decimal;

use crate::auth::{PasswordError, hash_password};
use crate::models::{
    ApprovalDecision, ApprovalRule, ApprovalStep, Company, Expense, ExpenseStatus, RuleKind,
    User, UserRole,
};

/// 2025-01-01T00:00:00Z.
const SEED_EPOCH: i64 = 1_735_689_600;

/// Demo company.
pub const COMPANY_ID: CompanyId = CompanyId::from_u128(0x0100);
/// Demo admin.
pub const ADMIN_ID: UserId = UserId::from_u128(0x0201);
/// Demo manager.
pub const MANAGER_ID: UserId = UserId::from_u128(0x0202);
/// Demo employee.
pub const EMPLOYEE_ID: UserId = UserId::from_u128(0x0203);

/// Login details of a seeded user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoCredential {
    /// Display name.
    pub name: &'static str,
    /// Login email.
    pub email: &'static str,
    /// Plaintext password.
    pub password: &'static str,
    /// Role.
    pub role: UserRole,
}

/// Credentials of every seeded user, admin first.
pub const DEMO_CREDENTIALS: [DemoCredential; 3] = [
    DemoCredential {
        name: "Alice Admin",
        email: "admin@demo.com",
        password: "admin123",
        role: UserRole::Admin,
    },
    DemoCredential {
        name: "Mark Manager",
        email: "manager@demo.com",
        password: "manager123",
        role: UserRole::Manager,
    },
    DemoCredential {
        name: "Eve Employee",
        email: "employee@demo.com",
        password: "employee123",
        role: UserRole::Employee,
    },
];

fn seed_time(day: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(SEED_EPOCH + day * 86_400, 0).unwrap_or_default()
}

fn seed_date(day: i64) -> NaiveDate {
    seed_time(day).date_naive()
}

/// The demo company.
#[must_use]
pub fn company() -> Company {
    Company {
        id: COMPANY_ID,
        name: "Acme Demo Corp".into(),
        country: "United States".into(),
        base_currency: CurrencyCode::USD,
        created_at: seed_time(0),
    }
}

/// The demo users, with freshly hashed passwords.
pub fn users() -> Result<Vec<User>, PasswordError> {
    let ids = [ADMIN_ID, MANAGER_ID, EMPLOYEE_ID];
    let managers = [None, Some(ADMIN_ID), Some(MANAGER_ID)];

    DEMO_CREDENTIALS
        .iter()
        .zip(ids)
        .zip(managers)
        .map(|((cred, id), manager_id)| {
            Ok(User {
                id,
                name: cred.name.into(),
                email: cred.email.into(),
                password_hash: hash_password(cred.password)?,
                role: cred.role,
                manager_id,
                company_id: COMPANY_ID,
                is_manager_approver: cred.role == UserRole::Employee,
                created_at: seed_time(0),
            })
        })
        .collect()
}

fn step(approver_id: UserId, decision: ApprovalDecision, day: Option<i64>) -> ApprovalStep {
    ApprovalStep {
        approver_id,
        decision,
        comment: None,
        decided_at: day.map(seed_time),
    }
}

/// The demo expenses, all filed against the demo company.
#[must_use]
pub fn expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: ExpenseId::from_u128(0x0301),
            company_id: COMPANY_ID,
            employee_id: EMPLOYEE_ID,
            amount: Money::new(Decimal::new(12_050, 2), CurrencyCode::USD),
            converted_amount: Some(Money::new(Decimal::new(12_050, 2), CurrencyCode::USD)),
            category: "Travel".into(),
            description: "Taxi to client site".into(),
            expense_date: seed_date(3),
            status: ExpenseStatus::Pending,
            approvals: vec![
                step(MANAGER_ID, ApprovalDecision::Pending, None),
                step(ADMIN_ID, ApprovalDecision::Pending, None),
            ],
            created_at: seed_time(3),
        },
        Expense {
            id: ExpenseId::from_u128(0x0302),
            company_id: COMPANY_ID,
            employee_id: EMPLOYEE_ID,
            amount: Money::new(Decimal::new(4_500, 2), CurrencyCode::EUR),
            converted_amount: Some(Money::new(Decimal::new(4_891, 2), CurrencyCode::USD)),
            category: "Meals".into(),
            description: "Team lunch in Berlin".into(),
            expense_date: seed_date(5),
            status: ExpenseStatus::Approved,
            approvals: vec![
                step(MANAGER_ID, ApprovalDecision::Approved, Some(6)),
                step(ADMIN_ID, ApprovalDecision::Approved, Some(7)),
            ],
            created_at: seed_time(5),
        },
        Expense {
            id: ExpenseId::from_u128(0x0303),
            company_id: COMPANY_ID,
            employee_id: MANAGER_ID,
            amount: Money::new(Decimal::new(89_999, 2), CurrencyCode::USD),
            converted_amount: Some(Money::new(Decimal::new(89_999, 2), CurrencyCode::USD)),
            category: "Equipment".into(),
            description: "Docking station".into(),
            expense_date: seed_date(8),
            status: ExpenseStatus::Rejected,
            approvals: vec![ApprovalStep {
                comment: Some("Use stock hardware".into()),
                ..step(ADMIN_ID, ApprovalDecision::Rejected, Some(9))
            }],
            created_at: seed_time(8),
        },
    ]
}

/// The demo approval rules.
#[must_use]
pub fn rules() -> Vec<ApprovalRule> {
    vec![
        ApprovalRule {
            id: RuleId::from_u128(0x0401),
            company_id: COMPANY_ID,
            name: "Standard approval".into(),
            kind: RuleKind::Sequential,
            approver_ids: vec![MANAGER_ID, ADMIN_ID],
            percentage_threshold: None,
            specific_approver_id: None,
            manager_first: true,
            min_amount: None,
        },
        ApprovalRule {
            id: RuleId::from_u128(0x0402),
            company_id: COMPANY_ID,
            name: "High value".into(),
            kind: RuleKind::Hybrid,
            approver_ids: vec![MANAGER_ID, ADMIN_ID],
            percentage_threshold: Some(60),
            specific_approver_id: Some(ADMIN_ID),
            manager_first: true,
            min_amount: Some(Decimal::new(500, 0)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_epoch() {
        assert_eq!(seed_time(0).to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert_eq!(seed_date(3).to_string(), "2025-01-04");
    }

    #[test]
    fn test_expenses_reference_seeded_users_and_company() {
        let user_ids: HashSet<UserId> = [ADMIN_ID, MANAGER_ID, EMPLOYEE_ID].into();
        for expense in expenses() {
            assert_eq!(expense.company_id, COMPANY_ID);
            assert!(user_ids.contains(&expense.employee_id));
            assert!(expense.approvals.iter().all(|s| user_ids.contains(&s.approver_id)));
        }
    }

    #[test]
    fn test_seeded_statuses_agree_with_standard_rule() {
        use crate::models::RuleOutcome::{Approved, Pending, Rejected};

        let standard = &rules()[0];
        let outcomes: Vec<_> = expenses()
            .iter()
            .map(|e| standard.evaluate(&e.approvals))
            .collect();
        assert_eq!(outcomes, vec![Pending, Approved, Rejected]);
    }

    #[test]
    fn test_manager_chain() {
        let users = users().unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].manager_id, None);
        assert_eq!(users[1].manager_id, Some(ADMIN_ID));
        assert_eq!(users[2].manager_id, Some(MANAGER_ID));
        assert!(users[2].is_manager_approver);
    }
}
