//! Expense claims and their approval trail.

use chrono::{DateTime, NaiveDate, Utc};
use expapp_shared::types::{CompanyId, ExpenseId, Money, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense status in the approval workflow.
///
/// The valid transitions are:
/// - Draft → Pending (submit)
/// - Pending → Approved (rule satisfied)
/// - Pending → Rejected (any approver rejects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Saved but not submitted.
    Draft,
    /// Waiting on approvers.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

impl ExpenseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One approver's decision on an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    /// Not decided yet.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

/// A step in an expense's approval trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// Who has to decide.
    pub approver_id: UserId,
    /// What they decided.
    pub decision: ApprovalDecision,
    /// Optional comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// When they decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

/// An expense claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Company the claim is filed against.
    pub company_id: CompanyId,
    /// Who filed it.
    pub employee_id: UserId,
    /// Amount in the currency it was spent in.
    pub amount: Money,
    /// Amount in the company's base currency, once converted.
    #[serde(default)]
    pub converted_amount: Option<Money>,
    /// Category label.
    pub category: String,
    /// Free text.
    pub description: String,
    /// Day the money was spent.
    pub expense_date: NaiveDate,
    /// Workflow status.
    pub status: ExpenseStatus,
    /// Approval trail, in order.
    #[serde(default)]
    pub approvals: Vec<ApprovalStep>,
    /// When the claim was created.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Returns the approver whose decision is currently outstanding, in trail order.
    #[must_use]
    pub fn next_approver(&self) -> Option<UserId> {
        if self.status != ExpenseStatus::Pending {
            return None;
        }
        self.approvals
            .iter()
            .find(|step| step.decision == ApprovalDecision::Pending)
            .map(|step| step.approver_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expapp_shared::types::CurrencyCode;
    use rust_decimal_macros::dec;

    fn step(approver: u128, decision: ApprovalDecision) -> ApprovalStep {
        ApprovalStep {
            approver_id: UserId::from_u128(approver),
            decision,
            comment: None,
            decided_at: None,
        }
    }

    fn expense(status: ExpenseStatus, approvals: Vec<ApprovalStep>) -> Expense {
        Expense {
            id: ExpenseId::from_u128(1),
            company_id: CompanyId::from_u128(1),
            employee_id: UserId::from_u128(9),
            amount: Money::new(dec!(42.00), CurrencyCode::USD),
            converted_amount: None,
            category: "Meals".into(),
            description: "Lunch".into(),
            expense_date: NaiveDate::default(),
            status,
            approvals,
            created_at: DateTime::default(),
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExpenseStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_next_approver_follows_trail_order() {
        let e = expense(
            ExpenseStatus::Pending,
            vec![
                step(1, ApprovalDecision::Approved),
                step(2, ApprovalDecision::Pending),
                step(3, ApprovalDecision::Pending),
            ],
        );
        assert_eq!(e.next_approver(), Some(UserId::from_u128(2)));
    }

    #[test]
    fn test_next_approver_none_when_not_pending() {
        let e = expense(
            ExpenseStatus::Approved,
            vec![step(1, ApprovalDecision::Pending)],
        );
        assert_eq!(e.next_approver(), None);
    }

    #[test]
    fn test_optional_step_fields_are_omitted() {
        let json = serde_json::to_value(step(1, ApprovalDecision::Pending)).unwrap();
        assert!(json.get("comment").is_none());
        assert!(json.get("decided_at").is_none());
        assert_eq!(json["decision"], "pending");
    }
}
