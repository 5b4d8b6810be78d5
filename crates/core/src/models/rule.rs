//! Approval rules.
//!
//! A rule decides when the approval trail of an expense is complete. Rules are
//! evaluated against the trail only; who ends up on the trail is decided when
//! the expense is submitted.

use expapp_shared::types::{CompanyId, RuleId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::expense::{ApprovalDecision, ApprovalStep};

/// How a rule combines approver decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Every approver, in order. One rejection rejects.
    Sequential,
    /// A percentage of approvers must approve.
    Percentage,
    /// One named approver decides.
    SpecificApprover,
    /// Percentage reached OR the named approver approves.
    Hybrid,
}

/// Result of evaluating a rule against an approval trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Decisions are still outstanding.
    Pending,
    /// The expense is approved.
    Approved,
    /// The expense is rejected.
    Rejected,
}

/// An approval rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRule {
    /// Rule ID.
    pub id: RuleId,
    /// Company the rule belongs to.
    pub company_id: CompanyId,
    /// Display name.
    pub name: String,
    /// Combination strategy.
    pub kind: RuleKind,
    /// Approvers, in order.
    pub approver_ids: Vec<UserId>,
    /// Required approval percentage (0-100) for percentage and hybrid rules.
    #[serde(default)]
    pub percentage_threshold: Option<u8>,
    /// Named approver for specific-approver and hybrid rules.
    #[serde(default)]
    pub specific_approver_id: Option<UserId>,
    /// Put the submitter's manager first on the trail.
    #[serde(default)]
    pub manager_first: bool,
    /// Smallest base-currency amount the rule applies to.
    #[serde(default)]
    pub min_amount: Option<Decimal>,
}

impl ApprovalRule {
    /// Returns true if the rule applies to an amount in the company's base currency.
    #[must_use]
    pub fn applies_to(&self, amount: Decimal) -> bool {
        self.min_amount.is_none_or(|min| amount >= min)
    }

    /// Evaluates the rule against an approval trail.
    #[must_use]
    pub fn evaluate(&self, steps: &[ApprovalStep]) -> RuleOutcome {
        match self.kind {
            RuleKind::Sequential => sequential(steps),
            RuleKind::Percentage => self.percentage(steps),
            RuleKind::SpecificApprover => self.specific(steps),
            RuleKind::Hybrid => match (self.percentage(steps), self.specific(steps)) {
                (RuleOutcome::Approved, _) | (_, RuleOutcome::Approved) => RuleOutcome::Approved,
                (RuleOutcome::Rejected, RuleOutcome::Rejected) => RuleOutcome::Rejected,
                _ => RuleOutcome::Pending,
            },
        }
    }

    fn percentage(&self, steps: &[ApprovalStep]) -> RuleOutcome {
        if steps.is_empty() {
            return RuleOutcome::Pending;
        }
        let threshold = u32::from(self.percentage_threshold.unwrap_or(100).min(100));
        let total = count(steps, |_| true);
        let approved = count(steps, |d| d == ApprovalDecision::Approved);
        let open = count(steps, |d| d == ApprovalDecision::Pending);

        // Compare as approved/total >= threshold/100 without division.
        if approved * 100 >= threshold * total {
            RuleOutcome::Approved
        } else if (approved + open) * 100 < threshold * total {
            RuleOutcome::Rejected
        } else {
            RuleOutcome::Pending
        }
    }

    fn specific(&self, steps: &[ApprovalStep]) -> RuleOutcome {
        let Some(approver) = self.specific_approver_id else {
            return RuleOutcome::Pending;
        };
        match steps
            .iter()
            .find(|step| step.approver_id == approver)
            .map(|step| step.decision)
        {
            Some(ApprovalDecision::Approved) => RuleOutcome::Approved,
            Some(ApprovalDecision::Rejected) => RuleOutcome::Rejected,
            _ => RuleOutcome::Pending,
        }
    }
}

fn sequential(steps: &[ApprovalStep]) -> RuleOutcome {
    if steps
        .iter()
        .any(|step| step.decision == ApprovalDecision::Rejected)
    {
        RuleOutcome::Rejected
    } else if !steps.is_empty()
        && steps
            .iter()
            .all(|step| step.decision == ApprovalDecision::Approved)
    {
        RuleOutcome::Approved
    } else {
        RuleOutcome::Pending
    }
}

fn count(steps: &[ApprovalStep], pred: impl Fn(ApprovalDecision) -> bool) -> u32 {
    u32::try_from(steps.iter().filter(|step| pred(step.decision)).count()).unwrap_or(u32::MAX)
}
