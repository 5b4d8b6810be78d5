//! Records held by the cookie store collections.
//!
//! Each collection cookie holds either a JSON array of one of these records
//! (users, expenses, rules) or a single record (company, session, preferences).

pub mod company;
pub mod expense;
pub mod preferences;
pub mod rule;
pub mod session;
pub mod user;

pub use company::Company;
pub use expense::{ApprovalDecision, ApprovalStep, Expense, ExpenseStatus};
pub use preferences::{Preferences, Theme};
pub use rule::{ApprovalRule, RuleKind, RuleOutcome};
pub use session::SessionRecord;
pub use user::{User, UserRole};
