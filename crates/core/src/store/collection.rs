//! Registry of the collections the store manages.
//!
//! Every cookie name the application uses is derived here, from the store
//! prefix plus either a fixed collection name or the `rates_` family.

use expapp_shared::types::CurrencyCode;

/// Sub-prefix of the per-currency exchange-rate cookies.
pub const RATES_SUB_PREFIX: &str = "rates_";

/// A logical collection persisted as one cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// `Vec<User>`.
    Users,
    /// `Company`.
    Company,
    /// `Vec<Expense>`.
    Expenses,
    /// `Vec<ApprovalRule>`.
    Rules,
    /// `SessionRecord`.
    Session,
    /// `Preferences`.
    Preferences,
}

impl Collection {
    /// Every collection, in inspector display order.
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::Company,
        Self::Expenses,
        Self::Rules,
        Self::Session,
        Self::Preferences,
    ];

    /// Collections owned by the demo seeder.
    pub const DEMO: [Self; 4] = [Self::Users, Self::Company, Self::Expenses, Self::Rules];

    /// Name appended to the store prefix.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Company => "company",
            Self::Expenses => "expenses",
            Self::Rules => "rules",
            Self::Session => "session",
            Self::Preferences => "prefs",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Company => "Company",
            Self::Expenses => "Expenses",
            Self::Rules => "Rules",
            Self::Session => "Session",
            Self::Preferences => "Preferences",
        }
    }

    /// Full cookie name under `prefix`.
    #[must_use]
    pub fn key(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.name())
    }

    /// Returns true if the collection is owned by the demo seeder.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        Self::DEMO.contains(self)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cookie name of the rate cache for `currency`.
#[must_use]
pub fn rate_key(prefix: &str, currency: CurrencyCode) -> String {
    format!("{prefix}{RATES_SUB_PREFIX}{currency}")
}
