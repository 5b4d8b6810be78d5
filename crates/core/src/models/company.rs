//! Company profile.

use chrono::{DateTime, Utc};
use expapp_shared::types::{CompanyId, CurrencyCode};
use serde::{Deserialize, Serialize};

/// The company the signed-up admin created. Exactly one per demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Country picked at signup.
    pub country: String,
    /// Currency every expense is converted into for approval and reporting.
    pub base_currency: CurrencyCode,
    /// When the company was created.
    pub created_at: DateTime<Utc>,
}
