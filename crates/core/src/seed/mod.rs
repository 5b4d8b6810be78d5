//! Demo data seeding.
//!
//! Seeding overwrites the four demo collections (users, company, expenses,
//! rules) through the store, so running it twice leaves one copy of each.
//! Clearing removes exactly those four; session and preferences survive both.
//!
//! There is no rollback: if a write fails halfway, earlier collections stay written.

pub mod data;

use expapp_shared::AppError;
use thiserror::Error;
use tracing::info;

use crate::auth::PasswordError;
use crate::store::{Collection, CookieJar, CookieStore, StoreError};

pub use data::{DEMO_CREDENTIALS, DemoCredential};

/// Errors from seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A collection write failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A demo password could not be hashed.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<SeedError> for AppError {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::Store(e) => e.into(),
            SeedError::Password(e) => Self::Internal(e.to_string()),
        }
    }
}

/// What a seed run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Users written.
    pub users: usize,
    /// Expenses written.
    pub expenses: usize,
    /// Rules written.
    pub rules: usize,
}

/// Installs and removes the demo dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSeeder;

impl DemoSeeder {
    /// Creates a seeder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes the demo dataset, replacing whatever the demo collections held.
    ///
    /// Logs the demo login credentials at `info` level.
    pub fn seed<J: CookieJar>(&self, store: &mut CookieStore<J>) -> Result<SeedReport, SeedError> {
        let users = data::users()?;
        let expenses = data::expenses();
        let rules = data::rules();

        store.set_users(&users)?;
        store.set_company(&data::company())?;
        store.set_expenses(&expenses)?;
        store.set_rules(&rules)?;

        for cred in &DEMO_CREDENTIALS {
            info!(
                email = cred.email,
                password = cred.password,
                role = %cred.role,
                "Demo login available"
            );
        }

        let report = SeedReport {
            users: users.len(),
            expenses: expenses.len(),
            rules: rules.len(),
        };
        info!(?report, "Demo data seeded");
        Ok(report)
    }

    /// Removes the demo collections. Session and preferences are kept.
    pub fn clear<J: CookieJar>(&self, store: &mut CookieStore<J>) -> Result<(), StoreError> {
        for collection in Collection::DEMO {
            store.clear_one(collection)?;
        }
        info!("Demo data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preferences;
    use crate::models::SessionRecord;
    use crate::store::MemoryJar;
    use chrono::Utc;

    #[test]
    fn test_seed_writes_all_demo_collections() {
        let mut store = CookieStore::new(MemoryJar::new());
        let report = DemoSeeder::new().seed(&mut store).unwrap();

        assert_eq!(report, SeedReport { users: 3, expenses: 3, rules: 2 });
        assert_eq!(store.users().len(), 3);
        assert_eq!(store.company().map(|c| c.id), Some(data::COMPANY_ID));
        assert_eq!(store.expenses().len(), 3);
        assert_eq!(store.rules().len(), 2);
        assert!(store.session().is_none());
    }

    #[test]
    fn test_seed_twice_does_not_duplicate() {
        let mut store = CookieStore::new(MemoryJar::new());
        let seeder = DemoSeeder::new();
        seeder.seed(&mut store).unwrap();
        let once = store.users().len();
        seeder.seed(&mut store).unwrap();

        assert_eq!(store.users().len(), once);
        assert_eq!(store.expenses().len(), 3);
        assert_eq!(store.managed_names().len(), 4);
    }

    #[test]
    fn test_clear_keeps_session_and_preferences() {
        let mut store = CookieStore::new(MemoryJar::new());
        let seeder = DemoSeeder::new();
        seeder.seed(&mut store).unwrap();
        store
            .set_session(&SessionRecord::open(data::ADMIN_ID, Utc::now()))
            .unwrap();
        store.set_preferences(&Preferences::default()).unwrap();

        seeder.clear(&mut store).unwrap();

        assert!(store.users().is_empty());
        assert!(store.company().is_none());
        assert!(store.expenses().is_empty());
        assert!(store.rules().is_empty());
        assert!(store.session().is_some());
        assert!(store.get::<Preferences>(Collection::Preferences).is_some());
    }

    #[test]
    fn test_seed_surfaces_storage_exhaustion() {
        use crate::store::JarLimits;

        let jar = MemoryJar::with_limits(JarLimits {
            max_cookie_bytes: 256,
            max_cookies: 10,
        });
        let mut store = CookieStore::new(jar);
        let err = DemoSeeder::new().seed(&mut store).unwrap_err();
        assert!(matches!(&err, SeedError::Store(e) if e.is_exhaustion()));
        assert_eq!(AppError::from(err).error_code(), "STORAGE_ERROR");
    }
}
