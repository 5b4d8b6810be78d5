//! The cookie store: typed collections over a [`CookieJar`].

use cookie::Cookie;
use cookie::time::{Duration, OffsetDateTime};
use expapp_shared::config::{MAX_EXPIRY_DAYS, StoreConfig};
use expapp_shared::types::CurrencyCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::collection::{Collection, RATES_SUB_PREFIX, rate_key};
use super::error::StoreError;
use super::jar::{CookieJar, encoded_size};
use crate::currency::RateCacheEntry;
use crate::models::{ApprovalRule, Company, Expense, Preferences, SessionRecord, User};

/// Result of reading a collection, with corruption kept observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The cookie exists and decoded.
    Present(T),
    /// No cookie.
    Absent,
    /// The cookie exists but does not decode as the expected shape.
    Corrupt {
        /// Decoder message.
        reason: String,
    },
}

impl<T> Lookup<T> {
    /// Collapses corruption into absence.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Corrupt { .. } => None,
        }
    }

    /// Returns true if the cookie exists but is malformed.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// Attributes applied to every cookie the store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    /// Namespace prefix.
    pub prefix: String,
    /// `Path` attribute.
    pub path: String,
    /// Days until expiry.
    pub expiry_days: i64,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for CookieOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            path: config.path.clone(),
            expiry_days: config.expiry_days,
        }
    }
}

/// Typed, namespaced access to a cookie jar.
///
/// The store is the only writer of collection cookies and the only place
/// collection values are encoded or decoded.
#[derive(Debug)]
pub struct CookieStore<J> {
    jar: J,
    options: CookieOptions,
}

impl<J: CookieJar> CookieStore<J> {
    /// Creates a store with the default `expapp_` namespace.
    pub fn new(jar: J) -> Self {
        Self::with_options(jar, CookieOptions::default())
    }

    /// Creates a store with explicit cookie options.
    pub fn with_options(jar: J, options: CookieOptions) -> Self {
        Self { jar, options }
    }

    /// Namespace prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.options.prefix
    }

    /// Cookie options.
    #[must_use]
    pub const fn options(&self) -> &CookieOptions {
        &self.options
    }

    /// The underlying jar.
    #[must_use]
    pub const fn jar(&self) -> &J {
        &self.jar
    }

    /// The underlying jar, mutably. Writes made through it bypass the store.
    pub fn jar_mut(&mut self) -> &mut J {
        &mut self.jar
    }

    /// Consumes the store and returns the jar.
    pub fn into_jar(self) -> J {
        self.jar
    }

    /// Cookie name for a collection.
    #[must_use]
    pub fn key(&self, collection: Collection) -> String {
        collection.key(&self.options.prefix)
    }

    // ------------------------------------------------------------------
    // Generic collection access
    // ------------------------------------------------------------------

    /// Reads a collection, reporting malformed cookies as [`Lookup::Corrupt`].
    pub fn lookup<T: DeserializeOwned>(&self, collection: Collection) -> Lookup<T> {
        self.lookup_key(&self.key(collection))
    }

    /// Reads a collection. Missing and malformed cookies both read as `None`.
    pub fn get<T: DeserializeOwned>(&self, collection: Collection) -> Option<T> {
        self.get_key(&self.key(collection))
    }

    /// Writes a collection as JSON, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not serialize, the configured expiry
    /// is out of range, or the jar refuses the cookie.
    pub fn set<T: Serialize + ?Sized>(
        &mut self,
        collection: Collection,
        value: &T,
    ) -> Result<(), StoreError> {
        let key = self.key(collection);
        self.write_json(key, value)
    }

    /// Removes one collection.
    pub fn clear_one(&mut self, collection: Collection) -> Result<(), StoreError> {
        let key = self.key(collection);
        if self.jar.remove(&key)? {
            debug!(cookie = %key, "Cleared cookie");
        }
        Ok(())
    }

    /// Removes every cookie in the namespace, rate caches included.
    ///
    /// Cookies outside the namespace are left alone. Returns how many were removed.
    pub fn clear_all(&mut self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for name in self.managed_names() {
            if self.jar.remove(&name)? {
                removed += 1;
            }
        }
        debug!(prefix = %self.options.prefix, removed, "Cleared all store cookies");
        Ok(removed)
    }

    /// Suffixes of every cookie named `<prefix><sub_prefix><suffix>`.
    ///
    /// Order follows the jar and is not guaranteed.
    #[must_use]
    pub fn list_dynamic_keys(&self, sub_prefix: &str) -> Vec<String> {
        let family = format!("{}{sub_prefix}", self.options.prefix);
        self.jar
            .names()
            .into_iter()
            .filter_map(|name| {
                name.strip_prefix(&family)
                    .filter(|suffix| !suffix.is_empty())
                    .map(str::to_string)
            })
            .collect()
    }

    /// Raw value of any cookie, managed or not.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value().to_string())
    }

    /// Every cookie name in the jar.
    #[must_use]
    pub fn cookie_names(&self) -> Vec<String> {
        self.jar.names()
    }

    /// Cookie names inside the namespace.
    #[must_use]
    pub fn managed_names(&self) -> Vec<String> {
        self.jar
            .names()
            .into_iter()
            .filter(|name| name.starts_with(&self.options.prefix))
            .collect()
    }

    // ------------------------------------------------------------------
    // Typed collections
    // ------------------------------------------------------------------

    /// All users. Empty when absent.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.get(Collection::Users).unwrap_or_default()
    }

    /// Replaces the users collection.
    pub fn set_users(&mut self, users: &[User]) -> Result<(), StoreError> {
        self.set(Collection::Users, users)
    }

    /// The company profile.
    #[must_use]
    pub fn company(&self) -> Option<Company> {
        self.get(Collection::Company)
    }

    /// Replaces the company profile.
    pub fn set_company(&mut self, company: &Company) -> Result<(), StoreError> {
        self.set(Collection::Company, company)
    }

    /// All expenses. Empty when absent.
    #[must_use]
    pub fn expenses(&self) -> Vec<Expense> {
        self.get(Collection::Expenses).unwrap_or_default()
    }

    /// Replaces the expenses collection.
    pub fn set_expenses(&mut self, expenses: &[Expense]) -> Result<(), StoreError> {
        self.set(Collection::Expenses, expenses)
    }

    /// All approval rules. Empty when absent.
    #[must_use]
    pub fn rules(&self) -> Vec<ApprovalRule> {
        self.get(Collection::Rules).unwrap_or_default()
    }

    /// Replaces the rules collection.
    pub fn set_rules(&mut self, rules: &[ApprovalRule]) -> Result<(), StoreError> {
        self.set(Collection::Rules, rules)
    }

    /// The current session, if someone is logged in.
    #[must_use]
    pub fn session(&self) -> Option<SessionRecord> {
        self.get(Collection::Session)
    }

    /// Replaces the session record.
    pub fn set_session(&mut self, session: &SessionRecord) -> Result<(), StoreError> {
        self.set(Collection::Session, session)
    }

    /// Removes the session record.
    pub fn clear_session(&mut self) -> Result<(), StoreError> {
        self.clear_one(Collection::Session)
    }

    /// Display preferences. Defaults when absent.
    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.get(Collection::Preferences).unwrap_or_default()
    }

    /// Replaces the preferences.
    pub fn set_preferences(&mut self, prefs: &Preferences) -> Result<(), StoreError> {
        self.set(Collection::Preferences, prefs)
    }

    // ------------------------------------------------------------------
    // Rate caches
    // ------------------------------------------------------------------

    /// Cached rate table for `base`, whatever its age.
    #[must_use]
    pub fn rates(&self, base: CurrencyCode) -> Option<RateCacheEntry> {
        self.get_key(&rate_key(&self.options.prefix, base))
    }

    /// Stores a rate table under its base currency.
    pub fn set_rates(&mut self, entry: &RateCacheEntry) -> Result<(), StoreError> {
        let key = rate_key(&self.options.prefix, entry.base);
        self.write_json(key, entry)
    }

    /// Removes the cached rate table for `base`.
    pub fn clear_rates(&mut self, base: CurrencyCode) -> Result<(), StoreError> {
        self.jar.remove(&rate_key(&self.options.prefix, base))?;
        Ok(())
    }

    /// Currencies that currently have a rate cache cookie.
    #[must_use]
    pub fn cached_rate_currencies(&self) -> Vec<CurrencyCode> {
        self.list_dynamic_keys(RATES_SUB_PREFIX)
            .iter()
            .filter_map(|code| code.parse().ok())
            .collect()
    }

    // ------------------------------------------------------------------

    fn lookup_key<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        match self.jar.get(key) {
            None => Lookup::Absent,
            Some(cookie) => match serde_json::from_str(cookie.value()) {
                Ok(value) => Lookup::Present(value),
                Err(e) => Lookup::Corrupt {
                    reason: e.to_string(),
                },
            },
        }
    }

    fn get_key<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.lookup_key(key) {
            Lookup::Present(value) => Some(value),
            Lookup::Absent => None,
            Lookup::Corrupt { reason } => {
                warn!(cookie = %key, %reason, "Treating malformed cookie as absent");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &mut self,
        key: String,
        value: &T,
    ) -> Result<(), StoreError> {
        let days = self.options.expiry_days;
        if !(1..=MAX_EXPIRY_DAYS).contains(&days) {
            return Err(StoreError::InvalidExpiry {
                days,
                max: MAX_EXPIRY_DAYS,
            });
        }

        let json = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
            name: key.clone(),
            reason: e.to_string(),
        })?;
        let cookie = Cookie::build((key, json))
            .path(self.options.path.clone())
            .expires(OffsetDateTime::now_utc() + Duration::days(days))
            .build();

        debug!(cookie = %cookie.name(), bytes = encoded_size(&cookie), "Writing cookie");
        self.jar.insert(cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryJar;
    use chrono::Utc;
    use expapp_shared::types::UserId;
    use rstest::rstest;

    fn store() -> CookieStore<MemoryJar> {
        CookieStore::new(MemoryJar::new())
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut store = store();
        let session = SessionRecord::open(UserId::from_u128(1), Utc::now());
        store.set(Collection::Session, &session).unwrap();
        assert_eq!(store.session(), Some(session));
    }

    #[test]
    fn test_never_written_reads_absent() {
        let store = store();
        assert_eq!(store.lookup::<Vec<User>>(Collection::Users), Lookup::Absent);
        assert!(store.users().is_empty());
        assert!(store.company().is_none());
        assert_eq!(store.preferences(), Preferences::default());
    }

    #[test]
    fn test_corrupt_cookie_reads_absent_but_lookup_reports_it() {
        let mut store = store();
        store
            .jar_mut()
            .insert(Cookie::new("expapp_company", "{not json"))
            .unwrap();

        assert!(store.company().is_none());
        assert!(store.lookup::<Company>(Collection::Company).is_corrupt());
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let mut store = store();
        store.set(Collection::Users, &serde_json::json!({"a": 1})).unwrap();
        assert!(store.lookup::<Vec<User>>(Collection::Users).is_corrupt());
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_written_cookie_carries_path_and_expiry() {
        let mut store = store();
        store.set(Collection::Rules, &Vec::<ApprovalRule>::new()).unwrap();

        let cookie = store.jar().get("expapp_rules").unwrap();
        assert_eq!(cookie.path(), Some("/"));
        let expires = cookie.expires_datetime().unwrap();
        let days = (expires - OffsetDateTime::now_utc()).whole_days();
        assert!((29..=30).contains(&days));
    }

    #[test]
    fn test_clear_one_leaves_other_collections() {
        let mut store = store();
        store.set_preferences(&Preferences::default()).unwrap();
        store.set(Collection::Users, &Vec::<User>::new()).unwrap();

        store.clear_one(Collection::Users).unwrap();
        assert!(store.get::<Vec<User>>(Collection::Users).is_none());
        assert!(store.get::<Preferences>(Collection::Preferences).is_some());
        // Clearing an absent collection is fine.
        store.clear_one(Collection::Users).unwrap();
    }

    #[test]
    fn test_custom_prefix() {
        let options = CookieOptions {
            prefix: "other_".into(),
            ..CookieOptions::default()
        };
        let mut store = CookieStore::with_options(MemoryJar::new(), options);
        store.set_preferences(&Preferences::default()).unwrap();
        assert_eq!(store.cookie_names(), vec!["other_prefs".to_string()]);
    }

    #[test]
    fn test_list_dynamic_keys_ignores_bare_family_prefix() {
        let mut store = store();
        store
            .jar_mut()
            .insert(Cookie::new("expapp_rates_", "{}"))
            .unwrap();
        store
            .jar_mut()
            .insert(Cookie::new("expapp_rates_JPY", "{}"))
            .unwrap();
        assert_eq!(store.list_dynamic_keys("rates_"), vec!["JPY".to_string()]);
    }

    fn store_expiring_in(expiry_days: i64) -> CookieStore<MemoryJar> {
        let options = CookieOptions {
            expiry_days,
            ..CookieOptions::default()
        };
        CookieStore::with_options(MemoryJar::new(), options)
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(MAX_EXPIRY_DAYS + 1)]
    #[case(i64::MAX / 2)]
    fn test_out_of_range_expiry_is_rejected(#[case] days: i64) {
        let mut store = store_expiring_in(days);
        let err = store.set(Collection::Rules, &vec![1u8]).unwrap_err();

        assert!(matches!(err, StoreError::InvalidExpiry { days: d, .. } if d == days));
        assert!(store.cookie_names().is_empty());
    }

    #[rstest]
    #[case(1)]
    #[case(MAX_EXPIRY_DAYS)]
    fn test_expiry_bounds_round_trip(#[case] days: i64) {
        let mut store = store_expiring_in(days);
        store.set(Collection::Rules, &vec![1u8]).unwrap();
        assert_eq!(store.get::<Vec<u8>>(Collection::Rules), Some(vec![1u8]));
    }
}
