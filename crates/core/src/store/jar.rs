//! The cookie jar seam and its in-memory implementation.

use std::collections::BTreeMap;

use cookie::Cookie;
use cookie::time::OffsetDateTime;
use expapp_shared::config::StoreConfig;

use super::error::StoreError;

/// A browser-like cookie jar.
///
/// Implementations hide expired cookies and enforce their own size limits;
/// the store on top only deals in names and values.
pub trait CookieJar {
    /// Returns the live cookie called `name`.
    fn get(&self, name: &str) -> Option<&Cookie<'static>>;

    /// Inserts or replaces a cookie.
    fn insert(&mut self, cookie: Cookie<'static>) -> Result<(), StoreError>;

    /// Removes a cookie. Returns whether it existed.
    fn remove(&mut self, name: &str) -> Result<bool, StoreError>;

    /// Names of every live cookie, including ones the store does not manage.
    fn names(&self) -> Vec<String>;
}

/// Browser storage limits a jar enforces on writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JarLimits {
    /// Maximum size of an encoded `name=value` pair.
    pub max_cookie_bytes: usize,
    /// Maximum number of cookies.
    pub max_cookies: usize,
}

impl Default for JarLimits {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for JarLimits {
    fn from(config: &StoreConfig) -> Self {
        Self {
            max_cookie_bytes: config.max_cookie_bytes,
            max_cookies: config.max_cookies,
        }
    }
}

/// Returns the size a browser charges for the cookie: the percent-encoded `name=value`.
#[must_use]
pub fn encoded_size(cookie: &Cookie<'_>) -> usize {
    cookie.encoded().stripped().to_string().len()
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    cookie.expires_datetime().is_some_and(|at| at <= now)
}

/// In-memory cookie jar.
#[derive(Debug, Clone, Default)]
pub struct MemoryJar {
    cookies: BTreeMap<String, Cookie<'static>>,
    limits: JarLimits,
}

impl MemoryJar {
    /// Creates an empty jar with default browser limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty jar with the given limits.
    #[must_use]
    pub fn with_limits(limits: JarLimits) -> Self {
        Self {
            cookies: BTreeMap::new(),
            limits,
        }
    }

    /// Returns the limits this jar enforces.
    #[must_use]
    pub const fn limits(&self) -> JarLimits {
        self.limits
    }

    /// Iterates over live cookies in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Cookie<'static>> {
        let now = OffsetDateTime::now_utc();
        self.cookies.values().filter(move |c| !is_expired(c, now))
    }

    /// Number of live cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no live cookie is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune_expired(&mut self) {
        let now = OffsetDateTime::now_utc();
        self.cookies.retain(|_, c| !is_expired(c, now));
    }
}

impl CookieJar for MemoryJar {
    fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.cookies
            .get(name)
            .filter(|c| !is_expired(c, OffsetDateTime::now_utc()))
    }

    fn insert(&mut self, cookie: Cookie<'static>) -> Result<(), StoreError> {
        let size = encoded_size(&cookie);
        if size > self.limits.max_cookie_bytes {
            return Err(StoreError::too_large(
                cookie.name(),
                size,
                self.limits.max_cookie_bytes,
            ));
        }

        self.prune_expired();
        if !self.cookies.contains_key(cookie.name()) && self.cookies.len() >= self.limits.max_cookies
        {
            return Err(StoreError::JarFull {
                max: self.limits.max_cookies,
            });
        }

        self.cookies.insert(cookie.name().to_string(), cookie);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        Ok(self.cookies.remove(name).is_some())
    }

    fn names(&self) -> Vec<String> {
        self.iter().map(|c| c.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie::time::Duration;

    #[test]
    fn test_insert_get_remove() {
        let mut jar = MemoryJar::new();
        jar.insert(Cookie::new("foo", "bar")).unwrap();
        assert_eq!(jar.get("foo").map(Cookie::value), Some("bar"));
        assert!(jar.remove("foo").unwrap());
        assert!(!jar.remove("foo").unwrap());
        assert!(jar.get("foo").is_none());
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut jar = MemoryJar::new();
        jar.insert(Cookie::new("a", "1")).unwrap();
        jar.insert(Cookie::new("a", "2")).unwrap();
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.get("a").map(Cookie::value), Some("2"));
    }

    #[test]
    fn test_expired_cookies_are_invisible() {
        let mut jar = MemoryJar::new();
        let past = OffsetDateTime::now_utc() - Duration::days(1);
        let future = OffsetDateTime::now_utc() + Duration::days(1);
        jar.insert(Cookie::build(("old", "x")).expires(past).build())
            .unwrap();
        jar.insert(Cookie::build(("new", "y")).expires(future).build())
            .unwrap();

        assert!(jar.get("old").is_none());
        assert_eq!(jar.names(), vec!["new".to_string()]);
    }

    #[test]
    fn test_size_limit_counts_encoded_bytes() {
        let mut jar = MemoryJar::with_limits(JarLimits {
            max_cookie_bytes: 16,
            max_cookies: 10,
        });
        // "k=" + 14 plain bytes fits exactly.
        jar.insert(Cookie::new("k", "abcdefghijklmn")).unwrap();
        // Quotes are percent-encoded to three bytes each.
        let err = jar
            .insert(Cookie::new("k", "\"\"\"\"\"\""))
            .unwrap_err();
        assert!(matches!(err, StoreError::CookieTooLarge { size: 20, .. }));
        assert_eq!(jar.get("k").map(Cookie::value), Some("abcdefghijklmn"));
    }

    #[test]
    fn test_count_limit_allows_overwrite() {
        let mut jar = MemoryJar::with_limits(JarLimits {
            max_cookie_bytes: 4096,
            max_cookies: 2,
        });
        jar.insert(Cookie::new("a", "1")).unwrap();
        jar.insert(Cookie::new("b", "1")).unwrap();
        assert!(matches!(
            jar.insert(Cookie::new("c", "1")),
            Err(StoreError::JarFull { max: 2 })
        ));
        jar.insert(Cookie::new("b", "2")).unwrap();
    }
}
