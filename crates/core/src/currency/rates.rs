//! Cached exchange-rate tables.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use expapp_shared::types::{CurrencyCode, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::conversion::convert_money;
use crate::store::{CookieJar, CookieStore};

/// Hours a cached table stays fresh unless configured otherwise.
pub const DEFAULT_RATES_TTL_HOURS: i64 = 12;

/// Exchange rates from one base currency, as fetched at `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCacheEntry {
    /// Currency the rates are quoted from.
    pub base: CurrencyCode,
    /// 1 `base` = `rate` units of each key.
    pub rates: BTreeMap<CurrencyCode, Decimal>,
    /// When the table was fetched.
    pub timestamp: DateTime<Utc>,
}

impl RateCacheEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(
        base: CurrencyCode,
        rates: BTreeMap<CurrencyCode, Decimal>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            base,
            rates,
            timestamp,
        }
    }

    /// Returns true if the table is younger than `ttl` at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.timestamp) < ttl
    }

    /// Rate from the base currency to `target`. The base itself is always 1.
    #[must_use]
    pub fn rate_to(&self, target: CurrencyCode) -> Option<Decimal> {
        if target == self.base {
            return Some(Decimal::ONE);
        }
        self.rates.get(&target).copied()
    }

    /// Converts `money` into `target`. `money` must be in the base currency.
    #[must_use]
    pub fn convert(&self, money: Money, target: CurrencyCode) -> Option<Money> {
        if money.currency != self.base {
            return None;
        }
        self.rate_to(target)
            .map(|rate| convert_money(money, rate, target))
    }
}

/// Returns the cached table for `base` only if it is still fresh.
pub fn fresh_rates<J: CookieJar>(
    store: &CookieStore<J>,
    base: CurrencyCode,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Option<RateCacheEntry> {
    store
        .rates(base)
        .filter(|entry| entry.is_fresh(now, ttl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryJar;
    use rust_decimal_macros::dec;

    fn entry(at: DateTime<Utc>) -> RateCacheEntry {
        let rates = BTreeMap::from([
            (CurrencyCode::EUR, dec!(0.92)),
            (CurrencyCode::INR, dec!(83.12)),
        ]);
        RateCacheEntry::new(CurrencyCode::USD, rates, at)
    }

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let ttl = Duration::hours(DEFAULT_RATES_TTL_HOURS);
        assert!(entry(now - Duration::hours(11)).is_fresh(now, ttl));
        assert!(!entry(now - Duration::hours(12)).is_fresh(now, ttl));
        assert!(!entry(now - Duration::days(2)).is_fresh(now, ttl));
    }

    #[test]
    fn test_rate_to_and_convert() {
        let e = entry(Utc::now());
        assert_eq!(e.rate_to(CurrencyCode::USD), Some(Decimal::ONE));
        assert_eq!(e.rate_to(CurrencyCode::GBP), None);
        assert_eq!(
            e.convert(Money::new(dec!(10), CurrencyCode::USD), CurrencyCode::EUR),
            Some(Money::new(dec!(9.20), CurrencyCode::EUR))
        );
        // Only conversions out of the base currency are supported.
        assert_eq!(
            e.convert(Money::new(dec!(10), CurrencyCode::EUR), CurrencyCode::USD),
            None
        );
    }

    #[test]
    fn test_store_keeps_stale_entries_but_fresh_rates_filters_them() {
        let now = Utc::now();
        let ttl = Duration::hours(DEFAULT_RATES_TTL_HOURS);
        let mut store = CookieStore::new(MemoryJar::new());
        store.set_rates(&entry(now - Duration::hours(13))).unwrap();

        assert!(store.rates(CurrencyCode::USD).is_some());
        assert!(fresh_rates(&store, CurrencyCode::USD, ttl, now).is_none());

        store.set_rates(&entry(now)).unwrap();
        assert_eq!(
            fresh_rates(&store, CurrencyCode::USD, ttl, now),
            Some(entry(now))
        );
    }

    #[test]
    fn test_cached_currencies_listing() {
        let mut store = CookieStore::new(MemoryJar::new());
        store.set_rates(&entry(Utc::now())).unwrap();
        let mut eur = entry(Utc::now());
        eur.base = CurrencyCode::EUR;
        store.set_rates(&eur).unwrap();

        let mut cached = store.cached_rate_currencies();
        cached.sort();
        assert_eq!(cached, vec![CurrencyCode::EUR, CurrencyCode::USD]);

        store.clear_rates(CurrencyCode::EUR).unwrap();
        assert_eq!(store.cached_rate_currencies(), vec![CurrencyCode::USD]);
    }
}
