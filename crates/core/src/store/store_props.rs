//! Property-based tests for the cookie store laws.
//!
//! - Round trip: `set` then `get` returns an equal value
//! - Corruption reads as absence
//! - `clear_all` only touches the namespace

use std::collections::BTreeMap;

use cookie::Cookie;
use proptest::prelude::*;

use super::{Collection, CookieJar, CookieStore, Lookup, MemoryJar};
use crate::models::User;

/// Strategy for small JSON-friendly records.
fn record() -> impl Strategy<Value = BTreeMap<String, Vec<i64>>> {
    prop::collection::btree_map("\\PC{1,12}", prop::collection::vec(any::<i64>(), 0..4), 0..6)
}

fn collection() -> impl Strategy<Value = Collection> {
    prop::sample::select(Collection::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* collection and JSON-serializable value, `get` after `set`
    /// returns an equal value.
    #[test]
    fn prop_set_get_roundtrip(target in collection(), value in record()) {
        let mut store = CookieStore::new(MemoryJar::new());
        store.set(target, &value).unwrap();
        prop_assert_eq!(store.get::<BTreeMap<String, Vec<i64>>>(target), Some(value));
    }

    /// *For any* raw text that does not decode as a user list, reading the users
    /// collection is indistinguishable from never having written it.
    #[test]
    fn prop_corruption_is_absence(raw in "[ -~]{0,64}") {
        prop_assume!(serde_json::from_str::<Vec<User>>(&raw).is_err());

        let mut store = CookieStore::new(MemoryJar::new());
        let key = store.key(Collection::Users);
        store.jar_mut().insert(Cookie::new(key, raw)).unwrap();

        prop_assert!(store.get::<Vec<User>>(Collection::Users).is_none());
        prop_assert!(store.users().is_empty());
        prop_assert!(store.lookup::<Vec<User>>(Collection::Users).is_corrupt());
    }

    /// *For any* set of unrelated cookies, `clear_all` removes every namespaced
    /// cookie and nothing else.
    #[test]
    fn prop_clear_all_preserves_unrelated(
        unrelated in prop::collection::btree_map("[a-z]{1,8}", "[A-Za-z0-9]{0,16}", 0..8),
        currencies in prop::collection::btree_set("[A-Z]{3}", 0..5),
    ) {
        let mut store = CookieStore::new(MemoryJar::new());
        for (name, value) in &unrelated {
            store.jar_mut().insert(Cookie::new(name.clone(), value.clone())).unwrap();
        }
        for target in Collection::ALL {
            store.set(target, &Vec::<u8>::new()).unwrap();
        }
        for code in &currencies {
            let name = format!("{}rates_{code}", store.prefix());
            store.jar_mut().insert(Cookie::new(name, "{}")).unwrap();
        }

        let removed = store.clear_all().unwrap();
        prop_assert_eq!(removed, Collection::ALL.len() + currencies.len());

        for (name, value) in &unrelated {
            let raw = store.get_raw(name);
            prop_assert_eq!(raw.as_deref(), Some(value.as_str()));
        }
        for target in Collection::ALL {
            prop_assert_eq!(store.lookup::<Vec<u8>>(target), Lookup::Absent);
        }
        prop_assert!(store.list_dynamic_keys("rates_").is_empty());
    }
}
