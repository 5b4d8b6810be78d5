//! Developer view over the cookie store.
//!
//! The inspector reads every collection as untyped JSON so it can show data
//! even when it no longer matches the current record shapes. A snapshot is a
//! copy: it goes stale as soon as anything writes to the store, and only an
//! inspector action or [`Inspector::refresh`] re-reads it.

use std::fmt;

use serde_json::Value;
use tracing::info;

use crate::seed::{DemoSeeder, SeedError, SeedReport};
use crate::store::{Collection, CookieJar, CookieStore, Lookup, RATES_SUB_PREFIX, StoreError};

/// Prompt shown before wiping the namespace.
pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to clear all cookie data?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns true if the user agreed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Short description of a panel's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSummary {
    /// A list with this many entries.
    Items(usize),
    /// A single record.
    One,
    /// No cookie.
    Empty,
    /// A cookie that is not JSON.
    Corrupt,
}

impl fmt::Display for PanelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items(n) => write!(f, "{n} items"),
            Self::One => f.write_str("1 item"),
            Self::Empty => f.write_str("Empty"),
            Self::Corrupt => f.write_str("Unreadable"),
        }
    }
}

/// One collection as the inspector shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Collection shown.
    pub collection: Collection,
    /// Pretty-printed JSON, or the raw value when it does not parse.
    pub body: String,
    /// Item count.
    pub summary: PanelSummary,
}

impl Panel {
    fn read<J: CookieJar>(store: &CookieStore<J>, collection: Collection) -> Self {
        let (body, summary) = match store.lookup::<Value>(collection) {
            Lookup::Present(value) => {
                let summary = match &value {
                    Value::Array(items) => PanelSummary::Items(items.len()),
                    Value::Null => PanelSummary::Empty,
                    _ => PanelSummary::One,
                };
                let body = serde_json::to_string_pretty(&value).unwrap_or_default();
                (body, summary)
            }
            Lookup::Absent => ("null".to_string(), PanelSummary::Empty),
            Lookup::Corrupt { .. } => (
                store.get_raw(&store.key(collection)).unwrap_or_default(),
                PanelSummary::Corrupt,
            ),
        };
        Self {
            collection,
            body,
            summary,
        }
    }
}

/// Everything the inspector displays, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorSnapshot {
    /// One panel per collection, in [`Collection::ALL`] order.
    pub panels: Vec<Panel>,
    /// Currency suffixes of every cached rate table, sorted.
    pub rate_currencies: Vec<String>,
    /// Namespace prefix the snapshot was taken under.
    pub prefix: String,
    /// Cookie lifetime in days.
    pub expiry_days: i64,
}

impl InspectorSnapshot {
    /// Reads the whole store.
    pub fn capture<J: CookieJar>(store: &CookieStore<J>) -> Self {
        let panels = Collection::ALL
            .iter()
            .map(|&c| Panel::read(store, c))
            .collect();
        let mut rate_currencies = store.list_dynamic_keys(RATES_SUB_PREFIX);
        rate_currencies.sort();

        Self {
            panels,
            rate_currencies,
            prefix: store.prefix().to_string(),
            expiry_days: store.options().expiry_days,
        }
    }

    /// Panel for `collection`.
    #[must_use]
    pub fn panel(&self, collection: Collection) -> Option<&Panel> {
        self.panels.iter().find(|p| p.collection == collection)
    }
}

impl fmt::Display for InspectorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cookie Inspector")?;
        for panel in &self.panels {
            writeln!(f)?;
            writeln!(f, "== {} ({})", panel.collection.label(), panel.summary)?;
            writeln!(f, "{}", panel.body)?;
        }

        if !self.rate_currencies.is_empty() {
            writeln!(f)?;
            writeln!(f, "== Exchange Rate Caches")?;
            for code in &self.rate_currencies {
                writeln!(f, "  {code:<6} cached")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Developer notes")?;
        writeln!(
            f,
            "  - All data is stored in cookies with {}-day expiry",
            self.expiry_days
        )?;
        writeln!(f, "  - Cookie names are prefixed with `{}`", self.prefix)?;
        writeln!(f, "  - Exchange rates are cached per base currency")?;
        writeln!(f, "  - Passwords are stored as Argon2id hashes")?;
        write!(
            f,
            "  - Production: replace with server-side storage and HttpOnly cookies"
        )
    }
}

/// The inspector: a store handle plus the last snapshot read from it.
#[derive(Debug)]
pub struct Inspector<'s, J> {
    store: &'s mut CookieStore<J>,
    seeder: DemoSeeder,
    snapshot: InspectorSnapshot,
}

impl<'s, J: CookieJar> Inspector<'s, J> {
    /// Opens the inspector and takes a first snapshot.
    pub fn new(store: &'s mut CookieStore<J>) -> Self {
        let snapshot = InspectorSnapshot::capture(store);
        Self {
            store,
            seeder: DemoSeeder::new(),
            snapshot,
        }
    }

    /// Last snapshot taken. May be stale.
    #[must_use]
    pub const fn snapshot(&self) -> &InspectorSnapshot {
        &self.snapshot
    }

    /// Re-reads the store.
    pub fn refresh(&mut self) -> &InspectorSnapshot {
        self.snapshot = InspectorSnapshot::capture(&*self.store);
        &self.snapshot
    }

    /// Seeds the demo data, then refreshes.
    pub fn seed(&mut self) -> Result<SeedReport, SeedError> {
        let report = self.seeder.seed(&mut *self.store)?;
        self.refresh();
        Ok(report)
    }

    /// Removes the demo collections, then refreshes.
    pub fn clear_demo(&mut self) -> Result<(), StoreError> {
        self.seeder.clear(&mut *self.store)?;
        self.refresh();
        Ok(())
    }

    /// Removes every cookie in the namespace after asking `confirm`.
    ///
    /// Returns `None` if the user declined; nothing is touched in that case.
    pub fn clear_all(&mut self, confirm: &mut impl Confirm) -> Result<Option<usize>, StoreError> {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            info!("Clear all cancelled");
            return Ok(None);
        }
        let removed = self.store.clear_all()?;
        self.refresh();
        Ok(Some(removed))
    }
}
