//! Cookie-backed persistence for every collection the app reads and writes.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ CookieStore<J>   typed get / set / clear over named collections│
//! │   key = <prefix><collection>    rates: <prefix>rates_<CODE>    │
//! ├───────────────────────────────────────────────────────────────┤
//! │ CookieJar        MemoryJar (browser limits) | FileJar (disk)   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never fail: a missing cookie and a malformed one both read as
//! absent. [`CookieStore::lookup`] keeps the difference observable.

mod collection;
mod error;
mod file_jar;
mod jar;
mod service;

#[cfg(test)]
mod store_props;

pub use collection::{Collection, RATES_SUB_PREFIX, rate_key};
pub use error::StoreError;
pub use file_jar::FileJar;
pub use jar::{CookieJar, JarLimits, MemoryJar, encoded_size};
pub use service::{CookieOptions, CookieStore, Lookup};
