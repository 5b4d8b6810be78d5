//! Core logic for the expense app demo.
//!
//! Everything the app persists lives in namespaced cookies; this crate owns
//! that store and the pieces built directly on it. It has no web framework
//! or database dependencies.
//!
//! # Modules
//!
//! - `store` - Cookie-backed collections, jars and their limits
//! - `models` - Records kept in the collections
//! - `auth` - Session state, login and the route guard
//! - `seed` - Demo dataset install and removal
//! - `inspector` - Developer view over the whole store
//! - `currency` - Exchange-rate caches and conversion
//! - `notice` - The demo notice shown on load

pub mod auth;
pub mod currency;
pub mod inspector;
pub mod models;
pub mod notice;
pub mod seed;
pub mod store;
