//! Shared types, errors, and configuration for expapp.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision and ISO currency codes
//! - Typed IDs for type-safe record references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
