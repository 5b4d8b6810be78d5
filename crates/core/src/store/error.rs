//! Cookie store error types.

use expapp_shared::AppError;
use thiserror::Error;

/// Errors surfaced by a cookie write or by jar persistence.
///
/// Reads never produce these: a missing or unreadable cookie is reported as
/// absence (see [`super::Lookup`]).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The encoded `name=value` pair exceeds the per-cookie limit.
    #[error("cookie '{name}' is {size} bytes, limit is {max} bytes")]
    CookieTooLarge {
        /// Cookie name.
        name: String,
        /// Encoded size.
        size: usize,
        /// Limit.
        max: usize,
    },

    /// The jar already holds the maximum number of cookies.
    #[error("cookie jar is full ({max} cookies)")]
    JarFull {
        /// Limit.
        max: usize,
    },

    /// The value could not be encoded as JSON.
    #[error("failed to serialize '{name}': {reason}")]
    Serialize {
        /// Cookie name.
        name: String,
        /// Encoder message.
        reason: String,
    },

    /// The configured cookie lifetime is outside what a browser accepts.
    #[error("cookie expiry of {days} days is outside 1..={max}")]
    InvalidExpiry {
        /// Configured lifetime.
        days: i64,
        /// Upper bound.
        max: i64,
    },

    /// The jar file could not be read or written.
    #[error("cookie jar I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a cookie too large error.
    #[must_use]
    pub fn too_large(name: impl Into<String>, size: usize, max: usize) -> Self {
        Self::CookieTooLarge {
            name: name.into(),
            size,
            max,
        }
    }

    /// Returns true if the failure is a browser-style storage limit.
    #[must_use]
    pub const fn is_exhaustion(&self) -> bool {
        matches!(self, Self::CookieTooLarge { .. } | Self::JarFull { .. })
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialize { .. } => Self::Serialization(err.to_string()),
            StoreError::InvalidExpiry { .. } => Self::Configuration(err.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}
