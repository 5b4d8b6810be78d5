//! Exchange-rate caching and currency conversion.
//!
//! Rate tables are cached one cookie per base currency
//! (`<prefix>rates_<CODE>`). The cookie layer only stores them; freshness is
//! checked here, by the consumer.

pub mod conversion;
pub mod rates;

pub use conversion::{convert_amount, convert_money};
pub use rates::{DEFAULT_RATES_TTL_HOURS, RateCacheEntry, fresh_rates};
