//! Geofeed field primitives: IP prefixes, the allowed supernet and country codes.

mod country;
mod prefix;

pub use country::is_valid_country_code;
pub use prefix::{DEFAULT_SUPERNET, PrefixError, Supernet, parse_prefix};
