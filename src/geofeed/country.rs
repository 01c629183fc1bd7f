use once_cell::sync::Lazy;
use regex::Regex;

/// ISO 3166-1 alpha-2 shape. Membership in the ISO list is not checked.
static COUNTRY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("country code pattern is valid"));

/// Returns true when `code` is exactly two uppercase ASCII letters.
///
/// The caller is expected to trim surrounding whitespace first.
pub fn is_valid_country_code(code: &str) -> bool {
    COUNTRY_CODE.is_match(code)
}
