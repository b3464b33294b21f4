//! Amount extraction: first "digits + 원" pattern in the text.

use std::sync::OnceLock;

use regex::Regex;

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "4,500원", "12000원", "4,500 원" — comma groups are 3 digits
    RE.get_or_init(|| Regex::new(r"(\d{1,3}(?:,\d{3})*|\d+)\s*원").expect("amount pattern"))
}

/// Extract the first amount in `text`, grouping commas stripped.
///
/// A miss (no pattern, or digits that don't fit i64) is `None`, never an
/// error — callers treat it as "no amount on this message".
pub fn extract_amount(text: &str) -> Option<i64> {
    let caps = amount_re().captures(text)?;
    caps[1].replace(',', "").parse::<i64>().ok()
}
