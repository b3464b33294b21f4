//! Merchant extraction.
//!
//! In the observed message formats the merchant is a single token between the
//! payment-provider tag and the amount, e.g.
//! `[카카오페이] 11/13 14:23 스타벅스 아메리카노 4,500원 결제 완료`.
//! The heuristic is intentionally narrow: a false negative returns "Unknown",
//! a false positive would pollute the ledger.

use std::sync::OnceLock;

use regex::Regex;

use crate::payment_rules::PAYMENT_RULES;

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]]*\]").expect("bracket pattern"))
}

/// Extract a merchant-name candidate from `text`, "Unknown" when none found.
pub fn extract_merchant(text: &str) -> String {
    // drop bracketed annotations like "[카카오페이]"
    let cleaned = bracket_re().replace_all(text, " ");
    let mut cleaned = cleaned.trim();

    // merchant precedes the amount, so cut at the currency marker; a marker
    // at position 0 is a merchant name starting with 원, not an amount
    if let Some(idx) = cleaned.find('원') {
        if idx > 0 {
            cleaned = &cleaned[..idx];
        }
    }

    for token in cleaned.split_whitespace() {
        if token.contains("결제") || token.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if PAYMENT_RULES.iter().any(|(kw, _)| token.contains(kw)) {
            continue;
        }
        return token.to_string();
    }
    "Unknown".to_string()
}
