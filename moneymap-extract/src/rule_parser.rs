//! Rule-based parser: composes the extractors into one record.
//!
//! Total function — it never fails, which is what lets it double as the
//! fallback path when the AI parser can't deliver.

use moneymap_core::{Clock, ParsedTransaction};

use crate::amount::extract_amount;
use crate::category_rules::classify_category;
use crate::merchant::extract_merchant;
use crate::payment_rules::classify_payment;

/// Parse `raw_text` with regex/keyword heuristics alone.
pub fn parse_rule_based(raw_text: &str, clock: &dyn Clock) -> ParsedTransaction {
    let mut record = ParsedTransaction::defaults(raw_text, clock);
    record.amount = extract_amount(raw_text);
    record.merchant = extract_merchant(raw_text);
    record.payment_method = classify_payment(raw_text);
    record.category = classify_category(&record.merchant, raw_text);
    record
}
