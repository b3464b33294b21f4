//! Payment-method classification: ordered keyword table, first match wins.

use moneymap_core::PaymentMethod;

/// Provider keywords in priority order. Case-sensitive substring match on the
/// literal provider names as they appear in Korean payment messages; "토스"
/// also covers "토스페이", "카드" covers issuer names like "신한카드".
pub const PAYMENT_RULES: &[(&str, PaymentMethod)] = &[
    ("카카오페이", PaymentMethod::KakaoPay),
    ("네이버페이", PaymentMethod::NaverPay),
    ("삼성페이", PaymentMethod::SamsungPay),
    ("토스", PaymentMethod::TossPay),
    ("카드", PaymentMethod::Card),
];

/// Classify the payment method mentioned in `text`, `Unknown` when no
/// keyword appears.
pub fn classify_payment(text: &str) -> PaymentMethod {
    for (keyword, method) in PAYMENT_RULES {
        if text.contains(keyword) {
            return *method;
        }
    }
    PaymentMethod::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_provider() {
        assert_eq!(classify_payment("[카카오페이] 결제"), PaymentMethod::KakaoPay);
        assert_eq!(classify_payment("네이버페이 승인"), PaymentMethod::NaverPay);
        assert_eq!(classify_payment("삼성페이 결제 완료"), PaymentMethod::SamsungPay);
        assert_eq!(classify_payment("토스페이 3,000원"), PaymentMethod::TossPay);
        assert_eq!(classify_payment("신한카드 승인"), PaymentMethod::Card);
    }

    #[test]
    fn test_priority_order_decides() {
        // both provider and generic card keyword present → provider wins
        assert_eq!(
            classify_payment("카카오페이 카드 결제"),
            PaymentMethod::KakaoPay
        );
    }

    #[test]
    fn test_unknown_when_no_keyword() {
        assert_eq!(classify_payment("스타벅스 4,500원"), PaymentMethod::Unknown);
        assert_eq!(classify_payment(""), PaymentMethod::Unknown);
    }

    #[test]
    fn test_case_sensitive_no_fuzzing() {
        // English spellings are not matched; the table is literal
        assert_eq!(classify_payment("KakaoPay payment"), PaymentMethod::Unknown);
    }
}
