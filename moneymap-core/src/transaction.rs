//! Transaction records produced by extraction and persisted by a store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::{month_of, Clock};

/// Payment provider detected in a payment notification message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    KakaoPay,
    NaverPay,
    SamsungPay,
    TossPay,
    Card,
    Unknown,
}

impl PaymentMethod {
    /// Wire/storage label (matches the serde representation)
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::KakaoPay => "KakaoPay",
            PaymentMethod::NaverPay => "NaverPay",
            PaymentMethod::SamsungPay => "SamsungPay",
            PaymentMethod::TossPay => "TossPay",
            PaymentMethod::Card => "Card",
            PaymentMethod::Unknown => "Unknown",
        }
    }

    /// Map a free-form label (e.g. from an AI reply) back to a variant.
    /// Anything unrecognized is `Unknown`.
    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "KakaoPay" => PaymentMethod::KakaoPay,
            "NaverPay" => PaymentMethod::NaverPay,
            "SamsungPay" => PaymentMethod::SamsungPay,
            "TossPay" => PaymentMethod::TossPay,
            "Card" => PaymentMethod::Card,
            _ => PaymentMethod::Unknown,
        }
    }
}

/// Spending category, serialized as the Korean labels used in the app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "카페/간식")]
    CafeSnack,
    #[serde(rename = "식비/장보기")]
    Grocery,
    #[serde(rename = "교통")]
    Transport,
    #[serde(rename = "배달/외식")]
    Delivery,
    #[serde(rename = "기타")]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::CafeSnack => "카페/간식",
            Category::Grocery => "식비/장보기",
            Category::Transport => "교통",
            Category::Delivery => "배달/외식",
            Category::Other => "기타",
        }
    }

    /// Map a free-form label back to a variant; unrecognized → `Other`.
    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "카페/간식" => Category::CafeSnack,
            "식비/장보기" => Category::Grocery,
            "교통" => Category::Transport,
            "배달/외식" => Category::Delivery,
            _ => Category::Other,
        }
    }
}

/// Result of parsing one payment message, not yet persisted.
///
/// Every field except `amount` is always populated; extraction misses are
/// represented by sentinels (`Unknown`, `Other`) rather than absence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    /// Month the spend belongs to, "YYYY-MM"
    pub month: String,
    /// When the payment happened (or when extraction ran, if unknown)
    #[serde(rename = "datetime")]
    pub occurred_at: NaiveDateTime,
    /// Whole KRW; `None` when no amount pattern matched
    pub amount: Option<i64>,
    pub merchant: String,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    pub category: Category,
    /// Original input, preserved verbatim for audit
    #[serde(rename = "rawText")]
    pub raw_text: String,
}

impl ParsedTransaction {
    /// An all-sentinel record for `raw_text`, timestamped from `clock`.
    /// Extraction starts from this and overrides what it can determine.
    pub fn defaults(raw_text: &str, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            month: month_of(now),
            occurred_at: now,
            amount: None,
            merchant: "Unknown".to_string(),
            payment_method: PaymentMethod::Unknown,
            category: Category::Other,
            raw_text: raw_text.to_string(),
        }
    }
}

/// A transaction that has been assigned an id by a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedTransaction {
    pub id: u64,
    #[serde(flatten)]
    pub record: ParsedTransaction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 11, 13)
                .unwrap()
                .and_hms_opt(14, 23, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_defaults_are_sentinels() {
        let rec = ParsedTransaction::defaults("hello", &clock());
        assert_eq!(rec.month, "2025-11");
        assert_eq!(rec.amount, None);
        assert_eq!(rec.merchant, "Unknown");
        assert_eq!(rec.payment_method, PaymentMethod::Unknown);
        assert_eq!(rec.category, Category::Other);
        assert_eq!(rec.raw_text, "hello");
    }

    #[test]
    fn test_category_labels_round_trip() {
        for cat in [
            Category::CafeSnack,
            Category::Grocery,
            Category::Transport,
            Category::Delivery,
            Category::Other,
        ] {
            assert_eq!(Category::from_label(cat.label()), cat);
        }
        assert_eq!(Category::from_label("짱구네 분식"), Category::Other);
    }

    #[test]
    fn test_payment_method_from_label() {
        assert_eq!(PaymentMethod::from_label("KakaoPay"), PaymentMethod::KakaoPay);
        assert_eq!(PaymentMethod::from_label("kakaopay"), PaymentMethod::Unknown);
        assert_eq!(PaymentMethod::from_label(""), PaymentMethod::Unknown);
    }

    #[test]
    fn test_serde_wire_shape() {
        let rec = ParsedTransaction {
            category: Category::CafeSnack,
            payment_method: PaymentMethod::KakaoPay,
            amount: Some(4500),
            ..ParsedTransaction::defaults("msg", &clock())
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["category"], "카페/간식");
        assert_eq!(json["paymentMethod"], "KakaoPay");
        assert_eq!(json["rawText"], "msg");
        assert!(json["datetime"].is_string());
    }

    #[test]
    fn test_persisted_flattens_record() {
        let p = PersistedTransaction {
            id: 7,
            record: ParsedTransaction::defaults("x", &clock()),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["month"], "2025-11");
    }
}
