//! Category classification: ordered keyword tables over merchant + raw text.
//!
//! Keyword sets are not disjoint; evaluation order is the tie-break.

use moneymap_core::Category;

/// Rule table in priority order. First table whose keyword appears in the
/// search string wins.
pub const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["스타벅스", "커피", "카페"], Category::CafeSnack),
    (&["편의점", "마트", "식품"], Category::Grocery),
    (&["택시", "버스", "지하철"], Category::Transport),
    (&["배달", "배달의민족", "요기요"], Category::Delivery),
];

/// Classify spending from the extracted merchant plus the raw message text.
pub fn classify_category(merchant: &str, text: &str) -> Category {
    let haystack = format!("{merchant} {text}");
    for (keywords, category) in CATEGORY_RULES {
        if keywords.iter().any(|k| haystack.contains(k)) {
            return *category;
        }
    }
    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cafe_from_merchant() {
        assert_eq!(
            classify_category("스타벅스", "아메리카노 4,500원 결제"),
            Category::CafeSnack
        );
    }

    #[test]
    fn test_each_table() {
        assert_eq!(classify_category("Unknown", "GS25 편의점 결제"), Category::Grocery);
        assert_eq!(classify_category("Unknown", "심야 택시 요금"), Category::Transport);
        assert_eq!(classify_category("요기요", "치킨 주문"), Category::Delivery);
    }

    #[test]
    fn test_priority_tie_break() {
        // coffee + transport keywords both present → first table wins
        assert_eq!(
            classify_category("Unknown", "버스 타고 가서 커피 마심"),
            Category::CafeSnack
        );
        // grocery + delivery → grocery (earlier table)
        assert_eq!(
            classify_category("Unknown", "마트 배달 주문"),
            Category::Grocery
        );
    }

    #[test]
    fn test_other_fallthrough() {
        assert_eq!(classify_category("Unknown", "영화관 결제"), Category::Other);
        assert_eq!(classify_category("Unknown", ""), Category::Other);
    }
}
