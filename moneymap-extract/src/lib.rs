//! moneymap-extract: turns free-form payment text (or OCR'd images) into
//! structured spending records, rule-based or AI-assisted with rule fallback.

pub mod ai_parser;
pub mod amount;
pub mod category_rules;
pub mod extract;
pub mod merchant;
pub mod ocr;
pub mod payment_rules;
pub mod rule_parser;

pub use ai_parser::{AiConfig, AiParser};
pub use amount::extract_amount;
pub use category_rules::classify_category;
pub use extract::{Extractor, ParseMode};
pub use merchant::extract_merchant;
pub use ocr::TextRecognizer;
pub use payment_rules::classify_payment;
pub use rule_parser::parse_rule_based;
