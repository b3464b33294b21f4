//! AI-assisted parser: one chat-completion call, then a three-tier landing.
//!
//! 1. clean JSON reply → field-by-field overrides of the clock defaults
//! 2. non-JSON reply → whole reply captured in `merchant`, rest defaulted
//! 3. call failed → rule-based fallback, merchant tagged with the failure kind
//!
//! From the caller's side `parse` is total: it always hands back a record.

use std::time::Duration;

use moneymap_core::{is_valid_month, Category, Clock, ParsedTransaction, PaymentMethod};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::rule_parser::parse_rule_based;

/// Merchant prefix when the endpoint rejected the call (401, 429, ...)
pub const API_FAILURE_TAG: &str = "GPT_FAILED";
/// Merchant prefix for any other failure (network, timeout, bad envelope)
pub const GENERIC_FAILURE_TAG: &str = "GPT_ERROR";

const SYSTEM_PROMPT: &str =
    "You are an expert receipt parsing assistant. Output ONLY valid JSON.";

fn user_prompt(raw_text: &str) -> String {
    format!(
        "Extract payment info from this text and return ONLY this JSON format:\n\
         {{\n  \"amount\": number,\n  \"merchant\": string,\n  \"paymentMethod\": string,\n  \
         \"category\": string,\n  \"month\": \"YYYY-MM\",\n  \"datetime\": \"YYYY-MM-DDTHH:mm:ss\"\n}}\n\
         TEXT: {raw_text}"
    )
}

/// Connection settings for the chat-completion endpoint. The key is injected
/// here, never read from process-wide state.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Whole-request timeout; expiry routes to the rule-based fallback
    pub timeout: Duration,
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

pub struct AiParser {
    config: AiConfig,
}

/// Why the remote call produced no usable reply text. Only the kind matters:
/// it picks the fallback tag, and the tagged record is the sole diagnostic
/// the contract surfaces.
enum CallError {
    /// The endpoint answered with a 4xx (rate limit, bad key, ...)
    Client,
    /// Anything else: network failure, timeout, malformed envelope
    Other,
}

impl AiParser {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Parse `raw_text` via the model, degrading per the module docs.
    /// One attempt, no retries — failure goes straight to the local parser.
    pub fn parse(&self, raw_text: &str, clock: &dyn Clock) -> ParsedTransaction {
        resolve(raw_text, self.complete(raw_text), clock)
    }

    fn complete(&self, raw_text: &str) -> Result<String, CallError> {
        // Callers may already be inside a tokio runtime (e.g. an async CLI
        // command); block_on from within one panics, so branch like llm.rs.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.complete_async(raw_text)))
        } else {
            let rt = tokio::runtime::Runtime::new().map_err(|_| CallError::Other)?;
            rt.block_on(self.complete_async(raw_text))
        }
    }

    async fn complete_async(&self, raw_text: &str) -> Result<String, CallError> {
        #[derive(Serialize)]
        struct Msg {
            role: &'static str,
            content: String,
        }

        #[derive(Serialize)]
        struct Req {
            model: String,
            messages: Vec<Msg>,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }

        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let body = Req {
            model: self.config.model.clone(),
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                Msg {
                    role: "user",
                    content: user_prompt(raw_text),
                },
            ],
            temperature: 0.0,
        };

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|_| CallError::Other)?;

        let resp = client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|_| CallError::Other)?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(CallError::Client);
        }
        if !status.is_success() {
            return Err(CallError::Other);
        }

        let out: Resp = resp.json().await.map_err(|_| CallError::Other)?;
        let content = out
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or(CallError::Other)?;
        Ok(content.trim().to_string())
    }
}

fn resolve(raw_text: &str, outcome: Result<String, CallError>, clock: &dyn Clock) -> ParsedTransaction {
    match outcome {
        Ok(content) => convert_reply(raw_text, &content, clock),
        Err(CallError::Client) => fall_back(raw_text, API_FAILURE_TAG, clock),
        Err(CallError::Other) => fall_back(raw_text, GENERIC_FAILURE_TAG, clock),
    }
}

fn fall_back(raw_text: &str, tag: &str, clock: &dyn Clock) -> ParsedTransaction {
    let mut record = parse_rule_based(raw_text, clock);
    record.merchant = format!("{tag} | {}", record.merchant);
    record
}

/// The six-field shape the model is instructed to return. All fields are
/// optional; whatever is missing keeps its default.
#[derive(Debug, Deserialize)]
struct AiReply {
    /// f64 so a model answering "4500.0" still lands in this tier
    amount: Option<f64>,
    merchant: Option<String>,
    #[serde(rename = "paymentMethod")]
    payment_method: Option<String>,
    category: Option<String>,
    month: Option<String>,
    datetime: Option<String>,
}

fn convert_reply(raw_text: &str, content: &str, clock: &dyn Clock) -> ParsedTransaction {
    let mut record = ParsedTransaction::defaults(raw_text, clock);

    let reply: AiReply = match serde_json::from_str(content) {
        Ok(r) => r,
        Err(_) => {
            // not JSON: keep the whole reply as a diagnostic artifact
            record.merchant = content.to_string();
            return record;
        }
    };

    record.amount = reply
        .amount
        .filter(|a| a.is_finite() && *a >= 0.0)
        .map(|a| a.trunc() as i64);
    if let Some(merchant) = reply.merchant {
        record.merchant = merchant;
    }
    if let Some(pm) = reply.payment_method {
        record.payment_method = PaymentMethod::from_label(&pm);
    }
    if let Some(cat) = reply.category {
        record.category = Category::from_label(&cat);
    }
    if let Some(month) = reply.month.filter(|m| is_valid_month(m)) {
        record.month = month;
    }
    if let Some(dt) = reply.datetime {
        // malformed timestamps never sink the whole parse
        if let Ok(parsed) = dt.parse::<chrono::NaiveDateTime>() {
            record.occurred_at = parsed;
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use moneymap_core::FixedClock;

    const TEXT: &str = "[카카오페이] 11/13 14:23 스타벅스 아메리카노 4,500원 결제 완료";

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 11, 13)
                .unwrap()
                .and_hms_opt(14, 23, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_clean_reply_overrides_defaults() {
        let content = r#"{
            "amount": 4500,
            "merchant": "스타벅스",
            "paymentMethod": "KakaoPay",
            "category": "카페/간식",
            "month": "2025-11",
            "datetime": "2025-11-13T14:23:00"
        }"#;
        let rec = resolve(TEXT, Ok(content.to_string()), &clock());
        assert_eq!(rec.amount, Some(4500));
        assert_eq!(rec.merchant, "스타벅스");
        assert_eq!(rec.payment_method, PaymentMethod::KakaoPay);
        assert_eq!(rec.category, Category::CafeSnack);
        assert_eq!(rec.month, "2025-11");
        assert_eq!(
            rec.occurred_at,
            "2025-11-13T14:23:00".parse::<NaiveDateTime>().unwrap()
        );
        assert_eq!(rec.raw_text, TEXT);
    }

    #[test]
    fn test_partial_reply_keeps_sentinels() {
        let rec = resolve(TEXT, Ok(r#"{"amount": 4500}"#.to_string()), &clock());
        assert_eq!(rec.amount, Some(4500));
        assert_eq!(rec.merchant, "Unknown");
        assert_eq!(rec.payment_method, PaymentMethod::Unknown);
        assert_eq!(rec.category, Category::Other);
        assert_eq!(rec.month, "2025-11");
        assert_eq!(rec.occurred_at, clock().0);
    }

    #[test]
    fn test_unrecognized_labels_become_sentinels() {
        let content = r#"{"paymentMethod": "ApplePay", "category": "여행"}"#;
        let rec = resolve(TEXT, Ok(content.to_string()), &clock());
        assert_eq!(rec.payment_method, PaymentMethod::Unknown);
        assert_eq!(rec.category, Category::Other);
    }

    #[test]
    fn test_malformed_datetime_and_month_use_clock() {
        let content = r#"{"datetime": "tomorrow-ish", "month": "November"}"#;
        let rec = resolve(TEXT, Ok(content.to_string()), &clock());
        assert_eq!(rec.occurred_at, clock().0);
        assert_eq!(rec.month, "2025-11");
    }

    #[test]
    fn test_negative_amount_is_dropped() {
        let rec = resolve(TEXT, Ok(r#"{"amount": -4500}"#.to_string()), &clock());
        assert_eq!(rec.amount, None);
    }

    #[test]
    fn test_fractional_amount_stays_in_reply_tier() {
        // a float amount must not demote the reply to the non-JSON tier
        let content = r#"{"amount": 4500.0, "merchant": "스타벅스"}"#;
        let rec = resolve(TEXT, Ok(content.to_string()), &clock());
        assert_eq!(rec.amount, Some(4500));
        assert_eq!(rec.merchant, "스타벅스");

        let rec = resolve(TEXT, Ok(r#"{"amount": 4500.75}"#.to_string()), &clock());
        assert_eq!(rec.amount, Some(4500));
    }

    #[test]
    fn test_non_json_reply_lands_in_merchant() {
        let reply = "Sure! The merchant looks like Starbucks and the amount is 4500 won.";
        let rec = resolve(TEXT, Ok(reply.to_string()), &clock());
        assert_eq!(rec.merchant, reply);
        assert_eq!(rec.amount, None);
        assert_eq!(rec.month, "2025-11");
        assert_eq!(rec.raw_text, TEXT);
    }

    #[test]
    fn test_client_error_falls_back_tagged() {
        let rec = resolve(TEXT, Err(CallError::Client), &clock());
        assert_eq!(rec.merchant, "GPT_FAILED | 스타벅스");
        // rule-based fields still extracted
        assert_eq!(rec.amount, Some(4500));
        assert_eq!(rec.payment_method, PaymentMethod::KakaoPay);
        assert_eq!(rec.category, Category::CafeSnack);
    }

    #[test]
    fn test_generic_error_falls_back_tagged() {
        let rec = resolve(TEXT, Err(CallError::Other), &clock());
        assert_eq!(rec.merchant, "GPT_ERROR | 스타벅스");
        assert_eq!(rec.amount, Some(4500));
    }

    #[test]
    fn test_every_outcome_yields_a_record() {
        let outcomes: Vec<Result<String, CallError>> = vec![
            Ok("{}".to_string()),
            Ok("garbage".to_string()),
            Err(CallError::Client),
            Err(CallError::Other),
        ];
        for outcome in outcomes {
            let rec = resolve("", outcome, &clock());
            assert_eq!(rec.raw_text, "");
            assert_eq!(rec.month, "2025-11");
        }
    }

    #[test]
    fn test_user_prompt_embeds_text_and_shape() {
        let p = user_prompt(TEXT);
        assert!(p.contains(TEXT));
        assert!(p.contains("\"paymentMethod\""));
        assert!(p.contains("\"datetime\""));
    }

    #[test]
    fn test_config_defaults() {
        let cfg = AiConfig::new("sk-test");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.base_url, "https://api.openai.com");
        assert_eq!(cfg.timeout, Duration::from_secs(20));
    }
}
