//! Extraction facade: mode selection plus optional persistence. No parsing
//! logic of its own.

use anyhow::Result;
use moneymap_core::{Clock, ParsedTransaction, PersistedTransaction, TransactionStore};

use crate::ai_parser::AiParser;
use crate::ocr::TextRecognizer;
use crate::rule_parser::parse_rule_based;

/// Which parser handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Rule,
    Ai,
}

pub struct Extractor {
    clock: Box<dyn Clock>,
    /// Absent when no API key is configured; AI-mode requests then take the
    /// rule-based path so extraction stays total.
    ai: Option<AiParser>,
}

impl Extractor {
    pub fn new(clock: Box<dyn Clock>, ai: Option<AiParser>) -> Self {
        Self { clock, ai }
    }

    pub fn parse_text(&self, mode: ParseMode, raw_text: &str) -> ParsedTransaction {
        match (mode, &self.ai) {
            (ParseMode::Ai, Some(ai)) => ai.parse(raw_text, self.clock.as_ref()),
            _ => parse_rule_based(raw_text, self.clock.as_ref()),
        }
    }

    /// OCR the image, then parse whatever text came out. Recognition failure
    /// surfaces as "no text extracted", i.e. empty input.
    pub fn parse_image(
        &self,
        mode: ParseMode,
        recognizer: &dyn TextRecognizer,
        image: &[u8],
    ) -> ParsedTransaction {
        let text = recognizer.recognize(image).unwrap_or_default();
        self.parse_text(mode, text.trim())
    }

    pub fn parse_and_save_text(
        &self,
        mode: ParseMode,
        raw_text: &str,
        store: &mut dyn TransactionStore,
    ) -> Result<PersistedTransaction> {
        store.add(self.parse_text(mode, raw_text))
    }

    pub fn parse_and_save_image(
        &self,
        mode: ParseMode,
        recognizer: &dyn TextRecognizer,
        image: &[u8],
        store: &mut dyn TransactionStore,
    ) -> Result<PersistedTransaction> {
        store.add(self.parse_image(mode, recognizer, image))
    }
}
