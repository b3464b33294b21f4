use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::state::ensure_moneymap_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmSection,
    pub time: TimeSection,
    pub ocr: OcrSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSection {
    pub model: String,
    pub base_url: String,
    /// Whole-request timeout; on expiry the AI parser falls back to rules
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSection {
    /// IANA timezone that decides "current month" for defaults
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSection {
    pub command: String,
    pub languages: String,
    /// Override for the tesseract data directory
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmSection {
                model: "gpt-4o-mini".to_string(),
                base_url: "https://api.openai.com".to_string(),
                timeout_secs: 20,
            },
            time: TimeSection {
                timezone: "Asia/Seoul".to_string(),
            },
            ocr: OcrSection {
                command: "tesseract".to_string(),
                languages: "kor+eng".to_string(),
                tessdata_dir: None,
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moneymap_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
