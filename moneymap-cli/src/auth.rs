use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::state::ensure_moneymap_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthState {
    pub openai_api_key: Option<String>,
}

fn auth_path() -> Result<std::path::PathBuf> {
    Ok(ensure_moneymap_home()?.join("auth.json"))
}

pub fn load_auth() -> Result<AuthState> {
    let p = auth_path()?;
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn save_auth(auth: &AuthState) -> Result<()> {
    let p = auth_path()?;
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn paste_api_key() -> Result<()> {
    let mut auth = load_auth()?;
    let key = prompt_secret("Paste OpenAI API key (starts with sk-)")?;
    if !key.starts_with("sk-") {
        bail!("key didn't look like an OpenAI API key (expected prefix sk-)");
    }
    auth.openai_api_key = Some(key);
    save_auth(&auth)?;
    println!("Saved OpenAI API key to ~/.moneymap/auth.json");
    Ok(())
}

/// One-line presence note for startup and `auth status`. Never echoes the key.
pub fn presence_line(auth: &AuthState) -> &'static str {
    if auth.openai_api_key.is_some() {
        "OpenAI API key: configured"
    } else {
        "OpenAI API key: not set (run: moneymap auth paste-api-key)"
    }
}

/// Report whether a key is configured, without echoing it.
pub fn key_status() -> Result<()> {
    println!("{}", presence_line(&load_auth()?));
    Ok(())
}
