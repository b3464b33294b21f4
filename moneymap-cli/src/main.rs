use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use moneymap_core::{budget_status, is_valid_month, SystemClock, TransactionStore};
use moneymap_extract::{AiConfig, AiParser, Extractor, ParseMode};

mod auth;
mod config;
mod export;
mod ocr;
mod state;

use config::Config;
use ocr::TesseractCli;
use state::JsonStore;

#[derive(Parser, Debug)]
#[command(name = "moneymap", version, about = "Spending tracker: parse payment messages/receipts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a payment message and print the extracted record
    ParseText {
        /// Raw message text, e.g. "[카카오페이] ... 4,500원 결제 완료"
        text: String,

        /// Use the AI parser (rule-based fallback on failure)
        #[arg(long)]
        ai: bool,

        /// Persist the record to the ledger
        #[arg(long)]
        save: bool,
    },

    /// OCR a receipt/notification screenshot, then parse the text
    ParseImage {
        /// Path to the image file
        path: PathBuf,

        #[arg(long)]
        ai: bool,

        #[arg(long)]
        save: bool,
    },

    /// Stored transactions
    Transaction {
        #[command(subcommand)]
        command: TransactionCommand,
    },

    /// Monthly budgets
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// Credentials for the AI parser
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Write a default ~/.moneymap/config.toml
    ConfigInit,
}

#[derive(Subcommand, Debug)]
enum TransactionCommand {
    /// List a month's transactions as JSON
    List {
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
    },

    /// Export a month's transactions to CSV
    Export {
        #[arg(long)]
        month: String,

        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    /// Set the budget for a month (whole KRW)
    Set {
        #[arg(long)]
        month: String,

        #[arg(long)]
        amount: i64,
    },

    /// Show spent/remaining/progress for a month
    Status {
        #[arg(long)]
        month: String,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Paste and store an OpenAI API key
    PasteApiKey,

    /// Show whether a key is configured
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    // startup presence note on stderr so JSON on stdout stays clean
    eprintln!("{}", auth::presence_line(&auth::load_auth()?));

    match cli.command {
        Command::ParseText { text, ai, save } => {
            let extractor = build_extractor(&cfg, ai)?;
            let mode = parse_mode(ai);
            if save {
                let mut store = JsonStore::open()?;
                let saved = extractor.parse_and_save_text(mode, &text, &mut store)?;
                print_json(&saved)?;
            } else {
                print_json(&extractor.parse_text(mode, &text))?;
            }
        }

        Command::ParseImage { path, ai, save } => {
            let image = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            let recognizer = TesseractCli::from_config(&cfg.ocr);
            let extractor = build_extractor(&cfg, ai)?;
            let mode = parse_mode(ai);
            if save {
                let mut store = JsonStore::open()?;
                let saved =
                    extractor.parse_and_save_image(mode, &recognizer, &image, &mut store)?;
                print_json(&saved)?;
            } else {
                print_json(&extractor.parse_image(mode, &recognizer, &image))?;
            }
        }

        Command::Transaction { command } => match command {
            TransactionCommand::List { month } => {
                let store = JsonStore::open()?;
                print_json(&store.list_by_month(&month)?)?;
            }
            TransactionCommand::Export { month, out } => {
                let store = JsonStore::open()?;
                let txns = store.list_by_month(&month)?;
                export::export_csv(&txns, &out)?;
                println!("Wrote {} transactions to {}", txns.len(), out.display());
            }
        },

        Command::Budget { command } => match command {
            BudgetCommand::Set { month, amount } => {
                if !is_valid_month(&month) {
                    bail!("month must be YYYY-MM, got: {month}");
                }
                use moneymap_core::BudgetStore;
                let mut store = JsonStore::open()?;
                print_json(&store.set(&month, amount)?)?;
            }
            BudgetCommand::Status { month } => {
                let store = JsonStore::open()?;
                print_json(&budget_status(&store, &store, &month)?)?;
            }
        },

        Command::Auth { command } => match command {
            AuthCommand::PasteApiKey => auth::paste_api_key()?,
            AuthCommand::Status => auth::key_status()?,
        },

        Command::ConfigInit => config::init_config()?,
    }

    Ok(())
}

fn parse_mode(ai: bool) -> ParseMode {
    if ai {
        ParseMode::Ai
    } else {
        ParseMode::Rule
    }
}

fn build_extractor(cfg: &Config, want_ai: bool) -> Result<Extractor> {
    let clock = SystemClock::new(&cfg.time.timezone)?;

    let ai = if want_ai {
        let a = auth::load_auth()?;
        let Some(key) = a.openai_api_key else {
            bail!("no OpenAI API key configured; run: moneymap auth paste-api-key");
        };
        let mut ai_cfg = AiConfig::new(key);
        ai_cfg.model = cfg.llm.model.clone();
        ai_cfg.base_url = cfg.llm.base_url.clone();
        ai_cfg.timeout = Duration::from_secs(cfg.llm.timeout_secs);
        Some(AiParser::new(ai_cfg))
    } else {
        None
    };

    Ok(Extractor::new(Box::new(clock), ai))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
