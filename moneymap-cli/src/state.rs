//! App home directory (~/.moneymap) and the JSON-file store that backs the
//! transaction and budget traits for CLI use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use moneymap_core::{
    Budget, BudgetStore, ParsedTransaction, PersistedTransaction, TransactionStore,
};

pub fn moneymap_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moneymap"))
}

pub fn ensure_moneymap_home() -> Result<PathBuf> {
    let dir = moneymap_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct StoreData {
    next_id: u64,
    transactions: Vec<PersistedTransaction>,
    budgets: Vec<Budget>,
}

/// Ledger persisted as one pretty-printed JSON file
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonStore {
    pub fn open() -> Result<Self> {
        Self::open_at(ensure_moneymap_home()?.join("ledger.json"))
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        } else {
            StoreData::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let s = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, s).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

impl TransactionStore for JsonStore {
    fn add(&mut self, record: ParsedTransaction) -> Result<PersistedTransaction> {
        self.data.next_id += 1;
        let persisted = PersistedTransaction {
            id: self.data.next_id,
            record,
        };
        self.data.transactions.push(persisted.clone());
        self.persist()?;
        Ok(persisted)
    }

    fn list_by_month(&self, month: &str) -> Result<Vec<PersistedTransaction>> {
        Ok(self
            .data
            .transactions
            .iter()
            .filter(|t| t.record.month == month)
            .cloned()
            .collect())
    }
}

impl BudgetStore for JsonStore {
    fn get(&self, month: &str) -> Result<Option<Budget>> {
        Ok(self
            .data
            .budgets
            .iter()
            .find(|b| b.month == month)
            .cloned())
    }

    fn set(&mut self, month: &str, amount: i64) -> Result<Budget> {
        match self.data.budgets.iter_mut().find(|b| b.month == month) {
            Some(existing) => existing.amount = amount,
            None => self.data.budgets.push(Budget {
                month: month.to_string(),
                amount,
            }),
        }
        self.persist()?;
        Ok(Budget {
            month: month.to_string(),
            amount,
        })
    }
}
