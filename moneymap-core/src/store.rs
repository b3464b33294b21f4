//! Store traits the extraction core persists through, plus an in-memory
//! implementation used by tests and as the library default.

use std::collections::HashMap;

use anyhow::Result;

use crate::budget::Budget;
use crate::transaction::{ParsedTransaction, PersistedTransaction};

/// Persists spending records and lists them per month.
pub trait TransactionStore {
    /// Assign an id and persist the record.
    fn add(&mut self, record: ParsedTransaction) -> Result<PersistedTransaction>;

    /// All persisted transactions whose `month` equals the given "YYYY-MM".
    fn list_by_month(&self, month: &str) -> Result<Vec<PersistedTransaction>>;
}

/// Per-month budget amounts.
pub trait BudgetStore {
    fn get(&self, month: &str) -> Result<Option<Budget>>;

    /// Upsert the budget for a month.
    fn set(&mut self, month: &str, amount: i64) -> Result<Budget>;
}

/// In-memory store backing both traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: u64,
    transactions: Vec<PersistedTransaction>,
    budgets: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryStore {
    fn add(&mut self, record: ParsedTransaction) -> Result<PersistedTransaction> {
        self.next_id += 1;
        let persisted = PersistedTransaction {
            id: self.next_id,
            record,
        };
        self.transactions.push(persisted.clone());
        Ok(persisted)
    }

    fn list_by_month(&self, month: &str) -> Result<Vec<PersistedTransaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.record.month == month)
            .cloned()
            .collect())
    }
}

impl BudgetStore for MemoryStore {
    fn get(&self, month: &str) -> Result<Option<Budget>> {
        Ok(self.budgets.get(month).map(|amount| Budget {
            month: month.to_string(),
            amount: *amount,
        }))
    }

    fn set(&mut self, month: &str, amount: i64) -> Result<Budget> {
        self.budgets.insert(month.to_string(), amount);
        Ok(Budget {
            month: month.to_string(),
            amount,
        })
    }
}
