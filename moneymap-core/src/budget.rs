//! Monthly budgets and derived budget status.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::store::{BudgetStore, TransactionStore};

/// Budget set for one month, whole KRW
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub month: String,
    pub amount: i64,
}

/// How far through a month's budget the recorded spending has gone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub month: String,
    pub budget: i64,
    pub spent: i64,
    pub remaining: i64,
    /// spent / budget, 0.0 when the budget is zero
    pub progress: f64,
}

/// Derive the budget status for a month.
///
/// The unset-month case is the one error surfaced by this layer; records with
/// no extracted amount count as zero spend.
pub fn budget_status(
    budgets: &dyn BudgetStore,
    transactions: &dyn TransactionStore,
    month: &str,
) -> Result<BudgetStatus> {
    let Some(budget) = budgets.get(month)? else {
        bail!("budget not set for month: {month}");
    };

    let spent: i64 = transactions
        .list_by_month(month)?
        .iter()
        .filter_map(|t| t.record.amount)
        .sum();

    let progress = if budget.amount == 0 {
        0.0
    } else {
        spent as f64 / budget.amount as f64
    };

    Ok(BudgetStatus {
        month: month.to_string(),
        budget: budget.amount,
        spent,
        remaining: budget.amount - spent,
        progress,
    })
}
