//! CSV export of a month's transactions.

use std::path::Path;

use anyhow::{Context, Result};
use moneymap_core::PersistedTransaction;

pub fn export_csv(txns: &[PersistedTransaction], out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)
        .with_context(|| format!("create {}", out.display()))?;

    wtr.write_record([
        "id",
        "month",
        "datetime",
        "amount",
        "merchant",
        "payment_method",
        "category",
        "raw_text",
    ])?;

    for t in txns {
        wtr.write_record([
            t.id.to_string(),
            t.record.month.clone(),
            t.record.occurred_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            t.record
                .amount
                .map(|a| a.to_string())
                .unwrap_or_default(),
            t.record.merchant.clone(),
            t.record.payment_method.label().to_string(),
            t.record.category.label().to_string(),
            t.record.raw_text.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
