use anyhow::{Context, Result};
use banksync_core::RawTransaction;
use banksync_import::{process, Config};
use banksync_ledger::LedgerSync;
use std::io::Write;
use tracing::{debug, info};

use crate::report::{report_rows, write_report};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Match and look up, but never post.
    pub dry_run: bool,
    /// Only report transactions no rule matched.
    pub show_no_match: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub matched: usize,
    pub skipped: usize,
    pub posted: usize,
}

/// Processes `transactions` one by one in file order. Without a ledger no
/// lookups or posts happen. The first ledger error stops the run.
pub async fn run<L, W>(
    transactions: &[RawTransaction],
    config: &Config,
    ledger: Option<&L>,
    options: RunOptions,
    out: &mut W,
) -> Result<Summary>
where
    L: LedgerSync,
    W: Write,
{
    let mut summary = Summary::default();

    for (idx, raw) in transactions.iter().enumerate() {
        summary.rows += 1;
        let normalized = process(raw, &config.engine, &config.defaults);
        if normalized.rule_match {
            summary.matched += 1;
        }
        debug!(
            row = idx + 1,
            rule_match = normalized.rule_match,
            kind = %normalized.transaction_type,
            "processed transaction"
        );

        if let Some(ledger) = ledger {
            let external_id = raw.hash.as_deref();
            let existing = ledger
                .find_existing(&normalized, external_id)
                .await
                .with_context(|| format!("look up transaction from {}", raw.date))?;
            if let Some(id) = existing {
                info!(id, date = %raw.date, "transaction already exists, skipping");
                summary.skipped += 1;
                continue;
            }
            if !options.dry_run {
                ledger
                    .push(&normalized, external_id)
                    .await
                    .with_context(|| format!("post transaction from {}", raw.date))?;
                summary.posted += 1;
            }
        }

        if options.show_no_match && normalized.rule_match {
            continue;
        }
        write_report(out, &report_rows(raw, &normalized)).context("write report")?;
    }

    Ok(summary)
}
