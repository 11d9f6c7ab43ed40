use banksync_core::NormalizedTransaction;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use crate::wire::{ExistingSplit, TransactionGroup};

/// Returns the id of the first stored group holding a split that is the same
/// booking as `candidate`.
///
/// A split matches when it carries the same identity token, or when its
/// accounts and amount are equal to the candidate's. Amounts compare
/// numerically since the ledger pads them with extra zeros.
pub fn find_duplicate(
    groups: &[TransactionGroup],
    candidate: &NormalizedTransaction,
    external_id: Option<&str>,
) -> Option<i64> {
    let amount = Decimal::from_str(&candidate.amount).ok();
    let external_id = external_id.filter(|id| !id.is_empty());

    groups
        .iter()
        .filter(|group| {
            group
                .attributes
                .transactions
                .iter()
                .any(|split| same_booking(split, candidate, amount, external_id))
        })
        .find_map(|group| match group.id.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(id = %group.id, "ignoring ledger entry with non-numeric id");
                None
            }
        })
}

fn same_booking(
    split: &ExistingSplit,
    candidate: &NormalizedTransaction,
    amount: Option<Decimal>,
    external_id: Option<&str>,
) -> bool {
    if let (Some(wanted), Some(stored)) = (external_id, split.external_id.as_deref()) {
        if wanted == stored {
            return true;
        }
    }

    let split_amount = Decimal::from_str(split.amount.trim()).ok();
    split.source_name.as_deref().unwrap_or_default() == candidate.source
        && split.destination_name.as_deref().unwrap_or_default() == candidate.destination
        && amount.is_some()
        && split_amount == amount
}
