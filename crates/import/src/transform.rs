use banksync_core::{
    Defaults, Money, NormalizedTransaction, RawTransaction, RuleData, TransactionType,
};

/// Builds the ledger view of `tx` from the rule that governs it, if any.
///
/// Rules and defaults name accounts as if the transaction were a withdrawal.
/// For deposits the two sides are swapped, so a rule routing money *to*
/// "Rent" books an incoming payment *from* "Rent".
pub fn transform(
    tx: &RawTransaction,
    rule: Option<&RuleData>,
    defaults: &Defaults,
) -> NormalizedTransaction {
    let withdraw = tx.is_withdrawal();

    let (foreign_amount, foreign_currency) = match tx.foreign_currency() {
        Some(code) => (
            Some(
                tx.foreign_amount
                    .unwrap_or_else(Money::zero)
                    .magnitude()
                    .to_ledger_string(),
            ),
            Some(code.to_string()),
        ),
        None => (None, None),
    };

    let mut transaction_type = if withdraw {
        TransactionType::Withdrawal
    } else {
        TransactionType::Deposit
    };
    let mut description = defaults.description_for(&tx.receiver);
    let mut category = None;
    let mut source = None;
    let mut destination = None;

    if defaults.applies(rule.is_some()) {
        category = defaults.category();
        source = defaults.source();
        destination = defaults.destination();
    }

    if let Some(rule) = rule {
        if rule.internal {
            transaction_type = TransactionType::Transfer;
        }
        if let Some(value) = rule.category() {
            category = Some(value);
        }
        if let Some(value) = rule.description() {
            description = value.to_string();
        }
        if let Some(value) = rule.source() {
            source = Some(value);
        }
        if let Some(value) = rule.destination() {
            destination = Some(value);
        }
    }

    if !withdraw {
        std::mem::swap(&mut source, &mut destination);
    }

    NormalizedTransaction {
        date: tx.date,
        amount: tx.amount.magnitude().to_ledger_string(),
        foreign_amount,
        foreign_currency,
        transaction_type,
        description,
        category: category.unwrap_or_default().to_string(),
        source: source.unwrap_or_default().to_string(),
        destination: destination.unwrap_or_default().to_string(),
        rule_match: rule.is_some(),
    }
}
