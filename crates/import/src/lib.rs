pub mod config;
pub mod csv;
pub mod rules;
pub mod transform;

pub use crate::csv::{load_transactions, read_transactions, CsvError};
pub use config::{Config, ConfigError};
pub use rules::{RuleEngine, RuleError};
pub use transform::transform;

use banksync_core::{Defaults, NormalizedTransaction, RawTransaction};

/// Resolves the governing rule for `tx` and builds its ledger view.
pub fn process(
    tx: &RawTransaction,
    engine: &RuleEngine,
    defaults: &Defaults,
) -> NormalizedTransaction {
    transform(tx, engine.find_match(tx), defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use banksync_core::TransactionType;

    const CONFIG: &str = r#"
[[rules]]
match = { receiver = "Landlord.*" }
data = { destination = "Rent" }

[[rules]]
match = { iban = "DE123" }
data = { internal = true, source = "Checking", destination = "Savings" }
"#;

    const EXPORT: &str = "\
Datum,Empfänger,Kontonummer,Transaktionstyp,Verwendungszweck,Kategorie,Betrag (EUR),Betrag (Fremdwährung),Fremdwährung
2024-01-01,Landlord GmbH,,Transfer,Rent,,-42.00,,
2024-01-02,Landlord GmbH,,Refund,Deposit back,,42.00,,
2024-01-03,Landlord GmbH,DE123,Transfer,Savings,,-10.00,,
2024-01-04,Corner Shop,DE555,Card,,,-3.50,,
2024-01-05,,,Fee,,,-1.00,,
";

    fn run() -> Vec<NormalizedTransaction> {
        let config = Config::from_toml(CONFIG).unwrap();
        read_transactions(EXPORT.as_bytes())
            .unwrap()
            .iter()
            .map(|tx| process(tx, &config.engine, &config.defaults))
            .collect()
    }

    #[test]
    fn end_to_end_scenarios() {
        let out = run();
        assert_eq!(out.len(), 5);

        // Outgoing rent keeps the rule's orientation.
        assert_eq!(out[0].transaction_type, TransactionType::Withdrawal);
        assert_eq!((out[0].source.as_str(), out[0].destination.as_str()), ("", "Rent"));

        // Incoming money from the landlord swaps it.
        assert_eq!(out[1].transaction_type, TransactionType::Deposit);
        assert_eq!((out[1].source.as_str(), out[1].destination.as_str()), ("Rent", ""));

        // IBAN rule wins over the earlier receiver rule.
        assert_eq!(out[2].transaction_type, TransactionType::Transfer);
        assert_eq!(out[2].destination, "Savings");

        // Unmatched rows.
        for tx in &out[3..] {
            assert!(!tx.rule_match);
            assert_eq!(tx.transaction_type, TransactionType::Withdrawal);
            assert!(tx.source.is_empty() && tx.destination.is_empty() && tx.category.is_empty());
        }
    }

    #[test]
    fn processing_twice_is_identical() {
        assert_eq!(run(), run());
    }
}
