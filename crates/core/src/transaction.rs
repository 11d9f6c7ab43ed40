use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// One row of a bank export. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: NaiveDate,
    pub receiver: String,
    pub iban: String,
    pub transaction_type: String,
    pub reference: String,
    pub category: Option<String>,
    pub amount: Money,
    pub foreign_amount: Option<Money>,
    pub foreign_currency: Option<String>,
    /// Identity token supplied by the export, forwarded untouched.
    pub hash: Option<String>,
}

impl RawTransaction {
    /// Minimal row with only the fields the rule engine looks at.
    pub fn new(date: NaiveDate, receiver: &str, iban: &str, amount: Money) -> Self {
        RawTransaction {
            date,
            receiver: receiver.to_string(),
            iban: iban.to_string(),
            transaction_type: String::new(),
            reference: String::new(),
            category: None,
            amount,
            foreign_amount: None,
            foreign_currency: None,
            hash: None,
        }
    }

    /// True when money leaves the account.
    pub fn is_withdrawal(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn foreign_currency(&self) -> Option<&str> {
        self.foreign_currency.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Withdrawal,
    Deposit,
    Transfer,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Deposit => "deposit",
            TransactionType::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger-ready view of a [`RawTransaction`]. Amounts are magnitudes only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    pub date: NaiveDate,
    pub amount: String,
    pub foreign_amount: Option<String>,
    pub foreign_currency: Option<String>,
    pub transaction_type: TransactionType,
    pub description: String,
    pub category: String,
    pub source: String,
    pub destination: String,
    /// Whether a catalog rule governed this transaction.
    pub rule_match: bool,
}
