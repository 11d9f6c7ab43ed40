pub mod money;
pub mod rule;
pub mod transaction;

pub use money::{Money, MoneyError};
pub use rule::{Defaults, FallbackPolicy, Rule, RuleData, RulePredicate};
pub use transaction::{NormalizedTransaction, RawTransaction, TransactionType};
