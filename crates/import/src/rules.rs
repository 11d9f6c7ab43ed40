use banksync_core::{RawTransaction, Rule, RuleData};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Rule #{index}: invalid receiver pattern '{pattern}': {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        source: regex::Error,
    },
}

/// Internal pairing of a rule with its precompiled receiver regex.
struct CompiledRule {
    rule: Rule,
    receiver: Option<Regex>,
}

/// Ordered rule catalog. Catalog order is priority order and never changes
/// after construction.
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
}

impl RuleEngine {
    /// Compiles every receiver pattern up front; one bad pattern rejects the
    /// whole catalog.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                let receiver = rule
                    .predicate
                    .receiver()
                    .map(|pattern| {
                        Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                            index,
                            pattern: pattern.to_string(),
                            source,
                        })
                    })
                    .transpose()?;
                Ok(CompiledRule { rule, receiver })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|cr| &cr.rule)
    }

    /// IBAN rules are tried across the whole catalog before any receiver rule,
    /// so a broad receiver pattern can never shadow an account-level rule.
    pub fn find_match(&self, tx: &RawTransaction) -> Option<&RuleData> {
        self.match_iban(tx).or_else(|| self.match_receiver(tx))
    }

    fn match_iban(&self, tx: &RawTransaction) -> Option<&RuleData> {
        if tx.iban.is_empty() {
            return None;
        }
        let (index, cr) = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, cr)| cr.rule.predicate.iban() == Some(tx.iban.as_str()))?;
        debug!(rule = index, iban = %tx.iban, "matched rule by IBAN");
        Some(&cr.rule.data)
    }

    fn match_receiver(&self, tx: &RawTransaction) -> Option<&RuleData> {
        if tx.receiver.is_empty() {
            return None;
        }
        let (index, cr) = self.rules.iter().enumerate().find(|(_, cr)| {
            cr.receiver
                .as_ref()
                .is_some_and(|re| re.is_match(&tx.receiver))
        })?;
        debug!(rule = index, receiver = %tx.receiver, "matched rule by receiver");
        Some(&cr.rule.data)
    }
}
