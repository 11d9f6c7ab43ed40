use serde::{Deserialize, Serialize};

/// Treats `Some("")` like `None`: an empty predicate or override never applies.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Which transactions a rule applies to. A predicate with no fields never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePredicate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Regular expression searched in the receiver name.
    #[serde(default, alias = "reciever", skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
}

impl RulePredicate {
    pub fn iban(&self) -> Option<&str> {
        non_empty(&self.iban)
    }

    pub fn receiver(&self) -> Option<&str> {
        non_empty(&self.receiver)
    }

    pub fn is_empty(&self) -> bool {
        self.iban().is_none() && self.receiver().is_none()
    }
}

/// What a matched rule writes into the output. Accounts are written from the
/// withdrawal perspective: money leaves `source` and arrives at `destination`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleData {
    /// Transfer between the user's own accounts.
    #[serde(default)]
    pub internal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RuleData {
    pub fn source(&self) -> Option<&str> {
        non_empty(&self.source)
    }

    pub fn destination(&self) -> Option<&str> {
        non_empty(&self.destination)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

/// One catalog entry. Position in the catalog is its priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "match", default)]
    pub predicate: RulePredicate,
    #[serde(default)]
    pub data: RuleData,
}

/// When configured [`Defaults`] accounts and category are used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Defaults are ignored. Unmatched transactions carry no accounts.
    #[default]
    Never,
    /// Defaults fill in only when no rule matched.
    Unmatched,
    /// Defaults seed every transaction; non-empty rule fields override them.
    Always,
}

/// Run-wide fallback values, withdrawal-oriented like [`RuleData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Prepended to the receiver name to build the default description.
    #[serde(default)]
    pub description_prefix: Option<String>,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

impl Defaults {
    pub fn source(&self) -> Option<&str> {
        non_empty(&self.source)
    }

    pub fn destination(&self) -> Option<&str> {
        non_empty(&self.destination)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn description_for(&self, receiver: &str) -> String {
        match non_empty(&self.description_prefix) {
            Some(prefix) => format!("{prefix}{receiver}"),
            None => receiver.to_string(),
        }
    }

    /// Whether defaults apply to a transaction, given if a rule matched.
    pub fn applies(&self, rule_matched: bool) -> bool {
        match self.fallback {
            FallbackPolicy::Never => false,
            FallbackPolicy::Unmatched => !rule_matched,
            FallbackPolicy::Always => true,
        }
    }
}
