//! JSON shapes exchanged with the ledger's `/api/v1/transactions` endpoint.

use banksync_core::{NormalizedTransaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One split as posted to the ledger.
#[derive(Debug, Serialize)]
pub struct NewSplit<'a> {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub amount: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_amount: Option<&'a str>,
    #[serde(rename = "foreign_currency_code", skip_serializing_if = "Option::is_none")]
    pub foreign_currency: Option<&'a str>,
    pub category_name: &'a str,
    pub source_name: &'a str,
    pub destination_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<&'a str>,
}

impl<'a> NewSplit<'a> {
    pub fn new(tx: &'a NormalizedTransaction, external_id: Option<&'a str>) -> Self {
        NewSplit {
            transaction_type: tx.transaction_type,
            date: tx.date,
            amount: &tx.amount,
            description: &tx.description,
            foreign_amount: tx.foreign_amount.as_deref(),
            foreign_currency: tx.foreign_currency.as_deref(),
            category_name: &tx.category,
            source_name: &tx.source,
            destination_name: &tx.destination,
            external_id: external_id.filter(|id| !id.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StoreRequest<'a> {
    pub error_if_duplicate_hash: bool,
    pub apply_rules: bool,
    pub transactions: Vec<NewSplit<'a>>,
}

impl<'a> StoreRequest<'a> {
    /// The ledger's own rules stay off; routing already happened here.
    pub fn single(split: NewSplit<'a>) -> Self {
        StoreRequest {
            error_if_duplicate_hash: false,
            apply_rules: false,
            transactions: vec![split],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub data: Vec<TransactionGroup>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionGroup {
    pub id: String,
    #[serde(default)]
    pub attributes: GroupAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupAttributes {
    #[serde(default)]
    pub transactions: Vec<ExistingSplit>,
}

/// A split already stored in the ledger. Only the fields used for duplicate
/// detection are read; the ledger returns amounts with extra precision.
#[derive(Debug, Default, Deserialize)]
pub struct ExistingSplit {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub destination_name: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NormalizedTransaction {
        NormalizedTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            amount: "42.00".to_string(),
            foreign_amount: None,
            foreign_currency: None,
            transaction_type: TransactionType::Withdrawal,
            description: "Landlord GmbH".to_string(),
            category: "Housing".to_string(),
            source: "Checking".to_string(),
            destination: "Rent".to_string(),
            rule_match: true,
        }
    }

    #[test]
    fn store_request_shape() {
        let tx = sample();
        let request = StoreRequest::single(NewSplit::new(&tx, Some("abc")));
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({
                "error_if_duplicate_hash": false,
                "apply_rules": false,
                "transactions": [{
                    "type": "withdrawal",
                    "date": "2024-01-15",
                    "amount": "42.00",
                    "description": "Landlord GmbH",
                    "category_name": "Housing",
                    "source_name": "Checking",
                    "destination_name": "Rent",
                    "external_id": "abc"
                }]
            })
        );
    }

    #[test]
    fn foreign_fields_are_sent_when_present() {
        let mut tx = sample();
        tx.foreign_amount = Some("120.00".to_string());
        tx.foreign_currency = Some("USD".to_string());
        let split = serde_json::to_value(NewSplit::new(&tx, None)).unwrap();
        assert_eq!(split["foreign_amount"], "120.00");
        assert_eq!(split["foreign_currency_code"], "USD");
        assert!(split.get("external_id").is_none());
        assert!(split.get("rule_match").is_none());
    }

    #[test]
    fn list_response_tolerates_missing_fields() {
        let list: TransactionList = serde_json::from_value(json!({
            "data": [
                {"type": "transactions", "id": "7", "attributes": {"transactions": [{
                    "amount": "42.000000000000",
                    "source_name": "Checking",
                    "destination_name": null
                }]}},
                {"type": "transactions", "id": "8"}
            ],
            "meta": {"pagination": {"total": 2}}
        }))
        .unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].attributes.transactions[0].amount, "42.000000000000");
        assert_eq!(list.data[0].attributes.transactions[0].destination_name, None);
        assert!(list.data[1].attributes.transactions.is_empty());
    }
}
