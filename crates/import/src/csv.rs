use banksync_core::{Money, RawTransaction};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },
}

/// Column layout of the bank's export.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Datum")]
    date: String,
    #[serde(rename = "Empfänger")]
    receiver: String,
    #[serde(rename = "Kontonummer")]
    iban: String,
    #[serde(rename = "Transaktionstyp")]
    transaction_type: String,
    #[serde(rename = "Verwendungszweck")]
    reference: String,
    #[serde(rename = "Kategorie", default)]
    category: Option<String>,
    #[serde(rename = "Betrag (EUR)")]
    amount: String,
    #[serde(rename = "Betrag (Fremdwährung)", default)]
    foreign_amount: Option<String>,
    #[serde(rename = "Fremdwährung", default)]
    foreign_currency: Option<String>,
    #[serde(rename = "Hash", default)]
    hash: Option<String>,
}

impl CsvRow {
    fn into_transaction(self, row: usize) -> Result<RawTransaction, CsvError> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|_| {
            CsvError::InvalidDate {
                row,
                value: self.date.clone(),
            }
        })?;
        let amount = parse_amount(&self.amount, row)?;
        let foreign_amount = non_blank(self.foreign_amount)
            .map(|value| parse_amount(&value, row))
            .transpose()?;

        Ok(RawTransaction {
            date,
            receiver: self.receiver,
            iban: self.iban,
            transaction_type: self.transaction_type,
            reference: self.reference,
            category: non_blank(self.category),
            amount,
            foreign_amount,
            foreign_currency: non_blank(self.foreign_currency),
            hash: non_blank(self.hash),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_amount(s: &str, row: usize) -> Result<Money, CsvError> {
    s.parse().map_err(|_| CsvError::InvalidAmount {
        row,
        value: s.to_string(),
    })
}

/// Reads every row in file order. The first malformed row aborts the import.
pub fn read_transactions<R: Read>(data: R) -> Result<Vec<RawTransaction>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            // Line 1 is the header.
            let row = idx + 2;
            result?.into_transaction(row)
        })
        .collect()
}

pub fn load_transactions(path: &Path) -> Result<Vec<RawTransaction>, CsvError> {
    let file = File::open(path)?;
    read_transactions(file)
}
