use banksync_core::{NormalizedTransaction, RawTransaction};
use std::io::{self, Write};

/// One line of the side-by-side review: bank export on the left, ledger
/// booking on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub field: &'static str,
    pub input: String,
    pub output: String,
}

pub fn report_rows(raw: &RawTransaction, normalized: &NormalizedTransaction) -> Vec<ReportRow> {
    let date = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
    let candidates = [
        ("Date", date(raw.date), date(normalized.date)),
        ("Receiver", raw.receiver.clone(), String::new()),
        ("IBAN", raw.iban.clone(), String::new()),
        ("Reference", raw.reference.clone(), String::new()),
        ("Source", String::new(), normalized.source.clone()),
        ("Destination", String::new(), normalized.destination.clone()),
        ("Category", String::new(), normalized.category.clone()),
        ("Description", String::new(), normalized.description.clone()),
        ("Type", String::new(), normalized.transaction_type.to_string()),
        ("Amount", raw.amount.to_ledger_string(), normalized.amount.clone()),
    ];

    candidates
        .into_iter()
        .filter(|(_, input, output)| !(input.is_empty() && output.is_empty()))
        .map(|(field, input, output)| ReportRow { field, input, output })
        .collect()
}

pub fn write_report<W: Write>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    let field_width = rows.iter().map(|r| r.field.len()).max().unwrap_or(0);
    let input_width = rows
        .iter()
        .map(|r| r.input.chars().count())
        .max()
        .unwrap_or(0)
        .max("Input CSV".len());

    writeln!(out, "{:field_width$}  {:input_width$}  Output", "Field", "Input CSV")?;
    for row in rows {
        writeln!(
            out,
            "{:field_width$}  {:input_width$}  {}",
            row.field, row.input, row.output
        )?;
    }
    writeln!(out)
}
