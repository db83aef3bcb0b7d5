//! Invoice record model for extracted NF-e data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Report column headers, in fixed order.
pub const COLUMNS: [&str; 7] = [
    "Razao Social Destinatario",
    "Data de Emissao",
    "Numero da Nota",
    "Valor Total",
    "Primeiro Vencimento",
    "Razao Social Fornecedor",
    "Nota Cancelada",
];

/// Fields extracted from a single NF-e document.
///
/// Every field is independently optional: a missing or malformed node in
/// the source document leaves its own field empty without affecting the
/// others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Recipient legal name (`dest/xNome`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Issue date formatted `dd/mm/yyyy` (`ide/dhEmi`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,

    /// Invoice number (`ide/nNF`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,

    /// Total invoice value (`total/ICMSTot/vNF`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    /// First due date formatted `dd/mm/yyyy` (`cobr/dup/dVenc`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Issuer legal name (`emit/xNome`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Whether the issuing authority marked the invoice cancelled.
    pub cancelled: bool,
}

impl InvoiceRecord {
    /// True when at least one primary field was extracted.
    ///
    /// The cancelled flag does not count: a document that only yields a
    /// protocol status carries no invoice data.
    pub fn has_data(&self) -> bool {
        self.recipient.is_some()
            || self.issue_date.is_some()
            || self.number.is_some()
            || self.total.is_some()
            || self.due_date.is_some()
            || self.issuer.is_some()
    }

    /// Cancellation flag as shown in the report.
    pub fn cancelled_label(&self) -> &'static str {
        if self.cancelled { "Sim" } else { "Não" }
    }

    /// Total value rendered as currency text, empty when absent.
    pub fn total_display(&self) -> String {
        self.total.map(format_currency).unwrap_or_default()
    }

    /// The record as display cells, in column order.
    pub fn row(&self) -> [String; 7] {
        [
            self.recipient.clone().unwrap_or_default(),
            self.issue_date.clone().unwrap_or_default(),
            self.number.map(|n| n.to_string()).unwrap_or_default(),
            self.total_display(),
            self.due_date.clone().unwrap_or_default(),
            self.issuer.clone().unwrap_or_default(),
            self.cancelled_label().to_string(),
        ]
    }
}

/// Format a monetary value as `R$` plus thousands-grouped digits and two
/// decimal places, e.g. `R$1,234.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int, frac)) => (int, format!("{frac:0<2}")),
        None => (text.as_str(), "00".to_string()),
    };

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("R${sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_has_data_requires_one_primary_field() {
        let mut record = InvoiceRecord::default();
        assert!(!record.has_data());

        record.cancelled = true;
        assert!(!record.has_data());

        record.number = Some(452);
        assert!(record.has_data());
    }

    #[test]
    fn test_cancelled_label() {
        let mut record = InvoiceRecord::default();
        assert_eq!(record.cancelled_label(), "Não");
        record.cancelled = true;
        assert_eq!(record.cancelled_label(), "Sim");
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::new(123450, 2)), "R$1,234.50");
        assert_eq!(format_currency(Decimal::new(1_000_000, 0)), "R$1,000,000.00");
        assert_eq!(format_currency(Decimal::new(50, 2)), "R$0.50");
    }

    #[test]
    fn test_format_currency_pads_and_rounds() {
        assert_eq!(format_currency(Decimal::new(5, 0)), "R$5.00");
        assert_eq!(format_currency(Decimal::new(105, 1)), "R$10.50");
        assert_eq!(format_currency(Decimal::new(10999, 3)), "R$11.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Decimal::new(-500, 2)), "R$-5.00");
    }

    #[test]
    fn test_row_renders_empty_fields_as_blank() {
        let record = InvoiceRecord {
            recipient: Some("ACME LTDA".to_string()),
            total: Some(Decimal::new(123450, 2)),
            ..Default::default()
        };
        let row = record.row();
        assert_eq!(row[0], "ACME LTDA");
        assert_eq!(row[1], "");
        assert_eq!(row[2], "");
        assert_eq!(row[3], "R$1,234.50");
        assert_eq!(row[6], "Não");
    }
}
