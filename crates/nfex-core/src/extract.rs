//! NF-e field extraction.
//!
//! Each field is located by its namespaced path and coerced independently:
//! a missing node or malformed value empties that field only. A record is
//! emitted only when at least one primary field survives.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::invoice::InvoiceRecord;
use crate::xml::XmlDocument;

/// XML namespace shared by every element of an NF-e document.
pub const NFE_NAMESPACE: &str = "http://www.portalfiscal.inf.br/nfe";

/// Protocol status code meaning the invoice was cancelled.
const CSTAT_CANCELLED: &str = "101";

/// Extract an [`InvoiceRecord`] from decoded NF-e XML text.
///
/// Fails with [`ExtractionError::Malformed`] when the text is not
/// well-formed XML, and with [`ExtractionError::NoData`] when the document
/// parses but none of the primary fields is present.
pub fn extract(text: &str) -> Result<InvoiceRecord, ExtractionError> {
    let doc = XmlDocument::parse(text)?;

    let record = InvoiceRecord {
        recipient: field(&doc, &["dest", "xNome"]).map(str::to_owned),
        issue_date: field(&doc, &["ide", "dhEmi"]).and_then(|t| format_date(truncate(t, 10))),
        number: field(&doc, &["ide", "nNF"]).and_then(|t| t.parse().ok()),
        total: field(&doc, &["total", "ICMSTot", "vNF"]).and_then(|t| t.parse::<Decimal>().ok()),
        due_date: field(&doc, &["cobr", "dup", "dVenc"]).and_then(format_date),
        issuer: field(&doc, &["emit", "xNome"]).map(str::to_owned),
        cancelled: field(&doc, &["protNFe", "infProt", "cStat"])
            .is_some_and(|status| status == CSTAT_CANCELLED),
    };

    if record.has_data() {
        Ok(record)
    } else {
        debug!("document parsed but no primary field is present");
        Err(ExtractionError::NoData)
    }
}

fn field<'a>(doc: &'a XmlDocument, path: &[&str]) -> Option<&'a str> {
    doc.first_text(NFE_NAMESPACE, path)
}

/// Truncate to at most `len` characters without splitting a UTF-8 sequence.
fn truncate(s: &str, len: usize) -> &str {
    match s.char_indices().nth(len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Reformat an ISO-like date string to `dd/mm/yyyy`.
///
/// Accepts a bare date, an RFC 3339 timestamp or a timestamp without
/// offset. Anything else yields `None`.
pub fn format_date(s: impl AsRef<str>) -> Option<String> {
    let s = s.as_ref().trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })?;
    Some(date.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    const FULL_NFE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe" versao="4.00">
  <NFe>
    <infNFe>
      <ide>
        <nNF>452</nNF>
        <dhEmi>2023-07-01T00:00:00-03:00</dhEmi>
      </ide>
      <emit><xNome>Fornecedor XYZ</xNome></emit>
      <dest><xNome>ACME LTDA</xNome></dest>
      <total><ICMSTot><vNF>1234.50</vNF></ICMSTot></total>
      <cobr><dup><dVenc>2023-08-01</dVenc></dup></cobr>
    </infNFe>
  </NFe>
  <protNFe><infProt><cStat>100</cStat></infProt></protNFe>
</nfeProc>"#;

    #[test]
    fn test_extract_full_document() {
        let record = extract(FULL_NFE).unwrap();
        assert_eq!(record.recipient.as_deref(), Some("ACME LTDA"));
        assert_eq!(record.issue_date.as_deref(), Some("01/07/2023"));
        assert_eq!(record.number, Some(452));
        assert_eq!(record.total, Some(Decimal::new(123450, 2)));
        assert_eq!(record.due_date.as_deref(), Some("01/08/2023"));
        assert_eq!(record.issuer.as_deref(), Some("Fornecedor XYZ"));
        assert!(!record.cancelled);
    }

    #[test]
    fn test_fields_are_independent() {
        // Drop the recipient; every other field must still come through.
        let xml = FULL_NFE.replace("<dest><xNome>ACME LTDA</xNome></dest>", "");
        let record = extract(&xml).unwrap();
        assert_eq!(record.recipient, None);
        assert_eq!(record.number, Some(452));
        assert_eq!(record.issuer.as_deref(), Some("Fornecedor XYZ"));
    }

    #[test]
    fn test_malformed_field_content_empties_that_field_only() {
        let xml = FULL_NFE
            .replace("<nNF>452</nNF>", "<nNF>quatro</nNF>")
            .replace("<dhEmi>2023-07-01T00:00:00-03:00</dhEmi>", "<dhEmi>sem data</dhEmi>");
        let record = extract(&xml).unwrap();
        assert_eq!(record.number, None);
        assert_eq!(record.issue_date, None);
        assert_eq!(record.total, Some(Decimal::new(123450, 2)));
    }

    #[test]
    fn test_cancelled_status_code() {
        let xml = FULL_NFE.replace("<cStat>100</cStat>", "<cStat>101</cStat>");
        let record = extract(&xml).unwrap();
        assert!(record.cancelled);
        assert_eq!(record.cancelled_label(), "Sim");
    }

    #[test]
    fn test_missing_status_defaults_to_not_cancelled() {
        let xml = FULL_NFE.replace("<protNFe><infProt><cStat>100</cStat></infProt></protNFe>", "");
        let record = extract(&xml).unwrap();
        assert!(!record.cancelled);
    }

    #[test]
    fn test_no_primary_fields_is_no_data() {
        let xml = r#"<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe">
            <protNFe><infProt><cStat>101</cStat></infProt></protNFe>
        </nfeProc>"#;
        assert!(matches!(extract(xml), Err(ExtractionError::NoData)));
    }

    #[test]
    fn test_wrong_namespace_is_no_data() {
        let xml = r#"<nfeProc xmlns="http://example.com/other">
            <NFe><infNFe><ide><nNF>452</nNF></ide></infNFe></NFe>
        </nfeProc>"#;
        assert!(matches!(extract(xml), Err(ExtractionError::NoData)));
    }

    #[test]
    fn test_plain_text_is_malformed() {
        assert!(matches!(
            extract("definitely not an invoice"),
            Err(ExtractionError::Malformed(_))
        ));
    }

    #[test]
    fn test_format_date_bare() {
        assert_eq!(format_date("2024-03-15").as_deref(), Some("15/03/2024"));
    }

    #[test]
    fn test_format_date_truncated_timestamp() {
        let raw = "2024-03-15T10:00:00";
        assert_eq!(format_date(truncate(raw, 10)).as_deref(), Some("15/03/2024"));
    }

    #[test]
    fn test_format_date_with_offset() {
        assert_eq!(
            format_date("2023-07-01T00:00:00-03:00").as_deref(),
            Some("01/07/2023")
        );
    }

    #[test]
    fn test_format_date_garbage() {
        assert_eq!(format_date("amanhã"), None);
        assert_eq!(format_date("2024-13-40"), None);
        assert_eq!(format_date(""), None);
    }
}
