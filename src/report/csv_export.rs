use csv::WriterBuilder;

use super::{ReportBody, ReportDocument, ReportError, ReportRenderer, COLUMNS};

/// Writes the transaction table as comma-separated values with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let mut writer = WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());
        writer.write_record(COLUMNS)?;
        if let ReportBody::Table(rows) = &document.body {
            for row in rows {
                writer.write_record(row.cells())?;
            }
        }
        writer
            .into_inner()
            .map_err(|err| ReportError::Render(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Context, NewTransaction, PaymentMethod};
    use crate::report::ReportExporter;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn writes_header_and_quoted_rows() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let transactions = vec![
            NewTransaction::income(Context::Home, day, 2500.0, PaymentMethod::Cash)
                .with_description("Gift, from aunt")
                .into_transaction(Uuid::new_v4()),
        ];
        let document =
            ReportExporter::default().build_document(&transactions, Context::Home, day, &CsvRenderer);
        let bytes = CsvRenderer.render(&document).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Date,Item Name,Type,Category,Payment,Amount")
        );
        assert_eq!(
            lines.next(),
            Some("2024-04-02,\"Gift, from aunt\",INCOME,Income,Cash,\"₹2,500\"")
        );
        assert_eq!(lines.next(), None);
    }
}
