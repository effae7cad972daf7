use std::{
    fs,
    path::PathBuf,
};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::core::utils::ensure_dir;
use crate::domain::{Summary, Transaction};
use crate::errors::ExportError;
use crate::locale::Locale;
use crate::storage::json_backend::{tmp_path, write_atomic};

use super::{Cell, ExportDocument, Sheet};

const AMOUNT_FORMAT: &str = "#,##0.00";

/// Writes export documents as `.xlsx` workbooks into a directory.
#[derive(Debug, Clone)]
pub struct WorkbookExporter {
    output_dir: PathBuf,
    locale: Locale,
}

impl WorkbookExporter {
    pub fn new(output_dir: PathBuf, locale: Locale) -> Self {
        Self { output_dir, locale }
    }

    /// `<stem>-YYYY-MM-DD.xlsx` for the given day.
    pub fn file_name(&self, today: NaiveDate) -> String {
        format!(
            "{}-{}.xlsx",
            self.locale.catalog().export_stem,
            today.format("%Y-%m-%d")
        )
    }

    /// Renders and writes the workbook, returning its path.
    ///
    /// The workbook is assembled in memory and moved into place only once fully written,
    /// so a failure never leaves a file at the target path.
    pub fn export<'a, I>(
        &self,
        transactions: I,
        summary: &Summary,
        period_label: &str,
        today: NaiveDate,
    ) -> Result<PathBuf, ExportError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let document = ExportDocument::build(transactions, summary, period_label, &self.locale);
        let bytes = render(&document)?;

        ensure_dir(&self.output_dir)?;
        let path = self.output_dir.join(self.file_name(today));
        let tmp = tmp_path(&path);
        if let Err(err) = write_atomic(&tmp, &bytes).and_then(|_| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::info!(
            path = %path.display(),
            rows = document.detail.rows.len().saturating_sub(1),
            "exported workbook"
        );
        Ok(path)
    }
}

/// Serializes `document` into `.xlsx` bytes.
pub fn render(document: &ExportDocument) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let amount = Format::new().set_num_format(AMOUNT_FORMAT);

    for sheet in [&document.detail, &document.summary] {
        write_sheet(&mut workbook, sheet, &header, &amount)?;
    }
    workbook.save_to_buffer()
}

fn write_sheet(
    workbook: &mut Workbook,
    sheet: &Sheet,
    header: &Format,
    amount: &Format,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;
    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_num = row_idx as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            match (cell, row_idx) {
                (Cell::Text(text), 0) => {
                    worksheet.write_string_with_format(row_num, col, text, header)?;
                }
                (Cell::Text(text), _) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                (Cell::Number(value), _) => {
                    worksheet.write_number_with_format(row_num, col, *value, amount)?;
                }
                (Cell::Blank, _) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::domain::{Amount, TransactionId, TransactionKind};
    use tempfile::tempdir;

    fn sample() -> Vec<Transaction> {
        vec![Transaction {
            id: TransactionId::generate(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Paycheck".into(),
            kind: TransactionKind::Income,
            category: "Salary".into(),
            account: "Checking Account".into(),
            amount: Amount::new(1000.0).unwrap(),
        }]
    }

    #[test]
    fn file_name_embeds_date_and_locale_stem() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        let en = WorkbookExporter::new(PathBuf::from("."), Locale::en_us());
        let pt = WorkbookExporter::new(PathBuf::from("."), Locale::pt_br());
        assert_eq!(en.file_name(today), "finance-ledger-2024-05-07.xlsx");
        assert_eq!(pt.file_name(today), "gestao-financeira-2024-05-07.xlsx");
    }

    #[test]
    fn export_writes_a_zip_container_without_leftovers() {
        let dir = tempdir().unwrap();
        let exporter = WorkbookExporter::new(dir.path().join("exports"), Locale::en_us());
        let transactions = sample();
        let summary = SummaryService::compute(&transactions);
        let today = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();

        let path = exporter
            .export(&transactions, &summary, "All entries", today)
            .unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn invalid_sheet_name_fails_before_touching_disk() {
        let transactions = sample();
        let summary = SummaryService::compute(&transactions);
        let mut document =
            ExportDocument::build(&transactions, &summary, "All entries", &Locale::en_us());
        document.summary.name = "bad/name".into();
        assert!(render(&document).is_err());
    }
}
