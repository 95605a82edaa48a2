//! Excel export of computed contributions

use crate::model::result::ContributionResult;
use derive_more::{Display, Error, From};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const EXPORT_FILENAME: &str = "社保计算结果.xlsx";
pub const EXPORT_SHEET: &str = "计算结果";
pub const EXPORT_HEADERS: [&str; 4] = ["员工姓名", "年度月平均工资", "缴费基数", "公司缴纳金额"];

#[derive(Debug, Display, Error, From)]
pub enum ExportError {
    #[display(fmt = "Excel export error: {}", _0)]
    Excel(XlsxError),
}

/// Serializes `results` into an xlsx workbook, one row per result.
pub fn export_results(results: &[ContributionResult]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET)?;

    let header_format = Format::new().set_bold();
    for (col, title) in EXPORT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &result.employee_name)?;
        sheet.write_number(row, 1, result.avg_salary)?;
        sheet.write_number(row, 2, result.contribution_base)?;
        sheet.write_number(row, 3, result.company_fee)?;
    }
    sheet.set_column_width(0, 16)?;
    sheet.set_column_width(1, 18)?;
    sheet.set_column_width(2, 14)?;
    sheet.set_column_width(3, 16)?;

    Ok(workbook.save_to_buffer()?)
}
