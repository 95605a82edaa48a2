pub mod export;
pub mod ingest;

/// Builds an xlsx whose first sheet holds `rows`; the first row is written
/// as text, later cells that parse as numbers are written as numbers.
#[cfg(test)]
pub(crate) fn test_workbook(rows: &[&[&str]]) -> Vec<u8> {
    let mut wb = rust_xlsxwriter::Workbook::new();
    let sheet = wb.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(n) if r > 0 && n.is_finite() => sheet.write_number(r as u32, c as u16, n).unwrap(),
                _ => sheet.write_string(r as u32, c as u16, *value).unwrap(),
            };
        }
    }
    wb.save_to_buffer().unwrap()
}
