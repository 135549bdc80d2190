//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use printfit_core::{CellValue, Style, Worksheet, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    ///
    /// Without an explicit sheet name, the worksheet is named after the file stem.
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut options = options.clone();
        if options.sheet_name.is_none() {
            options.sheet_name = path
                .file_stem()
                .map(|stem| sheet_name_from(&stem.to_string_lossy()));
        }
        Self::read(file, &options)
    }

    /// Read CSV from a reader into a worksheet
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(options.flexible)
            .from_reader(reader);

        let name = options
            .sheet_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Sheet1".to_string());
        let mut worksheet = Worksheet::new(name);
        let mut row_idx = 0usize;

        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            if !headers.is_empty() {
                let header_style = Style::new().bold(options.bold_header);
                for (col, value) in headers.iter().enumerate() {
                    let col = Self::check_position(row_idx, col)?;
                    worksheet.set_cell_value_at(row_idx as u32, col, value)?;
                    if options.bold_header && !value.is_empty() {
                        worksheet.set_cell_style_at(row_idx as u32, col, &header_style)?;
                    }
                }
                row_idx += 1;
            }
        }

        for result in csv_reader.records() {
            let record = result?;

            for (col, field) in record.iter().enumerate() {
                let col = Self::check_position(row_idx, col)?;
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                };

                worksheet.set_cell_value_at(row_idx as u32, col, value)?;
            }

            row_idx += 1;
        }

        Ok(worksheet)
    }

    fn check_position(row: usize, column: usize) -> CsvResult<u16> {
        if row >= MAX_ROWS as usize || column >= MAX_COLS as usize {
            return Err(CsvError::TooLarge { row, column });
        }
        Ok(column as u16)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        match trimmed.to_lowercase().as_str() {
            "true" => return CellValue::Boolean(true),
            "false" => return CellValue::Boolean(false),
            _ => {}
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        // Keep the original text, including leading/trailing whitespace
        CellValue::string(field)
    }
}

/// Turn a file stem into a legal worksheet name
fn sheet_name_from(stem: &str) -> String {
    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    let name: String = stem
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if name.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        name
    }
}
