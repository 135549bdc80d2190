//! Header row detection

use printfit_core::CellRange;

use crate::error::ModelResult;
use crate::model::SheetDocument;

/// Classify a first row from its counts
///
/// A row is a header when most of its text is bold, or when it is mostly filled.
/// A row without text is never a header.
pub fn is_header_row(bold_count: usize, text_count: usize, row_width: usize) -> bool {
    if text_count == 0 {
        return false;
    }
    bold_count as f64 > 0.5 * text_count as f64 || text_count as f64 > 0.7 * row_width as f64
}

/// Whether the first row of `range` looks like a header row
pub fn detect_headers<D: SheetDocument + ?Sized>(
    document: &D,
    sheet: &str,
    range: &CellRange,
) -> ModelResult<bool> {
    let row = range.start.row;
    let mut bold_count = 0;
    let mut text_count = 0;

    for col in range.start.col..=range.end.col {
        let view = document.cell(sheet, row, col)?;
        if view.is_empty() {
            continue;
        }
        text_count += 1;
        if view.bold {
            bold_count += 1;
        }
    }

    Ok(is_header_row(
        bold_count,
        text_count,
        range.col_count() as usize,
    ))
}
