//! Document model adapter
//!
//! The engine never touches a concrete document type directly. Everything it reads
//! or changes goes through [`SheetDocument`], which is implemented here for the
//! in-memory [`Workbook`] and can be implemented by any host that owns a real
//! spreadsheet.

use printfit_core::{CellRange, PageSetup, SheetFormatting, Workbook, Worksheet};

use crate::error::{ModelError, ModelResult};

/// What the engine needs to know about one cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellView {
    /// Display text of the value (empty for empty cells)
    pub text: String,
    /// Font is bold
    pub bold: bool,
    /// Text wraps
    pub wrapped: bool,
}

impl CellView {
    /// Length of the display text, in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the cell shows any text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Read/write access to the sheets of a document
///
/// Sheets are addressed by name. Rows and columns are 0-based.
pub trait SheetDocument {
    /// Names of all sheets, in document order
    fn sheet_names(&self) -> Vec<String>;

    /// Bounding rectangle of the populated cells, `None` for an empty sheet
    fn used_range(&self, sheet: &str) -> ModelResult<Option<CellRange>>;

    /// Read one cell
    fn cell(&self, sheet: &str, row: u32, col: u16) -> ModelResult<CellView>;

    /// Merged regions of the sheet
    fn merged_regions(&self, sheet: &str) -> ModelResult<Vec<CellRange>>;

    /// Turn wrapping on or off for one cell
    fn set_wrap(&mut self, sheet: &str, row: u32, col: u16, wrap: bool) -> ModelResult<()>;

    /// Size a row to its content, returning the new height in points
    fn autofit_row(&mut self, sheet: &str, row: u32) -> ModelResult<f64>;

    fn row_height(&self, sheet: &str, row: u32) -> ModelResult<f64>;

    fn set_row_height(&mut self, sheet: &str, row: u32, height: f64) -> ModelResult<()>;

    /// Size a column to its content, returning the new width in characters
    fn autofit_column(&mut self, sheet: &str, col: u16) -> ModelResult<f64>;

    fn column_width(&self, sheet: &str, col: u16) -> ModelResult<f64>;

    fn set_column_width(&mut self, sheet: &str, col: u16, width: f64) -> ModelResult<()>;

    fn page_setup(&self, sheet: &str) -> ModelResult<PageSetup>;

    fn set_page_setup(&mut self, sheet: &str, setup: PageSetup) -> ModelResult<()>;

    /// Row heights, column widths and wrap flags, as a restorable value
    fn formatting(&self, sheet: &str) -> ModelResult<SheetFormatting>;

    fn set_formatting(&mut self, sheet: &str, formatting: &SheetFormatting) -> ModelResult<()>;

    /// Whether a sheet with this name exists
    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet_names().iter().any(|name| name == sheet)
    }
}

fn sheet<'a>(workbook: &'a Workbook, name: &str) -> ModelResult<&'a Worksheet> {
    workbook
        .worksheet_by_name(name)
        .ok_or_else(|| ModelError::SheetNotFound(name.to_string()))
}

fn sheet_mut<'a>(workbook: &'a mut Workbook, name: &str) -> ModelResult<&'a mut Worksheet> {
    workbook
        .worksheet_by_name_mut(name)
        .ok_or_else(|| ModelError::SheetNotFound(name.to_string()))
}

impl SheetDocument for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        Workbook::sheet_names(self)
    }

    fn used_range(&self, name: &str) -> ModelResult<Option<CellRange>> {
        Ok(sheet(self, name)?.used_range())
    }

    fn cell(&self, name: &str, row: u32, col: u16) -> ModelResult<CellView> {
        let ws = sheet(self, name)?;
        let text = match ws.cell_at(row, col) {
            Some(data) if !data.value.is_empty() => data.value.to_string(),
            _ => String::new(),
        };
        Ok(CellView {
            text,
            bold: ws.is_bold_at(row, col),
            wrapped: ws.is_wrapped_at(row, col),
        })
    }

    fn merged_regions(&self, name: &str) -> ModelResult<Vec<CellRange>> {
        Ok(sheet(self, name)?.merged_regions().to_vec())
    }

    fn set_wrap(&mut self, name: &str, row: u32, col: u16, wrap: bool) -> ModelResult<()> {
        sheet_mut(self, name)?.set_wrap_at(row, col, wrap)?;
        Ok(())
    }

    fn autofit_row(&mut self, name: &str, row: u32) -> ModelResult<f64> {
        Ok(sheet_mut(self, name)?.autofit_row_height(row))
    }

    fn row_height(&self, name: &str, row: u32) -> ModelResult<f64> {
        Ok(sheet(self, name)?.row_height(row))
    }

    fn set_row_height(&mut self, name: &str, row: u32, height: f64) -> ModelResult<()> {
        sheet_mut(self, name)?.set_row_height(row, height);
        Ok(())
    }

    fn autofit_column(&mut self, name: &str, col: u16) -> ModelResult<f64> {
        Ok(sheet_mut(self, name)?.autofit_column_width(col))
    }

    fn column_width(&self, name: &str, col: u16) -> ModelResult<f64> {
        Ok(sheet(self, name)?.column_width(col))
    }

    fn set_column_width(&mut self, name: &str, col: u16, width: f64) -> ModelResult<()> {
        sheet_mut(self, name)?.set_column_width(col, width);
        Ok(())
    }

    fn page_setup(&self, name: &str) -> ModelResult<PageSetup> {
        Ok(sheet(self, name)?.page_setup().clone())
    }

    fn set_page_setup(&mut self, name: &str, setup: PageSetup) -> ModelResult<()> {
        sheet_mut(self, name)?.set_page_setup(setup);
        Ok(())
    }

    fn formatting(&self, name: &str) -> ModelResult<SheetFormatting> {
        Ok(sheet(self, name)?.formatting())
    }

    fn set_formatting(&mut self, name: &str, formatting: &SheetFormatting) -> ModelResult<()> {
        sheet_mut(self, name)?.apply_formatting(formatting)?;
        Ok(())
    }

    fn has_sheet(&self, name: &str) -> bool {
        self.worksheet_by_name(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printfit_core::Style;

    #[test]
    fn test_workbook_cell_view() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "Total").unwrap();
        ws.set_cell_style("A1", &Style::new().bold(true)).unwrap();
        ws.set_cell_value("B2", 12.0).unwrap();

        let view = wb.cell("Sheet1", 0, 0).unwrap();
        assert_eq!(view.text, "Total");
        assert!(view.bold);
        assert!(!view.wrapped);

        assert_eq!(wb.cell("Sheet1", 1, 1).unwrap().text, "12");
        assert!(wb.cell("Sheet1", 5, 5).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_sheet() {
        let wb = Workbook::new();
        assert!(matches!(
            wb.used_range("Missing"),
            Err(ModelError::SheetNotFound(name)) if name == "Missing"
        ));
        assert!(SheetDocument::has_sheet(&wb, "Sheet1"));
        assert!(!SheetDocument::has_sheet(&wb, "Missing"));
    }

    #[test]
    fn test_wrap_through_adapter() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value("C3", "text")
            .unwrap();

        wb.set_wrap("Sheet1", 2, 2, true).unwrap();
        assert!(wb.cell("Sheet1", 2, 2).unwrap().wrapped);
        assert_eq!(wb.formatting("Sheet1").unwrap().wrapped_cells.len(), 1);
    }
}
