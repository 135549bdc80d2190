//! Worksheet type

use std::collections::{BTreeMap, BTreeSet};

use crate::autofit;
use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::page_setup::PageSetup;
use crate::style::Style;
use crate::{MAX_COLS, MAX_COLUMN_WIDTH, MAX_ROWS, MAX_ROW_HEIGHT};

/// A worksheet (single sheet in a workbook)
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
    /// Print settings
    page_setup: PageSetup,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            page_setup: PageSetup::default(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get cell value (convenience method)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Get the style applied to a cell (the default style for untouched cells)
    pub fn cell_style_at(&self, row: u32, col: u16) -> &Style {
        let idx = self.cells.get(row, col).map(|c| c.style_index).unwrap_or(0);
        self.cells
            .style_pool()
            .get(idx)
            .unwrap_or_else(|| self.cells.style_pool().default_style())
    }

    /// Check whether a cell's font is bold
    pub fn is_bold_at(&self, row: u32, col: u16) -> bool {
        self.cell_style_at(row, col).font.bold
    }

    /// Check whether a cell wraps its text
    pub fn is_wrapped_at(&self, row: u32, col: u16) -> bool {
        self.cell_style_at(row, col).is_wrapped()
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell style by address string
    pub fn set_cell_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Set a cell style by row and column indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    /// Turn text wrapping on or off for one cell, keeping the rest of its style
    pub fn set_wrap_at(&mut self, row: u32, col: u16, wrap: bool) -> Result<()> {
        if self.is_wrapped_at(row, col) == wrap {
            return Ok(());
        }
        let style = self.cell_style_at(row, col).clone().wrap_text(wrap);
        self.set_cell_style_at(row, col, &style)
    }

    // === Range Operations ===

    /// Get the used range (bounds of all stored cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    // === Row/Column Dimensions ===

    /// Get row height
    pub fn row_height(&self, row: u32) -> f64 {
        self.cells.row_height(row)
    }

    /// Set row height, clamped to what the format can store
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.cells.set_row_height(row, height.clamp(0.0, MAX_ROW_HEIGHT));
    }

    /// Get column width
    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    /// Set column width, clamped to what the format can store
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells
            .set_column_width(col, width.clamp(0.0, MAX_COLUMN_WIDTH));
    }

    /// Get all custom row heights (row index → height in points).
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        self.cells.custom_row_heights()
    }

    /// Get all custom column widths (column index → width in characters).
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.custom_column_widths()
    }

    /// Size a row to its content and return the new height
    ///
    /// A cell anchoring a merged region is measured against the region's combined
    /// width and shares its height across the region's rows; other cells covered by
    /// a merge are ignored.
    pub fn autofit_row_height(&mut self, row: u32) -> f64 {
        let mut height = self.cells.default_row_height();

        for (col, data) in self.cells.iter_row(row) {
            if data.value.is_empty() {
                continue;
            }
            let (width, rows_spanned) = match self.cells.merged_region_at(row, col) {
                Some(region) if region.start != CellAddress::new(row, col) => continue,
                Some(region) => (
                    (region.start.col..=region.end.col)
                        .map(|c| self.cells.column_width(c))
                        .sum::<f64>(),
                    region.row_count() as f64,
                ),
                None => (self.cells.column_width(col), 1.0),
            };
            let style = self
                .cells
                .style_pool()
                .get(data.style_index)
                .unwrap_or_else(|| self.cells.style_pool().default_style());
            let needed = autofit::text_height(
                &data.value.to_string(),
                &style.font,
                width,
                style.is_wrapped(),
            ) / rows_spanned;
            height = height.max(needed);
        }

        let height = height.min(MAX_ROW_HEIGHT);
        self.cells.set_row_height(row, height);
        height
    }

    /// Size a column to its widest content and return the new width
    ///
    /// Cells inside merges spanning several columns do not count. A column with no
    /// content falls back to the default width.
    pub fn autofit_column_width(&mut self, col: u16) -> f64 {
        let mut width: f64 = 0.0;

        for (row, data) in self.cells.iter_column(col) {
            if data.value.is_empty() {
                continue;
            }
            if let Some(region) = self.cells.merged_region_at(row, col) {
                if region.col_count() > 1 {
                    continue;
                }
            }
            let style = self
                .cells
                .style_pool()
                .get(data.style_index)
                .unwrap_or_else(|| self.cells.style_pool().default_style());
            width = width.max(autofit::text_width(&data.value.to_string(), &style.font));
        }

        let width = if width > 0.0 {
            width.min(MAX_COLUMN_WIDTH)
        } else {
            self.cells.default_column_width()
        };
        self.cells.set_column_width(col, width);
        width
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if self
            .cells
            .merged_regions()
            .iter()
            .any(|existing| range.overlaps(existing))
        {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }

    /// Unmerge cells
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        match self
            .cells
            .merged_regions()
            .iter()
            .position(|existing| existing == range)
        {
            Some(i) => self.cells.remove_merged_region(i).is_some(),
            None => false,
        }
    }

    // === Print Settings ===

    /// Get the page setup
    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    /// Get the page setup mutably
    pub fn page_setup_mut(&mut self) -> &mut PageSetup {
        &mut self.page_setup
    }

    /// Replace the page setup
    pub fn set_page_setup(&mut self, page_setup: PageSetup) {
        self.page_setup = page_setup;
    }

    /// Capture the row/column dimensions and wrap flags of this sheet
    pub fn formatting(&self) -> SheetFormatting {
        SheetFormatting {
            row_heights: self.cells.custom_row_heights().clone(),
            column_widths: self.cells.custom_column_widths().clone(),
            wrapped_cells: self
                .cells
                .iter()
                .filter(|(row, col, _)| self.is_wrapped_at(*row, *col))
                .map(|(row, col, _)| CellAddress::new(row, col))
                .collect(),
        }
    }

    /// Reapply formatting captured by [`Worksheet::formatting`]
    ///
    /// Wrap flags are reset on every cell that is not in the captured set, so cells
    /// that only gained a style through wrapping disappear again.
    pub fn apply_formatting(&mut self, formatting: &SheetFormatting) -> Result<()> {
        self.cells
            .replace_row_heights(formatting.row_heights.clone());
        self.cells
            .replace_column_widths(formatting.column_widths.clone());

        let currently_wrapped: Vec<CellAddress> = self
            .cells
            .iter()
            .filter(|(row, col, _)| self.is_wrapped_at(*row, *col))
            .map(|(row, col, _)| CellAddress::new(row, col))
            .collect();
        for addr in currently_wrapped {
            if !formatting.wrapped_cells.contains(&addr) {
                self.set_wrap_at(addr.row, addr.col, false)?;
            }
        }
        for addr in &formatting.wrapped_cells {
            self.set_wrap_at(addr.row, addr.col, true)?;
        }
        Ok(())
    }

    // === Internal ===

    /// Validate cell position
    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Row heights, column widths and wrap flags of a sheet
///
/// Everything the layout engine may change outside the page setup.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetFormatting {
    /// Custom row heights (rows at the default height are absent)
    pub row_heights: BTreeMap<u32, f64>,
    /// Custom column widths (columns at the default width are absent)
    pub column_widths: BTreeMap<u16, f64>,
    /// Cells whose style wraps text
    pub wrapped_cells: BTreeSet<CellAddress>,
}
