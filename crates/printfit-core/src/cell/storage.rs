//! Cell storage implementation
//!
//! Sparse row-based storage for spreadsheet cells. Only non-empty cells are kept,
//! in a `BTreeMap<row, BTreeMap<col, CellData>>` so iteration is always row-major.

use std::collections::BTreeMap;

use super::{CellAddress, CellRange, CellValue};
use crate::style::StylePool;
use crate::{DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the style pool (0 = default style)
    pub style_index: u32,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self { value, style_index }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::new(CellValue::Empty)
    }

    /// Check if this cell is effectively empty (no value and default style)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sparse storage for worksheet cells and their row/column dimensions
#[derive(Debug)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,

    /// Shared style pool for deduplication
    style_pool: StylePool,

    /// Default row height in points
    default_row_height: f64,

    /// Default column width in characters
    default_column_width: f64,

    /// Custom row heights
    row_heights: BTreeMap<u32, f64>,

    /// Custom column widths
    column_widths: BTreeMap<u16, f64>,

    /// Merged cell regions
    merged_regions: Vec<CellRange>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            row_heights: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            merged_regions: Vec::new(),
        }
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set a cell
    ///
    /// If the cell data is empty (no value, default style), the cell is removed.
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        if data.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Set just the cell value (preserving style)
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let style_index = self.get(row, col).map(|c| c.style_index).unwrap_or(0);
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Set just the cell style (preserving value)
    ///
    /// Resetting a value-less cell to the default style drops it, so formatting
    /// changes never leave phantom cells that widen the used range.
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        let value = self
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty);
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of stored cells
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }

    /// Iterate over the stored cells of a column, top to bottom
    pub fn iter_column(&self, col: u16) -> impl Iterator<Item = (u32, &CellData)> {
        self.rows
            .iter()
            .filter_map(move |(&row, cols)| cols.get(&col).map(|data| (row, data)))
    }

    /// Get default row height
    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    /// Get row height (returns default if not customized)
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    /// Set custom row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        if (height - self.default_row_height).abs() < 0.001 {
            self.row_heights.remove(&row);
        } else {
            self.row_heights.insert(row, height);
        }
    }

    /// Get default column width
    pub fn default_column_width(&self) -> f64 {
        self.default_column_width
    }

    /// Get column width (returns default if not customized)
    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    /// Set custom column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        if (width - self.default_column_width).abs() < 0.001 {
            self.column_widths.remove(&col);
        } else {
            self.column_widths.insert(col, width);
        }
    }

    /// Get all custom row heights (row index → height in points)
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Replace all custom row heights
    pub fn replace_row_heights(&mut self, heights: BTreeMap<u32, f64>) {
        self.row_heights = heights;
    }

    /// Get all custom column widths (column index → width in characters)
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    /// Replace all custom column widths
    pub fn replace_column_widths(&mut self, widths: BTreeMap<u16, f64>) {
        self.column_widths = widths;
    }

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Add a merged region
    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    /// Remove a merged region
    pub fn remove_merged_region(&mut self, index: usize) -> Option<CellRange> {
        if index < self.merged_regions.len() {
            Some(self.merged_regions.remove(index))
        } else {
            None
        }
    }

    /// Find the merged region containing a cell
    pub fn merged_region_at(&self, row: u32, col: u16) -> Option<&CellRange> {
        let addr = CellAddress::new(row, col);
        self.merged_regions.iter().find(|r| r.contains(&addr))
    }

    /// Get the style pool
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    /// Get the style pool mutably
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}

impl Default for CellStorage {
    fn default() -> Self {
        Self::new()
    }
}
