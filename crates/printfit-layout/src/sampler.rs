//! Bounded sampling of a sheet's used range
//!
//! Small sheets are scanned cell by cell. Above [`SAMPLING_THRESHOLD`] cells only
//! every `k`-th cell of the row-major flattening is read, with `k` chosen so that
//! roughly [`SAMPLE_TARGET`] cells are inspected no matter how large the sheet is.

use printfit_core::{CellAddress, CellRange};

use crate::error::ModelResult;
use crate::model::SheetDocument;

/// Sheets with more cells than this are sampled instead of fully scanned
pub const SAMPLING_THRESHOLD: u64 = 10_000;

/// Approximate number of cells inspected on a sampled sheet
pub const SAMPLE_TARGET: u64 = 5_000;

/// Cells with more characters than this count as long text
pub const LONG_TEXT_THRESHOLD: usize = 500;

/// Stride between inspected cells for a region of `total_cells` cells
pub fn sample_interval(total_cells: u64) -> u64 {
    if total_cells > SAMPLING_THRESHOLD {
        (total_cells / SAMPLE_TARGET).max(1)
    } else {
        1
    }
}

/// Iterator over every `stride`-th cell of a range, in row-major order
///
/// Yields the cells at flattened indices `0, stride, 2 * stride, ...`.
#[derive(Debug, Clone)]
pub struct StrideCells {
    range: CellRange,
    width: u64,
    total: u64,
    stride: u64,
    next: u64,
}

impl StrideCells {
    /// Create an iterator with an explicit stride (0 is treated as 1)
    pub fn new(range: CellRange, stride: u64) -> Self {
        Self {
            range,
            width: range.col_count() as u64,
            total: range.cell_count(),
            stride: stride.max(1),
            next: 0,
        }
    }

    /// Create an iterator using the sampling interval for the range's size
    pub fn sampled(range: CellRange) -> Self {
        Self::new(range, sample_interval(range.cell_count()))
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }
}

impl Iterator for StrideCells {
    type Item = CellAddress;

    fn next(&mut self) -> Option<CellAddress> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += self.stride;
        Some(CellAddress::new(
            self.range.start.row + (index / self.width) as u32,
            self.range.start.col + (index % self.width) as u16,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next >= self.total {
            0
        } else {
            ((self.total - self.next - 1) / self.stride + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StrideCells {}

/// Raw counts collected from one sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStats {
    /// Used range of the sheet, `None` when empty
    pub used_range: Option<CellRange>,
    /// Inspected cells with any text
    pub filled_cells: u64,
    /// Cells actually read
    pub inspected_cells: u64,
    /// Stride used (1 for a full scan)
    pub sample_interval: u64,
    /// Merged regions overlapping the used range (never sampled)
    pub merged_region_count: usize,
    /// Inspected cells longer than [`LONG_TEXT_THRESHOLD`]
    pub long_text_cell_count: u64,
    /// Longest inspected cell, in characters
    pub max_cell_length: usize,
    /// Rows of the used range without a filled cell (full scans only)
    pub empty_rows: Option<u32>,
    /// Columns of the used range without a filled cell (full scans only)
    pub empty_columns: Option<u32>,
}

impl SampleStats {
    /// Whether every cell of the used range was read
    pub fn is_exhaustive(&self) -> bool {
        self.sample_interval <= 1
    }

    /// Filled share of the inspected cells
    pub fn density(&self) -> f64 {
        if self.inspected_cells == 0 {
            0.0
        } else {
            self.filled_cells as f64 / self.inspected_cells as f64
        }
    }
}

/// Collect [`SampleStats`] for one sheet
pub fn sample<D: SheetDocument + ?Sized>(document: &D, sheet: &str) -> ModelResult<SampleStats> {
    let Some(range) = document.used_range(sheet)? else {
        return Ok(SampleStats {
            sample_interval: 1,
            ..SampleStats::default()
        });
    };

    let merged_region_count = document
        .merged_regions(sheet)?
        .iter()
        .filter(|region| region.overlaps(&range))
        .count();

    let cells = StrideCells::sampled(range);
    let exhaustive = cells.stride() == 1;
    let mut stats = SampleStats {
        used_range: Some(range),
        sample_interval: cells.stride(),
        merged_region_count,
        ..SampleStats::default()
    };

    // Only tracked on full scans, where the region is at most SAMPLING_THRESHOLD cells
    let (mut filled_rows, mut filled_cols) = if exhaustive {
        (
            vec![false; range.row_count() as usize],
            vec![false; range.col_count() as usize],
        )
    } else {
        (Vec::new(), Vec::new())
    };

    for addr in cells {
        let view = document.cell(sheet, addr.row, addr.col)?;
        stats.inspected_cells += 1;

        let len = view.len();
        if len == 0 {
            continue;
        }
        stats.filled_cells += 1;
        stats.max_cell_length = stats.max_cell_length.max(len);
        if len > LONG_TEXT_THRESHOLD {
            stats.long_text_cell_count += 1;
        }
        if exhaustive {
            filled_rows[(addr.row - range.start.row) as usize] = true;
            filled_cols[(addr.col - range.start.col) as usize] = true;
        }
    }

    if exhaustive {
        stats.empty_rows = Some(filled_rows.iter().filter(|filled| !**filled).count() as u32);
        stats.empty_columns = Some(filled_cols.iter().filter(|filled| !**filled).count() as u32);
    }

    tracing::debug!(
        "Sampled '{}': {} of {} cells (interval {}), {} filled, {} long",
        sheet,
        stats.inspected_cells,
        range.cell_count(),
        stats.sample_interval,
        stats.filled_cells,
        stats.long_text_cell_count
    );

    Ok(stats)
}
