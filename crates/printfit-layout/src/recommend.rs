//! Print recommendations from sheet metrics
//!
//! Everything here is a pure function of [`SheetMetrics`].

use printfit_core::PageOrientation;

/// Rows that fit on a portrait page of ordinary data
pub const ROWS_PER_PAGE: u32 = 45;

/// Rows per page when a sheet is dense with long text
pub const ROWS_PER_PAGE_LONG_TEXT: u32 = 30;

/// Sheets with more columns than this have wide columns
pub const WIDE_COLUMN_THRESHOLD: u32 = 15;

/// Smallest scale ever recommended, in percent
pub const MIN_RECOMMENDED_SCALE: u16 = 40;

/// Largest scale ever recommended, in percent
pub const MAX_RECOMMENDED_SCALE: u16 = 100;

/// Column-count buckets and their scale, checked in order
const SCALE_BUCKETS: [(u32, u16); 5] = [(8, 100), (12, 90), (16, 80), (20, 70), (25, 60)];

/// Scale for sheets wider than the last bucket
const WIDEST_SCALE: u16 = 50;

/// Scale reduction for sheets with many long cells
const LONG_TEXT_SCALE_PENALTY: u16 = 10;

/// Inputs of the recommendation rules
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetMetrics {
    pub row_count: u32,
    pub column_count: u32,
    pub data_density: f64,
    pub merged_region_count: usize,
    pub long_text_cell_count: u64,
    pub max_cell_length: usize,
}

/// How a sheet should be printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub rows_per_page: u32,
    pub estimated_page_count: u32,
    pub orientation: PageOrientation,
    pub has_wide_columns: bool,
    pub requires_scaling: bool,
    pub optimal_scale_percent: u16,
}

impl SheetMetrics {
    /// Long-text cells relative to the row count
    fn long_text_exceeds(&self, ratio: f64) -> bool {
        self.long_text_cell_count as f64 > ratio * self.row_count as f64
    }
}

/// Derive the print recommendation for a sheet
pub fn recommend(metrics: &SheetMetrics) -> Recommendation {
    let rows_per_page = if metrics.long_text_exceeds(0.3) {
        ROWS_PER_PAGE_LONG_TEXT
    } else {
        ROWS_PER_PAGE
    };
    let pages =
        (u64::from(metrics.row_count) + u64::from(rows_per_page) - 1) / u64::from(rows_per_page);
    let estimated_page_count = (pages as u32).max(1);

    let orientation = if metrics.column_count > 12
        || (metrics.column_count > 8 && metrics.long_text_cell_count > 0)
    {
        PageOrientation::Landscape
    } else {
        PageOrientation::Portrait
    };

    let has_wide_columns = metrics.column_count > WIDE_COLUMN_THRESHOLD;
    let requires_scaling = metrics.column_count > 12 || has_wide_columns;

    Recommendation {
        rows_per_page,
        estimated_page_count,
        orientation,
        has_wide_columns,
        requires_scaling,
        optimal_scale_percent: optimal_scale(metrics),
    }
}

/// Scale from the column-count bucket, reduced for long-text-heavy sheets
///
/// The floor is applied after every step.
pub fn optimal_scale(metrics: &SheetMetrics) -> u16 {
    let bucket = SCALE_BUCKETS
        .iter()
        .find(|(max_columns, _)| metrics.column_count <= *max_columns)
        .map(|(_, scale)| *scale)
        .unwrap_or(WIDEST_SCALE);
    let mut scale = bucket.clamp(MIN_RECOMMENDED_SCALE, MAX_RECOMMENDED_SCALE);

    if metrics.long_text_exceeds(0.2) {
        scale = scale
            .saturating_sub(LONG_TEXT_SCALE_PENALTY)
            .max(MIN_RECOMMENDED_SCALE);
    }
    scale
}
