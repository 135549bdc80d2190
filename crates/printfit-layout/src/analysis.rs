//! Per-sheet analysis

use printfit_core::PageOrientation;

use crate::error::{AnalysisError, ModelError};
use crate::header::detect_headers;
use crate::model::SheetDocument;
use crate::recommend::{recommend, Recommendation, SheetMetrics};
use crate::sampler::{sample, SampleStats};

/// Everything learned about one sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetAnalysis {
    pub sheet_name: String,
    /// Rows of the used range
    pub row_count: u32,
    /// Columns of the used range
    pub column_count: u32,
    /// Used range in A1 notation, empty for an empty sheet
    pub used_range_descriptor: String,
    /// Filled share of the inspected cells, in `[0, 1]`
    pub data_density: f64,
    pub has_headers: bool,
    pub merged_region_count: usize,
    pub long_text_cell_count: u64,
    pub max_cell_length: usize,
    pub has_wide_columns: bool,
    pub estimated_page_count: u32,
    pub recommended_orientation: PageOrientation,
    pub requires_scaling: bool,
    pub optimal_scale_percent: u16,
    /// Rows without a filled cell, only known after a full scan
    pub empty_row_count: Option<u32>,
    /// Columns without a filled cell, only known after a full scan
    pub empty_column_count: Option<u32>,
    /// Stride the sampler used (1 for a full scan)
    pub sample_interval: u64,
    pub inspected_cells: u64,
    /// The sheet could not be read and this is a zero-valued stand-in
    pub degraded: bool,
}

impl SheetAnalysis {
    /// Build an analysis from sampled counts
    pub fn from_stats(sheet_name: impl Into<String>, stats: &SampleStats, has_headers: bool) -> Self {
        let (row_count, column_count, used_range_descriptor) = match stats.used_range {
            Some(range) => (
                range.row_count(),
                u32::from(range.col_count()),
                range.to_a1_string(),
            ),
            None => (0, 0, String::new()),
        };
        let metrics = SheetMetrics {
            row_count,
            column_count,
            data_density: stats.density(),
            merged_region_count: stats.merged_region_count,
            long_text_cell_count: stats.long_text_cell_count,
            max_cell_length: stats.max_cell_length,
        };

        let mut analysis = Self::from_metrics(sheet_name, &metrics, recommend(&metrics));
        analysis.used_range_descriptor = used_range_descriptor;
        analysis.has_headers = has_headers;
        analysis.empty_row_count = stats.empty_rows;
        analysis.empty_column_count = stats.empty_columns;
        analysis.sample_interval = stats.sample_interval.max(1);
        analysis.inspected_cells = stats.inspected_cells;
        analysis
    }

    /// Zero-valued analysis for a sheet that could not be read
    pub fn degraded(sheet_name: impl Into<String>) -> Self {
        let metrics = SheetMetrics::default();
        let mut analysis = Self::from_metrics(sheet_name, &metrics, recommend(&metrics));
        analysis.degraded = true;
        analysis
    }

    fn from_metrics(
        sheet_name: impl Into<String>,
        metrics: &SheetMetrics,
        rec: Recommendation,
    ) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            row_count: metrics.row_count,
            column_count: metrics.column_count,
            used_range_descriptor: String::new(),
            data_density: metrics.data_density,
            has_headers: false,
            merged_region_count: metrics.merged_region_count,
            long_text_cell_count: metrics.long_text_cell_count,
            max_cell_length: metrics.max_cell_length,
            has_wide_columns: rec.has_wide_columns,
            estimated_page_count: rec.estimated_page_count,
            recommended_orientation: rec.orientation,
            requires_scaling: rec.requires_scaling,
            optimal_scale_percent: rec.optimal_scale_percent,
            empty_row_count: None,
            empty_column_count: None,
            sample_interval: 1,
            inspected_cells: 0,
            degraded: false,
        }
    }

    /// The inputs the recommendation was derived from
    pub fn metrics(&self) -> SheetMetrics {
        SheetMetrics {
            row_count: self.row_count,
            column_count: self.column_count,
            data_density: self.data_density,
            merged_region_count: self.merged_region_count,
            long_text_cell_count: self.long_text_cell_count,
            max_cell_length: self.max_cell_length,
        }
    }
}

/// Analyze one sheet
pub fn analyze<D: SheetDocument + ?Sized>(
    document: &D,
    sheet: &str,
) -> Result<SheetAnalysis, AnalysisError> {
    let wrap = |source: ModelError| AnalysisError {
        sheet: sheet.to_string(),
        source,
    };
    if !document.has_sheet(sheet) {
        return Err(wrap(ModelError::SheetNotFound(sheet.to_string())));
    }

    let stats = sample(document, sheet).map_err(wrap)?;
    let has_headers = match stats.used_range {
        Some(range) => detect_headers(document, sheet, &range).map_err(wrap)?,
        None => false,
    };

    let analysis = SheetAnalysis::from_stats(sheet, &stats, has_headers);
    tracing::debug!(
        "Analyzed '{}': {}x{}, {} pages, {} at {}%",
        sheet,
        analysis.row_count,
        analysis.column_count,
        analysis.estimated_page_count,
        analysis.recommended_orientation,
        analysis.optimal_scale_percent
    );
    Ok(analysis)
}

/// Analyze every sheet of a document, in document order
pub fn analyze_all<D: SheetDocument + ?Sized>(
    document: &D,
) -> Vec<Result<SheetAnalysis, AnalysisError>> {
    document
        .sheet_names()
        .iter()
        .map(|sheet| analyze(document, sheet))
        .collect()
}
