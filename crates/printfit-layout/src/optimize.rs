//! Layout optimizer
//!
//! Applies a [`RenderSettings`] to one sheet and changes the least formatting
//! needed for content to print without truncation. Cell values are never touched.
//!
//! Steps run in a fixed order: page setup, long-text wrapping, merged regions,
//! then column widths. Capping a column can force more wrapping, so the rows
//! affected by it are fitted again at the end.

use std::collections::BTreeSet;

use printfit_core::{PageSetup, MAX_ROW_HEIGHT};

use crate::analysis::SheetAnalysis;
use crate::error::ModelResult;
use crate::model::SheetDocument;
use crate::sampler::{StrideCells, LONG_TEXT_THRESHOLD};
use crate::settings::RenderSettings;

/// Widest a column may be auto-fitted to, in characters
pub const MAX_FITTED_COLUMN_WIDTH: f64 = 75.0;

/// Narrowest a column is left after fitting, in characters
pub const MIN_FITTED_COLUMN_WIDTH: f64 = 8.43;

/// Footer stamped on every page: print date and time left, page number right
pub const PAGE_FOOTER: &str = "&L&D &T&RPage &P";

/// What the optimizer changed on one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSummary {
    /// Long-text cells that were set to wrap
    pub wrapped_long_cells: usize,
    /// Merged regions whose anchor was set to wrap
    pub merged_regions: usize,
    /// Rows whose height was fitted
    pub rows_fitted: usize,
    /// Rows that hit the height limit
    pub rows_capped: usize,
    /// Columns whose width was fitted
    pub columns_fitted: usize,
    /// Columns that hit the width limit and now wrap
    pub columns_capped: usize,
    /// Columns raised to the minimum width
    pub columns_widened: usize,
}

/// Page setup that `settings` asks for on a sheet
///
/// Starts from the sheet's current setup so fields the settings do not cover
/// (header/footer margins, headings) stay as they were.
pub fn page_setup_for(
    current: &PageSetup,
    sheet_name: &str,
    settings: &RenderSettings,
    analysis: &SheetAnalysis,
) -> PageSetup {
    let mut setup = current.clone();
    setup.orientation = settings
        .orientation
        .resolve(analysis.recommended_orientation);
    setup.paper_size = settings.paper_size;
    setup.left_margin = settings.margins.left;
    setup.right_margin = settings.margins.right;
    setup.top_margin = settings.margins.top;
    setup.bottom_margin = settings.margins.bottom;
    setup.scale = settings.scale_percent;
    if settings.fit_to_width {
        setup.fit_to_width = Some(1);
        setup.fit_to_height = Some(0);
    } else {
        setup.fit_to_width = None;
        setup.fit_to_height = None;
    }
    setup.print_gridlines = settings.print_gridlines;
    if settings.include_headers_footers {
        setup.header = format!("&C{}", sheet_name.replace('&', "&&"));
        setup.footer = PAGE_FOOTER.to_string();
    } else {
        setup.header.clear();
        setup.footer.clear();
    }
    setup
}

/// Apply `settings` to one sheet
pub fn optimize<D: SheetDocument + ?Sized>(
    document: &mut D,
    sheet: &str,
    settings: &RenderSettings,
    analysis: &SheetAnalysis,
) -> ModelResult<LayoutSummary> {
    let mut summary = LayoutSummary::default();

    let current = document.page_setup(sheet)?;
    document.set_page_setup(sheet, page_setup_for(&current, sheet, settings, analysis))?;

    let Some(range) = document.used_range(sheet)? else {
        tracing::debug!("'{}' is empty, page setup only", sheet);
        return Ok(summary);
    };

    if settings.wrap_long_text {
        let mut rows = BTreeSet::new();
        for addr in StrideCells::sampled(range) {
            let view = document.cell(sheet, addr.row, addr.col)?;
            if view.len() > LONG_TEXT_THRESHOLD {
                document.set_wrap(sheet, addr.row, addr.col, true)?;
                rows.insert(addr.row);
                summary.wrapped_long_cells += 1;
            }
        }
        fit_rows(document, sheet, rows, &mut summary)?;
    }

    if settings.optimize_merged_cells {
        let mut rows = BTreeSet::new();
        for region in document.merged_regions(sheet)? {
            document.set_wrap(sheet, region.start.row, region.start.col, true)?;
            rows.extend(region.start.row..=region.end.row);
            summary.merged_regions += 1;
        }
        fit_rows(document, sheet, rows, &mut summary)?;
    }

    // Rows with wrapped text in a resized column were fitted at the old width
    let mut refit_rows = BTreeSet::new();
    for col in range.start.col..=range.end.col {
        let before = document.column_width(sheet, col)?;
        let fitted = document.autofit_column(sheet, col)?;
        summary.columns_fitted += 1;

        let capped = fitted > MAX_FITTED_COLUMN_WIDTH;
        let width = if capped {
            summary.columns_capped += 1;
            MAX_FITTED_COLUMN_WIDTH
        } else if fitted < MIN_FITTED_COLUMN_WIDTH {
            summary.columns_widened += 1;
            MIN_FITTED_COLUMN_WIDTH
        } else {
            fitted
        };
        if width != fitted {
            document.set_column_width(sheet, col, width)?;
        }
        if !capped && width == before {
            continue;
        }

        for row in range.start.row..=range.end.row {
            let view = document.cell(sheet, row, col)?;
            if view.is_empty() {
                continue;
            }
            if capped && !view.wrapped {
                document.set_wrap(sheet, row, col, true)?;
                refit_rows.insert(row);
            } else if view.wrapped {
                refit_rows.insert(row);
            }
        }
    }
    fit_rows(document, sheet, refit_rows, &mut summary)?;

    tracing::debug!("Optimized '{}': {:?}", sheet, summary);
    Ok(summary)
}

/// Fit each row's height, holding it to the format's limit
fn fit_rows<D: SheetDocument + ?Sized>(
    document: &mut D,
    sheet: &str,
    rows: BTreeSet<u32>,
    summary: &mut LayoutSummary,
) -> ModelResult<()> {
    for row in rows {
        let height = document.autofit_row(sheet, row)?;
        summary.rows_fitted += 1;
        if height > MAX_ROW_HEIGHT {
            document.set_row_height(sheet, row, MAX_ROW_HEIGHT)?;
            summary.rows_capped += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::settings::OrientationChoice;
    use pretty_assertions::assert_eq;
    use printfit_core::autofit::text_height;
    use printfit_core::{CellRange, FontStyle, PageOrientation, Workbook, DEFAULT_ROW_HEIGHT};

    fn optimize_sheet(wb: &mut Workbook, settings: &RenderSettings) -> LayoutSummary {
        let analysis = analyze(&*wb, "Sheet1").unwrap();
        optimize(wb, "Sheet1", settings, &analysis).unwrap()
    }

    #[test]
    fn test_page_setup_from_settings() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value("A1", "x")
            .unwrap();

        let settings = RenderSettings::new()
            .with_orientation(OrientationChoice::Landscape)
            .with_gridlines(true);
        optimize_sheet(&mut wb, &settings);

        let setup = wb.worksheet(0).unwrap().page_setup();
        assert_eq!(setup.orientation, PageOrientation::Landscape);
        assert_eq!(setup.fit_to_width, Some(1));
        assert_eq!(setup.fit_to_height, Some(0));
        assert_eq!(setup.left_margin, 0.5);
        assert_eq!(setup.top_margin, 0.75);
        assert!(setup.print_gridlines);
        assert_eq!(setup.header, "&CSheet1");
        assert_eq!(setup.footer, PAGE_FOOTER);
    }

    #[test]
    fn test_fixed_scale_without_headers() {
        let current = PageSetup {
            header: "old".into(),
            fit_to_width: Some(2),
            ..PageSetup::default()
        };
        let settings = RenderSettings::new()
            .with_scale(70)
            .with_headers_footers(false);
        let setup = page_setup_for(
            &current,
            "R&D",
            &settings,
            &SheetAnalysis::degraded("R&D"),
        );

        assert_eq!(setup.scale, 70);
        assert_eq!(setup.fit_to_width, None);
        assert_eq!(setup.header, "");
        assert_eq!(setup.footer, "");
        assert_eq!(setup.orientation, PageOrientation::Portrait);

        let with_header = page_setup_for(
            &current,
            "R&D",
            &RenderSettings::new(),
            &SheetAnalysis::degraded("R&D"),
        );
        assert_eq!(with_header.header, "&CR&&D");
    }

    #[test]
    fn test_long_text_wrapped_and_capped() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value_at(0, 0, "Notes").unwrap();
        ws.set_cell_value_at(1, 0, "n".repeat(20_000)).unwrap();
        ws.set_cell_value_at(2, 0, "short").unwrap();

        let summary = optimize_sheet(&mut wb, &RenderSettings::new());
        let ws = wb.worksheet(0).unwrap();

        assert_eq!(summary.wrapped_long_cells, 1);
        assert!(ws.is_wrapped_at(1, 0));
        assert!(!ws.is_wrapped_at(2, 0));
        assert_eq!(ws.row_height(1), MAX_ROW_HEIGHT);
        assert_eq!(ws.column_width(0), MAX_FITTED_COLUMN_WIDTH);
        assert_eq!(summary.columns_capped, 1);
        // Capping the column wraps the rest of its text too
        assert!(ws.is_wrapped_at(0, 0));
        assert!(ws.is_wrapped_at(2, 0));
        assert_eq!(ws.row_height(2), DEFAULT_ROW_HEIGHT);
        // Values are untouched
        assert_eq!(ws.get_value_at(2, 0).as_string(), Some("short"));
    }

    #[test]
    fn test_long_text_row_refitted_at_capped_width() {
        let text = "n".repeat(600);
        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value_at(0, 0, text.as_str())
            .unwrap();

        let summary = optimize_sheet(&mut wb, &RenderSettings::new());
        let ws = wb.worksheet(0).unwrap();

        assert_eq!(summary.columns_capped, 1);
        assert_eq!(ws.column_width(0), MAX_FITTED_COLUMN_WIDTH);
        let needed = text_height(&text, &FontStyle::default(), MAX_FITTED_COLUMN_WIDTH, true);
        assert_eq!(needed, 120.0);
        assert_eq!(ws.row_height(0), needed);
        assert_eq!(summary.rows_capped, 1);
    }

    #[test]
    fn test_wrapped_row_refitted_when_column_widens() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value_at(0, 0, "word ".repeat(8)).unwrap();
        ws.set_wrap_at(0, 0, true).unwrap();
        ws.set_column_width(0, 10.0);
        ws.set_row_height(0, 60.0);

        optimize_sheet(&mut wb, &RenderSettings::new());
        let ws = wb.worksheet(0).unwrap();

        assert!(ws.column_width(0) > 10.0);
        assert_eq!(ws.row_height(0), DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_wrap_disabled_leaves_cells_alone() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value_at(0, 0, "n".repeat(600)).unwrap();

        let settings = RenderSettings::new().with_wrap_long_text(false);
        let summary = optimize_sheet(&mut wb, &settings);
        assert_eq!(summary.wrapped_long_cells, 0);
        // Column capping still applies
        assert_eq!(summary.columns_capped, 1);
    }

    #[test]
    fn test_merged_regions_wrap_anchor() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "Quarterly summary").unwrap();
        ws.set_cell_value("C3", 1.0).unwrap();
        ws.merge_cells(&CellRange::parse("A1:B2").unwrap()).unwrap();

        let summary = optimize_sheet(&mut wb, &RenderSettings::new());
        assert_eq!(summary.merged_regions, 1);
        assert!(wb.worksheet(0).unwrap().is_wrapped_at(0, 0));

        let mut wb2 = Workbook::new();
        let ws = wb2.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "Quarterly summary").unwrap();
        ws.merge_cells(&CellRange::parse("A1:B2").unwrap()).unwrap();
        let settings = RenderSettings::new().with_optimize_merged_cells(false);
        let summary = optimize_sheet(&mut wb2, &settings);
        assert_eq!(summary.merged_regions, 0);
        assert!(!wb2.worksheet(0).unwrap().is_wrapped_at(0, 0));
    }

    #[test]
    fn test_narrow_columns_floored() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "a").unwrap();
        ws.set_cell_value("B1", "b").unwrap();

        let summary = optimize_sheet(&mut wb, &RenderSettings::new());
        assert_eq!(summary.columns_fitted, 2);
        assert_eq!(summary.columns_widened, 2);
        assert_eq!(wb.worksheet(0).unwrap().column_width(0), MIN_FITTED_COLUMN_WIDTH);
    }

    #[test]
    fn test_empty_sheet_gets_page_setup_only() {
        let mut wb = Workbook::new();
        let summary = optimize_sheet(&mut wb, &RenderSettings::new());
        assert_eq!(summary, LayoutSummary::default());
        assert_eq!(wb.worksheet(0).unwrap().page_setup().fit_to_width, Some(1));
    }
}
