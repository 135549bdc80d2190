//! Capture and restore of a sheet's print state
//!
//! A [`PageSetupSnapshot`] holds everything the layout optimizer can change on a
//! sheet: the page setup plus row heights, column widths and wrap flags.

use std::collections::BTreeMap;

use printfit_core::{PageSetup, SheetFormatting};

use crate::error::{ModelError, ModelResult, RestoreError};
use crate::model::SheetDocument;

/// Pre-mutation print state of one sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSetupSnapshot {
    sheet: String,
    page_setup: PageSetup,
    formatting: SheetFormatting,
}

impl PageSetupSnapshot {
    /// Record the current print state of `sheet`
    pub fn capture<D: SheetDocument + ?Sized>(document: &D, sheet: &str) -> ModelResult<Self> {
        Ok(Self {
            sheet: sheet.to_string(),
            page_setup: document.page_setup(sheet)?,
            formatting: document.formatting(sheet)?,
        })
    }

    /// Build a snapshot from parts, e.g. one persisted by a host
    pub fn from_parts(
        sheet: impl Into<String>,
        page_setup: PageSetup,
        formatting: SheetFormatting,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            page_setup,
            formatting,
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }

    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    pub fn formatting(&self) -> &SheetFormatting {
        &self.formatting
    }

    /// Put the captured state back
    ///
    /// Fields are restored one by one. A malformed field is skipped, the rest are
    /// still written, and the skipped fields are reported. Restoring twice has the
    /// same effect as restoring once.
    pub fn restore<D: SheetDocument + ?Sized>(&self, document: &mut D) -> Result<(), RestoreError> {
        let model_err = |source: ModelError| RestoreError::Model {
            sheet: self.sheet.clone(),
            source,
        };

        // Skipped fields keep whatever the sheet has now
        let mut setup = document.page_setup(&self.sheet).map_err(model_err)?;
        let mut skipped = Vec::new();
        self.merge_page_setup(&mut setup, &mut skipped);
        document
            .set_page_setup(&self.sheet, setup)
            .map_err(model_err)?;

        let formatting = self.clean_formatting(&mut skipped);
        document
            .set_formatting(&self.sheet, &formatting)
            .map_err(model_err)?;

        if skipped.is_empty() {
            tracing::debug!("Restored '{}'", self.sheet);
            Ok(())
        } else {
            Err(RestoreError::MalformedFields {
                sheet: self.sheet.clone(),
                fields: skipped,
            })
        }
    }

    fn merge_page_setup(&self, target: &mut PageSetup, skipped: &mut Vec<String>) {
        let captured = &self.page_setup;

        target.orientation = captured.orientation;
        target.paper_size = captured.paper_size;

        if PageSetup::is_valid_scale(captured.scale) {
            target.scale = captured.scale;
        } else {
            skipped.push(format!("scale={}", captured.scale));
        }
        target.fit_to_width = captured.fit_to_width;
        target.fit_to_height = captured.fit_to_height;

        let margins: [(&str, f64, &mut f64); 6] = [
            ("top_margin", captured.top_margin, &mut target.top_margin),
            ("bottom_margin", captured.bottom_margin, &mut target.bottom_margin),
            ("left_margin", captured.left_margin, &mut target.left_margin),
            ("right_margin", captured.right_margin, &mut target.right_margin),
            ("header_margin", captured.header_margin, &mut target.header_margin),
            ("footer_margin", captured.footer_margin, &mut target.footer_margin),
        ];
        for (name, value, slot) in margins {
            if PageSetup::is_valid_margin(value) {
                *slot = value;
            } else {
                skipped.push(format!("{}={}", name, value));
            }
        }

        target.print_gridlines = captured.print_gridlines;
        target.print_headings = captured.print_headings;
        target.header = captured.header.clone();
        target.footer = captured.footer.clone();
    }

    /// Formatting with unusable row heights and column widths dropped
    fn clean_formatting(&self, skipped: &mut Vec<String>) -> SheetFormatting {
        fn keep_valid<K: Copy + std::fmt::Display + Ord>(
            values: &BTreeMap<K, f64>,
            label: &str,
            skipped: &mut Vec<String>,
        ) -> BTreeMap<K, f64> {
            values
                .iter()
                .filter(|(key, value)| {
                    let ok = value.is_finite() && **value >= 0.0;
                    if !ok {
                        skipped.push(format!("{}[{}]={}", label, key, value));
                    }
                    ok
                })
                .map(|(key, value)| (*key, *value))
                .collect()
        }

        SheetFormatting {
            row_heights: keep_valid(&self.formatting.row_heights, "row_height", skipped),
            column_widths: keep_valid(&self.formatting.column_widths, "column_width", skipped),
            wrapped_cells: self.formatting.wrapped_cells.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use printfit_core::{PageOrientation, PaperSize, Workbook};

    fn sample_workbook() -> Workbook {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "Title").unwrap();
        ws.set_cell_value("B2", "x".repeat(700)).unwrap();
        ws.set_wrap_at(0, 0, true).unwrap();
        ws.set_row_height(3, 22.5);
        ws.set_column_width(1, 30.0);
        let setup = ws.page_setup_mut();
        setup.orientation = PageOrientation::Landscape;
        setup.paper_size = PaperSize::A4;
        setup.header = "&CBudget".into();
        wb
    }

    fn scramble(wb: &mut Workbook) {
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_wrap_at(0, 0, false).unwrap();
        ws.set_wrap_at(1, 1, true).unwrap();
        ws.set_row_height(1, 409.5);
        ws.set_column_width(1, 75.0);
        ws.set_column_width(4, 12.0);
        let setup = ws.page_setup_mut();
        setup.orientation = PageOrientation::Portrait;
        setup.scale = 55;
        setup.fit_to_width = Some(1);
        setup.print_gridlines = true;
        setup.footer = "&RPage &P".into();
    }

    #[test]
    fn test_capture_restore_roundtrip() {
        let mut wb = sample_workbook();
        let before_setup = wb.worksheet(0).unwrap().page_setup().clone();
        let before_formatting = wb.worksheet(0).unwrap().formatting();

        let snapshot = PageSetupSnapshot::capture(&wb, "Sheet1").unwrap();
        scramble(&mut wb);
        snapshot.restore(&mut wb).unwrap();

        let ws = wb.worksheet(0).unwrap();
        assert_eq!(ws.page_setup(), &before_setup);
        assert_eq!(ws.formatting(), before_formatting);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let mut wb = sample_workbook();
        let snapshot = PageSetupSnapshot::capture(&wb, "Sheet1").unwrap();
        scramble(&mut wb);

        snapshot.restore(&mut wb).unwrap();
        let once = PageSetupSnapshot::capture(&wb, "Sheet1").unwrap();
        snapshot.restore(&mut wb).unwrap();
        let twice = PageSetupSnapshot::capture(&wb, "Sheet1").unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, snapshot);
    }

    #[test]
    fn test_malformed_fields_skipped_and_reported() {
        let mut wb = sample_workbook();
        let mut bad_setup = wb.worksheet(0).unwrap().page_setup().clone();
        bad_setup.scale = 0;
        bad_setup.left_margin = f64::NAN;
        bad_setup.print_gridlines = true;
        let mut formatting = SheetFormatting::default();
        formatting.row_heights.insert(2, -4.0);
        formatting.row_heights.insert(5, 40.0);
        let snapshot = PageSetupSnapshot::from_parts("Sheet1", bad_setup, formatting);

        let err = snapshot.restore(&mut wb).unwrap_err();
        match err {
            RestoreError::MalformedFields { sheet, fields } => {
                assert_eq!(sheet, "Sheet1");
                assert_eq!(
                    fields,
                    vec!["scale=0", "left_margin=NaN", "row_height[2]=-4"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }

        // Good fields were still written, bad ones left alone
        let ws = wb.worksheet(0).unwrap();
        assert!(ws.page_setup().print_gridlines);
        assert_eq!(ws.page_setup().scale, 100);
        assert_eq!(ws.page_setup().left_margin, 0.7);
        assert_eq!(ws.row_height(5), 40.0);
        assert_eq!(ws.row_height(2), printfit_core::DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_restore_unknown_sheet() {
        let mut wb = Workbook::new();
        let snapshot = PageSetupSnapshot::from_parts(
            "Gone",
            PageSetup::default(),
            SheetFormatting::default(),
        );
        assert!(matches!(
            snapshot.restore(&mut wb),
            Err(RestoreError::Model { .. })
        ));
    }
}
