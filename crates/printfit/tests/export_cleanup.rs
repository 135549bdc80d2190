//! Exports must leave every touched sheet exactly as it was, whatever fails

use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use printfit::prelude::*;
use printfit::{CellView, ModelError, ModelResult, PageSetupSnapshot, SheetFormatting};

/// Print state of a sheet, for before/after comparison
fn state(wb: &Workbook, sheet: &str) -> PageSetupSnapshot {
    PageSetupSnapshot::capture(wb, sheet).unwrap()
}

fn three_sheet_workbook() -> Workbook {
    let mut wb = Workbook::empty();
    for (i, name) in ["North", "South", "West"].iter().enumerate() {
        wb.add_worksheet_with_name(name).unwrap();
        let ws = wb.worksheet_mut(i).unwrap();
        for col in 0..20u16 {
            ws.set_cell_value_at(0, col, format!("Heading {}", col)).unwrap();
            for row in 1..60u32 {
                ws.set_cell_value_at(row, col, f64::from(row) * 1.5).unwrap();
            }
        }
        ws.set_cell_value("C5", "long ".repeat(150)).unwrap();
        ws.merge_cells(&CellRange::parse("A62:D63").unwrap()).unwrap();
        ws.set_cell_value("A62", "Totals for the quarter").unwrap();
        ws.set_row_height(10, 30.0);
        ws.set_column_width(2, 12.5);
        ws.page_setup_mut().print_headings = true;
    }
    wb
}

struct FailingRenderer;

impl DocumentRenderer<Workbook> for FailingRenderer {
    fn render(
        &mut self,
        _document: &Workbook,
        _sheet_names: &[String],
        _settings: &RenderSettings,
    ) -> std::result::Result<Vec<u8>, RenderError> {
        Err(RenderError::Failed("printer on fire".into()))
    }
}

struct PanickingRenderer;

impl DocumentRenderer<Workbook> for PanickingRenderer {
    fn render(
        &mut self,
        _document: &Workbook,
        _sheet_names: &[String],
        _settings: &RenderSettings,
    ) -> std::result::Result<Vec<u8>, RenderError> {
        panic!("renderer crashed");
    }
}

/// Records what each sheet looked like while it was being rendered
#[derive(Default)]
struct RecordingRenderer {
    seen: Vec<(String, PageSetup)>,
}

impl DocumentRenderer<Workbook> for RecordingRenderer {
    fn render(
        &mut self,
        document: &Workbook,
        sheet_names: &[String],
        _settings: &RenderSettings,
    ) -> std::result::Result<Vec<u8>, RenderError> {
        for name in sheet_names {
            let setup = document
                .worksheet_by_name(name)
                .ok_or_else(|| RenderError::Failed(format!("missing {}", name)))?
                .page_setup()
                .clone();
            self.seen.push((name.clone(), setup));
        }
        Ok(b"%PDF".to_vec())
    }
}

#[test]
fn test_failing_renderer_restores_all_sheets() {
    let mut wb = three_sheet_workbook();
    let before: Vec<_> = ["North", "South", "West"]
        .iter()
        .map(|name| state(&wb, name))
        .collect();

    let err = export(
        &mut wb,
        &["North", "South", "West"],
        &RenderSettings::default(),
        &mut FailingRenderer,
    )
    .unwrap_err();

    assert!(matches!(err, ExportError::Render { .. }));
    assert!(err.fully_restored());
    for snapshot in &before {
        assert_eq!(&state(&wb, snapshot.sheet_name()), snapshot);
    }
}

#[test]
fn test_panicking_renderer_restores_all_sheets() {
    let mut wb = three_sheet_workbook();
    let before = state(&wb, "South");

    let result = catch_unwind(AssertUnwindSafe(|| {
        export(
            &mut wb,
            &["South", "West"],
            &RenderSettings::default(),
            &mut PanickingRenderer,
        )
    }));

    assert!(result.is_err());
    assert_eq!(state(&wb, "South"), before);
}

#[test]
fn test_successful_export_restores_and_reports() {
    let mut wb = three_sheet_workbook();
    let before = state(&wb, "West");
    let mut renderer = RecordingRenderer::default();

    let report = export(
        &mut wb,
        &["West", "North"],
        &RenderSettings::default(),
        &mut renderer,
    )
    .unwrap();

    assert_eq!(report.bytes, b"%PDF".to_vec());
    assert!(report.warnings.is_empty());
    let names: Vec<_> = report.analyses.iter().map(|a| a.sheet_name.as_str()).collect();
    assert_eq!(names, vec!["West", "North"]);

    // The renderer saw the prepared layout
    let (name, setup) = &renderer.seen[0];
    assert_eq!(name, "West");
    assert_eq!(setup.orientation, PageOrientation::Landscape);
    assert_eq!(setup.header, "&CWest");
    assert_eq!(setup.fit_to_width, Some(1));

    let (_, layout) = &report.layouts[0];
    assert_eq!(layout.wrapped_long_cells, 1);
    assert_eq!(layout.merged_regions, 1);
    assert_eq!(layout.columns_fitted, 20);

    // ...and the sheet is back to normal
    assert_eq!(state(&wb, "West"), before);
    assert!(wb.worksheet_by_name("West").unwrap().page_setup().print_headings);
}

#[test]
fn test_untouched_sheets_are_not_captured() {
    let mut wb = three_sheet_workbook();
    wb.worksheet_mut(2).unwrap().page_setup_mut().scale = 3;

    // West holds a value restore would reject, but it is not part of the export
    let report = export(
        &mut wb,
        &["North"],
        &RenderSettings::default(),
        &mut RecordingRenderer::default(),
    );
    assert!(report.is_ok());
    assert_eq!(wb.worksheet(2).unwrap().page_setup().scale, 3);
}

/// A workbook whose host fails in configurable places
struct FlakyHost {
    inner: Workbook,
    unreadable_sheet: Option<&'static str>,
    frozen_sheet: Option<&'static str>,
}

impl FlakyHost {
    fn new(inner: Workbook) -> Self {
        Self {
            inner,
            unreadable_sheet: None,
            frozen_sheet: None,
        }
    }

    fn frozen(&self, sheet: &str) -> ModelResult<()> {
        if self.frozen_sheet == Some(sheet) {
            Err(ModelError::Other(format!("'{}' is protected", sheet)))
        } else {
            Ok(())
        }
    }
}

impl SheetDocument for FlakyHost {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn used_range(&self, sheet: &str) -> ModelResult<Option<CellRange>> {
        self.inner.used_range(sheet)
    }

    fn cell(&self, sheet: &str, row: u32, col: u16) -> ModelResult<CellView> {
        self.inner.cell(sheet, row, col)
    }

    fn merged_regions(&self, sheet: &str) -> ModelResult<Vec<CellRange>> {
        if self.unreadable_sheet == Some(sheet) {
            return Err(ModelError::Other("merge table is corrupt".into()));
        }
        self.inner.merged_regions(sheet)
    }

    fn set_wrap(
        &mut self,
        sheet: &str,
        row: u32,
        col: u16,
        wrap: bool,
    ) -> ModelResult<()> {
        self.inner.set_wrap(sheet, row, col, wrap)
    }

    fn autofit_row(&mut self, sheet: &str, row: u32) -> ModelResult<f64> {
        self.inner.autofit_row(sheet, row)
    }

    fn row_height(&self, sheet: &str, row: u32) -> ModelResult<f64> {
        self.inner.row_height(sheet, row)
    }

    fn set_row_height(
        &mut self,
        sheet: &str,
        row: u32,
        height: f64,
    ) -> ModelResult<()> {
        self.inner.set_row_height(sheet, row, height)
    }

    fn autofit_column(&mut self, sheet: &str, col: u16) -> ModelResult<f64> {
        self.frozen(sheet)?;
        self.inner.autofit_column(sheet, col)
    }

    fn column_width(&self, sheet: &str, col: u16) -> ModelResult<f64> {
        self.inner.column_width(sheet, col)
    }

    fn set_column_width(
        &mut self,
        sheet: &str,
        col: u16,
        width: f64,
    ) -> ModelResult<()> {
        self.inner.set_column_width(sheet, col, width)
    }

    fn page_setup(&self, sheet: &str) -> ModelResult<PageSetup> {
        self.inner.page_setup(sheet)
    }

    fn set_page_setup(&mut self, sheet: &str, setup: PageSetup) -> ModelResult<()> {
        self.inner.set_page_setup(sheet, setup)
    }

    fn formatting(&self, sheet: &str) -> ModelResult<SheetFormatting> {
        self.inner.formatting(sheet)
    }

    fn set_formatting(
        &mut self,
        sheet: &str,
        formatting: &SheetFormatting,
    ) -> ModelResult<()> {
        self.inner.set_formatting(sheet, formatting)
    }
}

struct NamesRenderer;

impl DocumentRenderer<FlakyHost> for NamesRenderer {
    fn render(
        &mut self,
        _document: &FlakyHost,
        sheet_names: &[String],
        _settings: &RenderSettings,
    ) -> std::result::Result<Vec<u8>, RenderError> {
        Ok(sheet_names.join(",").into_bytes())
    }
}

#[test]
fn test_unreadable_sheet_gets_degraded_analysis() {
    let mut host = FlakyHost::new(three_sheet_workbook());
    host.unreadable_sheet = Some("South");
    let settings = RenderSettings::default().with_optimize_merged_cells(false);

    let report = export(&mut host, &["North", "South"], &settings, &mut NamesRenderer).unwrap();

    assert_eq!(report.bytes, b"North,South".to_vec());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("South"));

    let south = &report.analyses[1];
    assert!(south.degraded);
    assert_eq!(south.row_count, 0);
    assert_eq!(south.estimated_page_count, 1);
    assert!(!report.analyses[0].degraded);
}

#[test]
fn test_prepare_failure_restores_earlier_sheets() {
    let mut host = FlakyHost::new(three_sheet_workbook());
    host.frozen_sheet = Some("West");
    let before_north = state(&host.inner, "North");
    let before_west = state(&host.inner, "West");

    let err = export(
        &mut host,
        &["North", "West"],
        &RenderSettings::default(),
        &mut NamesRenderer,
    )
    .unwrap_err();

    match &err {
        ExportError::Prepare { sheet, .. } => assert_eq!(sheet, "West"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.fully_restored());
    assert_eq!(state(&host.inner, "North"), before_north);
    assert_eq!(state(&host.inner, "West"), before_west);
}
