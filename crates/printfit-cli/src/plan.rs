//! JSON print plan
//!
//! The plan is what a paginating backend needs to reproduce the prepared layout:
//! each sheet's page setup plus the row heights, column widths and wrapped cells
//! in effect while the export ran.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use printfit::{
    CellAddress, DocumentRenderer, PageSetup, PaperSize, Quality, RenderError, RenderSettings,
    SheetDocument,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PrintPlan {
    pub generated_at: String,
    pub quality: Quality,
    pub sheets: Vec<SheetPlan>,
}

#[derive(Debug, Serialize)]
pub struct SheetPlan {
    pub name: String,
    /// A1-style used range, absent for an empty sheet
    pub used_range: Option<String>,
    pub page_setup: PageSetup,
    pub paper: PaperPlan,
    pub row_heights: BTreeMap<u32, f64>,
    pub column_widths: BTreeMap<u16, f64>,
    pub wrapped_cells: Vec<String>,
}

/// Physical page a sheet prints on
#[derive(Debug, Serialize)]
pub struct PaperPlan {
    pub size: PaperSize,
    /// SpreadsheetML paper size code
    pub code: u8,
    /// Page width in inches, after orientation
    pub width_in: f64,
    pub height_in: f64,
}

impl PaperPlan {
    fn from_setup(setup: &PageSetup) -> Self {
        let (width_in, height_in) = setup.page_dimensions_in();
        Self {
            size: setup.paper_size,
            code: setup.paper_size.code(),
            width_in,
            height_in,
        }
    }
}

/// Renders the prepared sheets as a JSON print plan
pub struct JsonPlanRenderer {
    generated_at: DateTime<Utc>,
    pretty: bool,
}

impl JsonPlanRenderer {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Renderer that stamps plans with a fixed time
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonPlanRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: SheetDocument + ?Sized> DocumentRenderer<D> for JsonPlanRenderer {
    fn render(
        &mut self,
        document: &D,
        sheet_names: &[String],
        settings: &RenderSettings,
    ) -> Result<Vec<u8>, RenderError> {
        let sheets = sheet_names
            .iter()
            .map(|name| sheet_plan(document, name))
            .collect::<Result<Vec<_>, _>>()?;
        let plan = PrintPlan {
            generated_at: self.generated_at.to_rfc3339(),
            quality: settings.quality,
            sheets,
        };

        let json = if self.pretty {
            serde_json::to_vec_pretty(&plan)
        } else {
            serde_json::to_vec(&plan)
        };
        json.map_err(|e| RenderError::Failed(e.to_string()))
    }
}

fn sheet_plan<D: SheetDocument + ?Sized>(
    document: &D,
    name: &str,
) -> Result<SheetPlan, RenderError> {
    let formatting = document.formatting(name)?;
    let page_setup = document.page_setup(name)?;
    Ok(SheetPlan {
        name: name.to_string(),
        used_range: document.used_range(name)?.map(|r| r.to_a1_string()),
        paper: PaperPlan::from_setup(&page_setup),
        page_setup,
        row_heights: formatting.row_heights,
        column_widths: formatting.column_widths,
        wrapped_cells: formatting
            .wrapped_cells
            .iter()
            .map(CellAddress::to_a1_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use printfit::{export, OrientationChoice, Workbook};
    use serde_json::Value;

    #[test]
    fn test_plan_reflects_prepared_layout() {
        let mut wb = Workbook::new();
        let ws = wb.worksheet_mut(0).unwrap();
        ws.set_cell_value("A1", "Name").unwrap();
        ws.set_cell_value("B2", "x".repeat(800)).unwrap();

        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut renderer = JsonPlanRenderer::at(stamp);
        let report = export(&mut wb, &["Sheet1"], &RenderSettings::default(), &mut renderer)
            .unwrap();

        let plan: Value = serde_json::from_slice(&report.bytes).unwrap();
        assert_eq!(plan["generated_at"], "2024-03-01T12:00:00+00:00");
        assert_eq!(plan["quality"], "Standard");

        let sheet = &plan["sheets"][0];
        assert_eq!(sheet["name"], "Sheet1");
        assert_eq!(sheet["used_range"], "A1:B2");
        assert_eq!(sheet["page_setup"]["header"], "&CSheet1");
        assert_eq!(sheet["page_setup"]["fit_to_width"], 1);
        assert_eq!(sheet["paper"]["size"], "Letter");
        assert_eq!(sheet["paper"]["code"], 1);
        assert_eq!(sheet["paper"]["width_in"], 8.5);
        assert_eq!(sheet["paper"]["height_in"], 11.0);
        assert_eq!(sheet["column_widths"]["1"], 75.0);
        assert_eq!(sheet["wrapped_cells"], serde_json::json!(["B2"]));

        // Plan captured the layout; the workbook itself is back to normal
        assert!(wb.worksheet(0).unwrap().formatting().wrapped_cells.is_empty());
    }

    #[test]
    fn test_landscape_a4_paper() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value("A1", "x")
            .unwrap();

        let settings = RenderSettings::new()
            .with_paper_size(PaperSize::A4)
            .with_orientation(OrientationChoice::Landscape);
        let mut renderer = JsonPlanRenderer::default();
        let report = export(&mut wb, &["Sheet1"], &settings, &mut renderer).unwrap();

        let plan: Value = serde_json::from_slice(&report.bytes).unwrap();
        let paper = &plan["sheets"][0]["paper"];
        assert_eq!(paper["size"], "A4");
        assert_eq!(paper["code"], 9);
        assert_eq!(paper["width_in"], 11.69);
        assert_eq!(paper["height_in"], 8.27);
    }

    #[test]
    fn test_pretty_output() {
        let wb = Workbook::new();
        let mut renderer = JsonPlanRenderer::default().pretty(true);
        let bytes = renderer
            .render(&wb, &["Sheet1".to_string()], &RenderSettings::default())
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n  \"sheets\""));
        assert!(text.contains("\"used_range\": null"));
    }

    #[test]
    fn test_unknown_sheet_fails() {
        let wb = Workbook::new();
        let mut renderer = JsonPlanRenderer::default();
        let err = renderer
            .render(&wb, &["Missing".to_string()], &RenderSettings::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Model(_)));
    }
}
