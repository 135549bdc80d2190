//! # printfit-layout
//!
//! Analysis and print-layout decisions for spreadsheets.
//!
//! The engine looks at each sheet through the [`SheetDocument`] trait and:
//! - samples its used range ([`sampler`]) and detects a header row ([`header`])
//! - turns the counts into an orientation, scale and page estimate ([`recommend`])
//! - lays the sheet out for printing ([`optimize`])
//! - captures and restores everything it changed ([`snapshot`], [`export`])
//!
//! ## Example
//!
//! ```rust
//! use printfit_core::Workbook;
//! use printfit_layout::{analyze, export, DocumentRenderer, RenderError, RenderSettings};
//!
//! struct SheetList;
//!
//! impl DocumentRenderer<Workbook> for SheetList {
//!     fn render(
//!         &mut self,
//!         _document: &Workbook,
//!         sheet_names: &[String],
//!         _settings: &RenderSettings,
//!     ) -> Result<Vec<u8>, RenderError> {
//!         Ok(sheet_names.join("\n").into_bytes())
//!     }
//! }
//!
//! let mut workbook = Workbook::new();
//! workbook.worksheet_mut(0).unwrap().set_cell_value("A1", "Total").unwrap();
//!
//! let analysis = analyze(&workbook, "Sheet1").unwrap();
//! assert_eq!(analysis.optimal_scale_percent, 100);
//!
//! let report = export(&mut workbook, &["Sheet1"], &RenderSettings::default(), &mut SheetList).unwrap();
//! assert_eq!(report.bytes, b"Sheet1");
//! ```

pub mod analysis;
pub mod error;
pub mod export;
pub mod header;
pub mod model;
pub mod optimize;
pub mod recommend;
pub mod report;
pub mod sampler;
pub mod settings;
pub mod snapshot;

pub use analysis::{analyze, analyze_all, SheetAnalysis};
pub use error::{
    AnalysisError, ExportError, ExportResult, ModelError, ModelResult, RenderError, RestoreError,
    ValidationError,
};
pub use export::{
    export, export_to_file, export_with_analyses, validate_request, DocumentRenderer, ExportReport,
    SheetStateGuard,
};
pub use model::{CellView, SheetDocument};
pub use optimize::{optimize, LayoutSummary};
pub use recommend::{recommend, Recommendation, SheetMetrics};
pub use report::AnalysisReport;
pub use sampler::{sample, SampleStats, StrideCells};
pub use settings::{Margins, OrientationChoice, Quality, RenderSettings};
pub use snapshot::PageSetupSnapshot;
