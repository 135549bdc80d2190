//! # printfit
//!
//! Analyze spreadsheets and lay them out for readable paginated export.
//!
//! printfit inspects each sheet of a document, recommends an orientation, a print
//! scale and a page estimate, and temporarily reformats the sheet (wrapping long
//! text, fitting rows and columns) while a renderer produces the output. Every
//! change is reverted afterwards, even when rendering fails.
//!
//! ## Features
//!
//! - Load CSV/TSV files as worksheets
//! - Bounded sampling, so huge sheets analyze in roughly constant time
//! - Header row detection
//! - Orientation, scale and page-count recommendations
//! - Layout optimization with guaranteed restore
//!
//! ## Example
//!
//! ```rust
//! use printfit::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Region").unwrap();
//! sheet.set_cell_value("B1", "Sales").unwrap();
//! sheet.set_cell_value("A2", "North").unwrap();
//! sheet.set_cell_value("B2", 1200.0).unwrap();
//!
//! let analysis = analyze(&workbook, "Sheet1").unwrap();
//! assert_eq!(analysis.recommended_orientation, PageOrientation::Portrait);
//!
//! let settings = RenderSettings::recommended_for(&analysis);
//! assert!(settings.fit_to_width);
//! ```

pub mod prelude;

// Re-export core types
pub use printfit_core::{
    CellAddress,
    CellData,
    CellRange,
    // Cell types
    CellValue,
    // Error types
    Error,
    FontStyle,
    // Print settings
    PageOrientation,
    PageSetup,
    PaperSize,
    Result,
    SheetFormatting,
    // Style types
    Style,
    // Main types
    Workbook,
    Worksheet,
    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export the engine
pub use printfit_layout::{
    analyze, analyze_all, export, export_to_file, export_with_analyses, optimize, recommend,
    sample, validate_request, AnalysisError, AnalysisReport, CellView, DocumentRenderer,
    ExportError, ExportReport, ExportResult, LayoutSummary, Margins, ModelError, ModelResult,
    OrientationChoice, PageSetupSnapshot, Quality, Recommendation, RenderError, RenderSettings,
    RestoreError, SampleStats, SheetAnalysis, SheetDocument, SheetMetrics, SheetStateGuard,
    StrideCells, ValidationError,
};

// Re-export I/O types
pub use printfit_csv::{CsvError, CsvReadOptions, CsvReader};

use std::path::Path;

/// Extension trait for Workbook to load input files
pub trait WorkbookExt {
    /// Open a single file as a one-sheet workbook
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Open several files, one sheet per file, in the given order
    ///
    /// Sheets are named after the file stems. Clashing names get a numeric suffix.
    fn open_many<I, P>(paths: I) -> Result<Workbook>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        Self::open_many([path])
    }

    fn open_many<I, P>(paths: I) -> Result<Workbook>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut workbook = Workbook::empty();
        for path in paths {
            let mut worksheet = read_sheet(path.as_ref())?;
            let name = unique_sheet_name(&workbook, worksheet.name());
            worksheet.set_name(name);
            workbook.add_existing_worksheet(worksheet)?;
        }
        if workbook.is_empty() {
            return Err(Error::other("No input files"));
        }
        Ok(workbook)
    }
}

fn read_sheet(path: &Path) -> Result<Worksheet> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let options = match extension.as_deref() {
        Some("csv") | Some("txt") => CsvReadOptions::default(),
        Some("tsv") | Some("tab") => CsvReadOptions::default().tab_separated(),
        _ => {
            return Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            )))
        }
    };

    CsvReader::read_file(path, &options)
        .map_err(|e| Error::other(format!("{}: {}", path.display(), e)))
}

/// `base`, or `base (n)` when a sheet with that name (ignoring case) exists
fn unique_sheet_name(workbook: &Workbook, base: &str) -> String {
    if !workbook.name_taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| {
            let suffix = format!(" ({})", n);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(keep).collect();
            format!("{}{}", stem, suffix)
        })
        .find(|candidate| !workbook.name_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
