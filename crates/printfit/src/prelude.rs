//! Prelude module - common imports for printfit users
//!
//! ```rust
//! use printfit::prelude::*;
//! ```

pub use crate::{
    // Engine entry points
    analyze,
    analyze_all,
    export,
    export_to_file,
    export_with_analyses,
    // Report types
    AnalysisReport,
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    CsvReadOptions,
    // I/O types
    CsvReader,
    // Renderer seam
    DocumentRenderer,
    // Error types
    Error,
    ExportError,
    ExportReport,
    LayoutSummary,
    // Settings
    Margins,
    OrientationChoice,
    PageOrientation,
    PageSetup,
    PaperSize,
    Quality,
    RenderError,
    RenderSettings,
    Result,
    SheetAnalysis,
    SheetDocument,
    Style,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};
