//! # printfit-core
//!
//! In-memory document model for the printfit layout engine.
//!
//! This crate provides the types the engine reads and temporarily mutates:
//! - [`CellValue`] - Cell values (numbers, strings, booleans)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Style`] - Cell formatting (font size and weight, wrapping)
//! - [`PageSetup`] - Print configuration of a worksheet
//! - [`Workbook`], [`Worksheet`] - The main document structures
//!
//! ## Example
//!
//! ```rust
//! use printfit_core::{Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A1", "Region").unwrap();
//! sheet.set_cell_style("A1", &Style::new().bold(true)).unwrap();
//! sheet.set_cell_value_at(1, 0, "North").unwrap();
//!
//! let width = sheet.autofit_column_width(0);
//! assert!(width > 0.0);
//! ```

pub mod autofit;
pub mod cell;
pub mod error;
pub mod page_setup;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellRange, CellValue, SharedString};
pub use error::{Error, Result};
pub use page_setup::{PageOrientation, PageSetup, PaperSize};
pub use style::{Alignment, FontStyle, Style, StylePool};
pub use workbook::Workbook;
pub use worksheet::{SheetFormatting, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Largest row height the file format can store, in points
pub const MAX_ROW_HEIGHT: f64 = 409.5;

/// Largest column width the file format can store, in characters
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Default row height in points
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;

/// Default column width in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;
