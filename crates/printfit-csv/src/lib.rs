//! # printfit-csv
//!
//! CSV reader for printfit. Each CSV file becomes one worksheet; a header row
//! is written in bold so header detection sees it the way a spreadsheet user
//! would have formatted it.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
