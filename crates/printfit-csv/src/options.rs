//! CSV options

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Whether first row is header
    pub has_header: bool,
    /// Render the header row in bold (default: off, so the file's own
    /// content decides whether the first row reads as a header)
    pub bold_header: bool,
    /// Automatic type detection
    pub auto_detect_types: bool,
    /// Accept records with differing field counts
    pub flexible: bool,
    /// Worksheet name; `read_file` falls back to the file stem
    pub sheet_name: Option<String>,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            has_header: true,
            bold_header: false,
            auto_detect_types: true,
            flexible: true,
            sheet_name: None,
        }
    }
}

impl CsvReadOptions {
    /// Use tabs as the delimiter
    pub fn tab_separated(mut self) -> Self {
        self.delimiter = b'\t';
        self
    }

    /// Render the header row in bold
    pub fn with_bold_header(mut self, bold: bool) -> Self {
        self.bold_header = bold;
        self
    }

    /// Set the worksheet name
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = Some(name.into());
        self
    }
}
