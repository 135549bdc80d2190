//! Print configuration of a worksheet

use std::fmt;

/// Smallest print scale the file format accepts, in percent
pub const MIN_PRINT_SCALE: u16 = 10;

/// Largest print scale the file format accepts, in percent
pub const MAX_PRINT_SCALE: u16 = 400;

/// Page setup for printing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSetup {
    /// Paper size
    pub paper_size: PaperSize,
    /// Orientation
    pub orientation: PageOrientation,
    /// Scale percentage (10-400), ignored while fit-to-page is active
    pub scale: u16,
    /// Fit to this many pages wide (`Some(0)` means "automatic")
    pub fit_to_width: Option<u16>,
    /// Fit to this many pages tall (`Some(0)` means "automatic")
    pub fit_to_height: Option<u16>,
    /// Top margin in inches
    pub top_margin: f64,
    /// Bottom margin in inches
    pub bottom_margin: f64,
    /// Left margin in inches
    pub left_margin: f64,
    /// Right margin in inches
    pub right_margin: f64,
    /// Header margin in inches
    pub header_margin: f64,
    /// Footer margin in inches
    pub footer_margin: f64,
    /// Print gridlines
    pub print_gridlines: bool,
    /// Print headings (row/column headers)
    pub print_headings: bool,
    /// Page header text, using `&L`/`&C`/`&R` section codes
    pub header: String,
    /// Page footer text, using `&L`/`&C`/`&R` section codes
    pub footer: String,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            orientation: PageOrientation::Portrait,
            scale: 100,
            fit_to_width: None,
            fit_to_height: None,
            top_margin: 0.75,
            bottom_margin: 0.75,
            left_margin: 0.7,
            right_margin: 0.7,
            header_margin: 0.3,
            footer_margin: 0.3,
            print_gridlines: false,
            print_headings: false,
            header: String::new(),
            footer: String::new(),
        }
    }
}

impl PageSetup {
    /// Whether `scale` is a print scale the file format can store
    pub fn is_valid_scale(scale: u16) -> bool {
        (MIN_PRINT_SCALE..=MAX_PRINT_SCALE).contains(&scale)
    }

    /// Whether `inches` is a usable margin
    pub fn is_valid_margin(inches: f64) -> bool {
        inches.is_finite() && inches >= 0.0
    }

    /// Printable page size in inches (width, height) for this orientation
    pub fn page_dimensions_in(&self) -> (f64, f64) {
        let (width, height) = self.paper_size.dimensions_in();
        match self.orientation {
            PageOrientation::Portrait => (width, height),
            PageOrientation::Landscape => (height, width),
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl fmt::Display for PageOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageOrientation::Portrait => write!(f, "Portrait"),
            PageOrientation::Landscape => write!(f, "Landscape"),
        }
    }
}

/// Paper sizes supported for export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    Letter,
    Legal,
    Tabloid,
    A3,
    A4,
    A5,
}

impl PaperSize {
    /// Portrait page size in inches (width, height)
    pub fn dimensions_in(&self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::Tabloid => (11.0, 17.0),
            PaperSize::A3 => (11.69, 16.54),
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::A5 => (5.83, 8.27),
        }
    }

    /// SpreadsheetML paper size code
    pub fn code(&self) -> u8 {
        match self {
            PaperSize::Letter => 1,
            PaperSize::Tabloid => 3,
            PaperSize::Legal => 5,
            PaperSize::A3 => 8,
            PaperSize::A4 => 9,
            PaperSize::A5 => 11,
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Tabloid => "Tabloid",
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
        };
        write!(f, "{}", name)
    }
}
