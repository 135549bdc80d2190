//! Cell styling types
//!
//! Print layout only cares about a few style attributes:
//! - [`FontStyle`] - Font size and weight (bold marks header rows)
//! - [`Alignment`] - Text wrapping
//!
//! Styles are deduplicated through [`StylePool`]; cells hold an index into it.

mod alignment;
mod font;
mod pool;

pub use alignment::Alignment;
pub use font::FontStyle;
pub use pool::StylePool;

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Font settings
    pub font: FontStyle,
    /// Text wrapping
    pub alignment: Alignment,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = wrap;
        self
    }

    /// Whether the style wraps text
    pub fn is_wrapped(&self) -> bool {
        self.alignment.wrap_text
    }
}
