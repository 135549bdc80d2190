//! Font attributes that affect printed size

/// Font settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Font size in points
    pub size: f64,
    /// Bold (also marks header rows)
    pub bold: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            size: 11.0,
            bold: false,
        }
    }
}

impl FontStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Ratio of this font's size to the 11pt default the sheet metrics are based on
    pub fn size_factor(&self) -> f64 {
        if self.size > 0.0 {
            self.size / 11.0
        } else {
            1.0
        }
    }
}

// Sizes are compared by bit pattern so styles can be pooled in a hash map
impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.size.to_bits().hash(state);
        self.bold.hash(state);
    }
}

impl Eq for FontStyle {}
