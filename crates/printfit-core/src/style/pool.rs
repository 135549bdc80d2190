//! Style pool for deduplication

use super::Style;
use ahash::AHashMap;

/// Deduplicating store of cell styles
///
/// Index 0 is always the default style. Toggling a formatting flag and toggling it
/// back resolves to the original index, which is what lets the layout engine
/// restore a sheet's formatting exactly.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    index_map: AHashMap<Style, u32>,
}

impl StylePool {
    /// Create a new style pool with default style at index 0
    pub fn new() -> Self {
        let mut pool = Self {
            styles: Vec::with_capacity(16),
            index_map: AHashMap::with_capacity(16),
        };
        pool.styles.push(Style::default());
        pool.index_map.insert(Style::default(), 0);
        pool
    }

    /// Get or create a style, returning its index
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.index_map.get(&style) {
            return idx;
        }

        let idx = self.styles.len() as u32;
        self.index_map.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Get the default style (index 0)
    pub fn default_style(&self) -> &Style {
        &self.styles[0]
    }

    /// Get the number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool only holds the default style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}
