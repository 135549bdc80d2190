//! Content-based size estimation for auto-fitting rows and columns
//!
//! There is no font rasterizer here. Widths are measured in "characters of the
//! default 11pt font" (the unit column widths are stored in) and heights in points,
//! scaled by the cell's font size. That is accurate enough to decide how many lines
//! a wrapped cell needs on paper.

use crate::style::FontStyle;
use crate::DEFAULT_ROW_HEIGHT;

/// Padding Excel adds around auto-fitted column content, in characters
pub const COLUMN_PADDING: f64 = 0.71;

/// Extra width of bold glyphs relative to regular ones
const BOLD_WIDTH_FACTOR: f64 = 1.1;

/// Estimated display width of `text`, in default-font characters
///
/// Multi-line text is as wide as its longest line.
pub fn text_width(text: &str, font: &FontStyle) -> f64 {
    let widest = text
        .lines()
        .map(|line| glyph_width(line, font))
        .fold(0.0, f64::max);
    if widest == 0.0 {
        0.0
    } else {
        widest + COLUMN_PADDING
    }
}

/// Width of a single line's glyphs, without padding
fn glyph_width(line: &str, font: &FontStyle) -> f64 {
    let weight = if font.bold { BOLD_WIDTH_FACTOR } else { 1.0 };
    line.chars().count() as f64 * font.size_factor() * weight
}

/// Number of printed lines `text` occupies in a column `column_width` characters wide
pub fn line_count(text: &str, font: &FontStyle, column_width: f64, wrap: bool) -> u32 {
    if text.is_empty() {
        return 1;
    }
    let usable = column_width.max(1.0);
    text.split('\n')
        .map(|line| {
            let width = glyph_width(line, font);
            if !wrap || width <= usable {
                1
            } else {
                (width / usable).ceil() as u32
            }
        })
        .sum()
}

/// Height of one printed line in `font`, in points
pub fn line_height(font: &FontStyle) -> f64 {
    DEFAULT_ROW_HEIGHT * font.size_factor()
}

/// Row height needed to show `text` in full, in points
pub fn text_height(text: &str, font: &FontStyle, column_width: f64, wrap: bool) -> f64 {
    line_count(text, font, column_width, wrap) as f64 * line_height(font)
}
