//! Human-readable analysis summary

use std::fmt;

use crate::analysis::SheetAnalysis;

const RULE_WIDTH: usize = 60;

/// Text report for one [`SheetAnalysis`]
///
/// ```
/// use printfit_layout::{AnalysisReport, SheetAnalysis};
///
/// let analysis = SheetAnalysis::degraded("Budget");
/// let text = AnalysisReport::new(&analysis).to_string();
/// assert!(text.contains("SHEET ANALYSIS: Budget"));
/// ```
pub struct AnalysisReport<'a> {
    analysis: &'a SheetAnalysis,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(analysis: &'a SheetAnalysis) -> Self {
        Self { analysis }
    }
}

impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "SHEET ANALYSIS: {}", a.sheet_name)?;
        writeln!(f, "{}", rule)?;
        if a.degraded {
            writeln!(f)?;
            writeln!(f, "  ! Sheet could not be read; defaults are shown")?;
        }
        writeln!(f)?;

        writeln!(f, "DIMENSIONS:")?;
        writeln!(f, "  - Rows: {}", group_thousands(u64::from(a.row_count)))?;
        writeln!(f, "  - Columns: {}", a.column_count)?;
        let used = if a.used_range_descriptor.is_empty() {
            "(empty)"
        } else {
            a.used_range_descriptor.as_str()
        };
        writeln!(f, "  - Used Range: {}", used)?;
        writeln!(f, "  - Data Density: {:.1}%", a.data_density * 100.0)?;
        writeln!(f, "  - Has Headers: {}", yes_no(a.has_headers))?;
        writeln!(f)?;

        writeln!(f, "QUALITY METRICS:")?;
        writeln!(f, "  - Empty Rows: {}", count_or_sampled(a.empty_row_count))?;
        writeln!(f, "  - Empty Columns: {}", count_or_sampled(a.empty_column_count))?;
        writeln!(f, "  - Merged Regions: {}", a.merged_region_count)?;
        writeln!(f, "  - Long Text Cells: {}", a.long_text_cell_count)?;
        writeln!(f, "  - Longest Cell: {} characters", a.max_cell_length)?;
        writeln!(f, "  - Estimated Pages: {}", a.estimated_page_count)?;
        if a.sample_interval > 1 {
            writeln!(
                f,
                "  - Sampled: every {} cells ({} inspected)",
                a.sample_interval,
                group_thousands(a.inspected_cells)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "RECOMMENDATIONS:")?;
        writeln!(f, "  - Orientation: {}", a.recommended_orientation)?;
        if a.requires_scaling {
            writeln!(f, "  - Scaling: Required")?;
            writeln!(f, "  - Optimal Scale: {}%", a.optimal_scale_percent)?;
        } else {
            writeln!(f, "  - Scaling: Not required (fit to width recommended)")?;
        }
        if a.has_wide_columns {
            writeln!(f, "  - Note: Contains wide columns")?;
            writeln!(f, "    Text wrapping will be enabled for readability")?;
        }
        writeln!(f)?;

        writeln!(f, "{}", rule)?;
        writeln!(f, "TIPS:")?;
        writeln!(f, "  - Use '{}' for best fit", a.recommended_orientation)?;
        writeln!(f, "  - Adjust margins if content is cut off")?;
        writeln!(f, "  - Enable gridlines for data tables")?;
        write!(f, "  - Headers/footers add page numbers and dates")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn count_or_sampled(count: Option<u32>) -> String {
    match count {
        Some(n) => group_thousands(u64::from(n)),
        None => "n/a (sampled)".to_string(),
    }
}

/// Format a number with comma thousands separators
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
