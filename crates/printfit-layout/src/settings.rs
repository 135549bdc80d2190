//! Export configuration

use std::fmt;

use printfit_core::{PageOrientation, PaperSize};

use crate::analysis::SheetAnalysis;
use crate::error::ValidationError;

/// Smallest accepted scale, in percent
pub const MIN_SCALE_PERCENT: u16 = 10;

/// Largest accepted scale, in percent
pub const MAX_SCALE_PERCENT: u16 = 200;

/// Largest accepted margin, in inches
pub const MAX_MARGIN_INCHES: f64 = 3.0;

/// Requested page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrientationChoice {
    /// Use each sheet's recommended orientation
    #[default]
    Auto,
    Portrait,
    Landscape,
}

impl OrientationChoice {
    /// Resolve against a sheet's recommendation
    pub fn resolve(self, recommended: PageOrientation) -> PageOrientation {
        match self {
            OrientationChoice::Auto => recommended,
            OrientationChoice::Portrait => PageOrientation::Portrait,
            OrientationChoice::Landscape => PageOrientation::Landscape,
        }
    }
}

impl From<PageOrientation> for OrientationChoice {
    fn from(orientation: PageOrientation) -> Self {
        match orientation {
            PageOrientation::Portrait => OrientationChoice::Portrait,
            PageOrientation::Landscape => OrientationChoice::Landscape,
        }
    }
}

impl fmt::Display for OrientationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrientationChoice::Auto => write!(f, "Auto"),
            OrientationChoice::Portrait => write!(f, "Portrait"),
            OrientationChoice::Landscape => write!(f, "Landscape"),
        }
    }
}

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.5,
            right: 0.5,
            top: 0.75,
            bottom: 0.75,
        }
    }
}

impl Margins {
    /// Same margin on every side
    pub fn uniform(inches: f64) -> Self {
        Self {
            left: inches,
            right: inches,
            top: inches,
            bottom: inches,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let sides = [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ];
        for (side, value) in sides {
            // NaN fails the range check too
            if !(0.0..=MAX_MARGIN_INCHES).contains(&value) {
                return Err(ValidationError::MarginOutOfRange { side, value });
            }
        }
        Ok(())
    }
}

/// Output quality tier, passed through to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    #[default]
    Standard,
    High,
}

/// How the selected sheets should be laid out for export
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderSettings {
    pub orientation: OrientationChoice,
    pub paper_size: PaperSize,
    pub margins: Margins,
    /// Fit every sheet to one page wide; `scale_percent` is ignored while set
    pub fit_to_width: bool,
    pub scale_percent: u16,
    /// Stamp the sheet name, print date and page numbers
    pub include_headers_footers: bool,
    pub print_gridlines: bool,
    /// Wrap and grow rows for cells with long text
    pub wrap_long_text: bool,
    /// Wrap merged regions and fit their rows
    pub optimize_merged_cells: bool,
    pub quality: Quality,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            orientation: OrientationChoice::Auto,
            paper_size: PaperSize::Letter,
            margins: Margins::default(),
            fit_to_width: true,
            scale_percent: 100,
            include_headers_footers: true,
            print_gridlines: false,
            wrap_long_text: true,
            optimize_merged_cells: true,
            quality: Quality::Standard,
        }
    }
}

impl RenderSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that follow a sheet's recommendation
    ///
    /// Sheets that need scaling print at their optimal scale; everything else is
    /// fitted to the page width.
    pub fn recommended_for(analysis: &SheetAnalysis) -> Self {
        let mut settings = Self::default().with_orientation(analysis.recommended_orientation.into());
        if analysis.requires_scaling {
            settings = settings.with_scale(analysis.optimal_scale_percent);
        }
        settings
    }

    pub fn with_orientation(mut self, orientation: OrientationChoice) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        self.paper_size = paper_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Print at a fixed scale (turns fit-to-width off)
    pub fn with_scale(mut self, percent: u16) -> Self {
        self.scale_percent = percent;
        self.fit_to_width = false;
        self
    }

    /// Fit each sheet to one page wide
    pub fn fit_to_width(mut self) -> Self {
        self.fit_to_width = true;
        self
    }

    pub fn with_headers_footers(mut self, include: bool) -> Self {
        self.include_headers_footers = include;
        self
    }

    pub fn with_gridlines(mut self, print: bool) -> Self {
        self.print_gridlines = print;
        self
    }

    pub fn with_wrap_long_text(mut self, wrap: bool) -> Self {
        self.wrap_long_text = wrap;
        self
    }

    pub fn with_optimize_merged_cells(mut self, optimize: bool) -> Self {
        self.optimize_merged_cells = optimize;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Check margins and scale
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.margins.validate()?;
        if !(MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&self.scale_percent) {
            return Err(ValidationError::ScaleOutOfRange(self.scale_percent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::default();
        assert_eq!(settings.orientation, OrientationChoice::Auto);
        assert_eq!(settings.paper_size, PaperSize::Letter);
        assert_eq!(settings.margins, Margins::default());
        assert!(settings.fit_to_width);
        assert!(settings.include_headers_footers);
        assert!(!settings.print_gridlines);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_margins() {
        let settings = RenderSettings::new().with_margins(Margins {
            left: 3.5,
            ..Margins::default()
        });
        assert_eq!(
            settings.validate(),
            Err(ValidationError::MarginOutOfRange {
                side: "left",
                value: 3.5
            })
        );

        assert!(RenderSettings::new()
            .with_margins(Margins::uniform(-0.1))
            .validate()
            .is_err());
        assert!(RenderSettings::new()
            .with_margins(Margins::uniform(f64::NAN))
            .validate()
            .is_err());
        assert!(RenderSettings::new()
            .with_margins(Margins::uniform(3.0))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_scale() {
        assert!(RenderSettings::new().with_scale(10).validate().is_ok());
        assert!(RenderSettings::new().with_scale(200).validate().is_ok());
        assert_eq!(
            RenderSettings::new().with_scale(9).validate(),
            Err(ValidationError::ScaleOutOfRange(9))
        );
        assert!(RenderSettings::new().with_scale(201).validate().is_err());
    }

    #[test]
    fn test_recommended_for() {
        let mut analysis = SheetAnalysis::degraded("Wide");
        analysis.requires_scaling = true;
        analysis.optimal_scale_percent = 60;
        analysis.recommended_orientation = PageOrientation::Landscape;

        let settings = RenderSettings::recommended_for(&analysis);
        assert_eq!(settings.orientation, OrientationChoice::Landscape);
        assert!(!settings.fit_to_width);
        assert_eq!(settings.scale_percent, 60);

        let narrow = RenderSettings::recommended_for(&SheetAnalysis::degraded("Narrow"));
        assert!(narrow.fit_to_width);
        assert_eq!(narrow.orientation, OrientationChoice::Portrait);
    }

    #[test]
    fn test_orientation_resolve() {
        assert_eq!(
            OrientationChoice::Auto.resolve(PageOrientation::Landscape),
            PageOrientation::Landscape
        );
        assert_eq!(
            OrientationChoice::Portrait.resolve(PageOrientation::Landscape),
            PageOrientation::Portrait
        );
    }
}
