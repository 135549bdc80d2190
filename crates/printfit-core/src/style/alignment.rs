//! Text layout within a cell

/// Text layout settings
///
/// Horizontal and vertical placement do not change how much paper a cell needs,
/// so only wrapping is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Wrap text onto multiple lines at the column edge
    pub wrap_text: bool,
}
