//! Error types for the layout engine

use thiserror::Error;

/// Result type for document model access
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors raised by a [`SheetDocument`](crate::SheetDocument) implementation
#[derive(Debug, Error)]
pub enum ModelError {
    /// No sheet with this name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A cell could not be read
    #[error("Unreadable cell {address}: {message}")]
    UnreadableCell { address: String, message: String },

    /// Error from the in-memory document model
    #[error("Document error: {0}")]
    Core(#[from] printfit_core::Error),

    /// Any other host failure
    #[error("{0}")]
    Other(String),
}

/// A sheet could not be analyzed
///
/// Recoverable: exports substitute a degraded analysis and carry on.
#[derive(Debug, Error)]
#[error("Cannot analyze sheet '{sheet}': {source}")]
pub struct AnalysisError {
    pub sheet: String,
    #[source]
    pub source: ModelError,
}

/// Caller-supplied export parameters were rejected before anything was touched
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{side} margin {value} is outside 0-3 inches")]
    MarginOutOfRange { side: &'static str, value: f64 },

    #[error("Scale {0}% is outside 10-200%")]
    ScaleOutOfRange(u16),

    #[error("No sheets selected")]
    EmptySelection,

    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("Sheet selected more than once: {0}")]
    DuplicateSheet(String),
}

/// The document renderer failed
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer failed: {0}")]
    Failed(String),

    #[error("Renderer could not read the document: {0}")]
    Model(#[from] ModelError),

    #[error("Renderer IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A sheet was not restored to exactly its captured state
#[derive(Debug, Error)]
pub enum RestoreError {
    /// Some captured fields were malformed and skipped; the rest were restored
    #[error("Sheet '{sheet}': skipped malformed fields: {}", .fields.join(", "))]
    MalformedFields { sheet: String, fields: Vec<String> },

    /// The document refused the restore
    #[error("Sheet '{sheet}': {source}")]
    Model {
        sheet: String,
        #[source]
        source: ModelError,
    },
}

impl RestoreError {
    /// Name of the affected sheet
    pub fn sheet(&self) -> &str {
        match self {
            RestoreError::MalformedFields { sheet, .. } | RestoreError::Model { sheet, .. } => sheet,
        }
    }
}

/// Result type for exports
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// An export did not produce output
#[derive(Debug, Error)]
pub enum ExportError {
    /// Rejected up front; the document was not touched
    #[error("Invalid export request: {0}")]
    Validation(#[from] ValidationError),

    /// A sheet could not be captured or laid out
    #[error("Failed to prepare sheet '{sheet}': {source}")]
    Prepare {
        sheet: String,
        #[source]
        source: ModelError,
        restore_failures: Vec<RestoreError>,
    },

    /// The renderer failed after all sheets were prepared
    #[error("Rendering failed: {source}")]
    Render {
        #[source]
        source: RenderError,
        restore_failures: Vec<RestoreError>,
    },

    /// Rendering succeeded but some sheets were not fully restored
    #[error("{} sheet(s) not fully restored", .0.len())]
    Restore(Vec<RestoreError>),

    /// The rendered output could not be written
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Restore problems that accompanied this error
    pub fn restore_failures(&self) -> &[RestoreError] {
        match self {
            ExportError::Prepare {
                restore_failures, ..
            }
            | ExportError::Render {
                restore_failures, ..
            } => restore_failures,
            ExportError::Restore(failures) => failures,
            ExportError::Validation(_) | ExportError::Io(_) => &[],
        }
    }

    /// Whether every sheet touched by the export is back to its captured state
    pub fn fully_restored(&self) -> bool {
        self.restore_failures().is_empty()
    }
}
