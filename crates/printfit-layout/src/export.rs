//! Export orchestration
//!
//! An export analyzes each selected sheet, captures its print state, lays it out,
//! hands the whole selection to a [`DocumentRenderer`] once, and then restores
//! every captured sheet. Restoration is tied to a [`SheetStateGuard`], so it
//! happens on every exit path, including a panic inside the renderer.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{analyze, SheetAnalysis};
use crate::error::{
    ExportError, ExportResult, ModelResult, RenderError, RestoreError, ValidationError,
};
use crate::model::SheetDocument;
use crate::optimize::{optimize, LayoutSummary};
use crate::settings::RenderSettings;
use crate::snapshot::PageSetupSnapshot;

/// Paints the prepared sheets into paginated output
pub trait DocumentRenderer<D: SheetDocument + ?Sized> {
    /// Render `sheet_names` of `document`, in order, to bytes
    fn render(
        &mut self,
        document: &D,
        sheet_names: &[String],
        settings: &RenderSettings,
    ) -> Result<Vec<u8>, RenderError>;
}

/// Scoped mutable access to a document that restores captured sheets on exit
///
/// Call [`SheetStateGuard::finish`] to restore and learn about failures. If the
/// guard is dropped instead, it restores anyway and logs what went wrong.
pub struct SheetStateGuard<'a, D: SheetDocument + ?Sized> {
    document: &'a mut D,
    snapshots: Vec<PageSetupSnapshot>,
    released: bool,
}

impl<'a, D: SheetDocument + ?Sized> SheetStateGuard<'a, D> {
    pub fn new(document: &'a mut D) -> Self {
        Self {
            document,
            snapshots: Vec::new(),
            released: false,
        }
    }

    /// Capture `sheet` so it is restored when the guard is released
    ///
    /// Capturing the same sheet twice keeps the first snapshot.
    pub fn capture(&mut self, sheet: &str) -> ModelResult<()> {
        if self.snapshots.iter().any(|s| s.sheet_name() == sheet) {
            return Ok(());
        }
        let snapshot = PageSetupSnapshot::capture(&*self.document, sheet)?;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Names of the captured sheets, in capture order
    pub fn captured(&self) -> Vec<&str> {
        self.snapshots.iter().map(|s| s.sheet_name()).collect()
    }

    pub fn document(&self) -> &D {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut *self.document
    }

    /// Restore every captured sheet and report the ones that did not restore cleanly
    pub fn finish(mut self) -> Vec<RestoreError> {
        self.restore_all()
    }

    fn restore_all(&mut self) -> Vec<RestoreError> {
        self.released = true;
        let mut failures = Vec::new();
        // Reverse capture order
        for snapshot in self.snapshots.iter().rev() {
            if let Err(err) = snapshot.restore(&mut *self.document) {
                tracing::warn!("Restore failed: {}", err);
                failures.push(err);
            }
        }
        failures
    }
}

impl<D: SheetDocument + ?Sized> Drop for SheetStateGuard<'_, D> {
    fn drop(&mut self) {
        if !self.released {
            let failures = self.restore_all();
            if !failures.is_empty() {
                tracing::warn!(
                    "{} sheet(s) not fully restored during cleanup",
                    failures.len()
                );
            }
        }
    }
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Rendered output
    pub bytes: Vec<u8>,
    /// Analysis used for each exported sheet, in selection order
    pub analyses: Vec<SheetAnalysis>,
    /// Layout changes made to each sheet before rendering (since reverted)
    pub layouts: Vec<(String, LayoutSummary)>,
    /// Non-fatal problems, such as sheets that could not be analyzed
    pub warnings: Vec<String>,
    /// Where the output was written, for [`export_to_file`]
    pub output_path: Option<PathBuf>,
}

/// Check settings and selection before anything is touched
pub fn validate_request<D: SheetDocument + ?Sized, S: AsRef<str>>(
    document: &D,
    sheet_names: &[S],
    settings: &RenderSettings,
) -> Result<(), ValidationError> {
    settings.validate()?;
    if sheet_names.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let available = document.sheet_names();
    let mut seen = HashSet::new();
    for name in sheet_names {
        let name = name.as_ref();
        if !available.iter().any(|a| a == name) {
            return Err(ValidationError::UnknownSheet(name.to_string()));
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateSheet(name.to_string()));
        }
    }
    Ok(())
}

/// Export the selected sheets
pub fn export<D, R, S>(
    document: &mut D,
    sheet_names: &[S],
    settings: &RenderSettings,
    renderer: &mut R,
) -> ExportResult<ExportReport>
where
    D: SheetDocument + ?Sized,
    R: DocumentRenderer<D> + ?Sized,
    S: AsRef<str>,
{
    export_with_analyses(document, sheet_names, settings, &[], renderer)
}

/// Export the selected sheets, reusing analyses the caller already has
///
/// A cached analysis is used for any sheet whose name it carries; the rest are
/// analyzed now.
pub fn export_with_analyses<D, R, S>(
    document: &mut D,
    sheet_names: &[S],
    settings: &RenderSettings,
    cached: &[SheetAnalysis],
    renderer: &mut R,
) -> ExportResult<ExportReport>
where
    D: SheetDocument + ?Sized,
    R: DocumentRenderer<D> + ?Sized,
    S: AsRef<str>,
{
    validate_request(&*document, sheet_names, settings)?;
    let names: Vec<String> = sheet_names.iter().map(|s| s.as_ref().to_string()).collect();
    tracing::info!("Exporting {} sheet(s): {}", names.len(), names.join(", "));

    let mut warnings = Vec::new();
    let mut analyses = Vec::with_capacity(names.len());
    let mut layouts = Vec::with_capacity(names.len());
    let mut guard = SheetStateGuard::new(document);

    for name in &names {
        let analysis = match cached.iter().find(|a| &a.sheet_name == name) {
            Some(analysis) => analysis.clone(),
            None => match analyze(guard.document(), name) {
                Ok(analysis) => analysis,
                Err(err) => {
                    tracing::warn!("{}; using defaults", err);
                    warnings.push(err.to_string());
                    SheetAnalysis::degraded(name.as_str())
                }
            },
        };

        let prepared = guard
            .capture(name)
            .and_then(|()| optimize(guard.document_mut(), name, settings, &analysis));
        match prepared {
            Ok(summary) => layouts.push((name.clone(), summary)),
            Err(source) => {
                let restore_failures = guard.finish();
                return Err(ExportError::Prepare {
                    sheet: name.clone(),
                    source,
                    restore_failures,
                });
            }
        }
        analyses.push(analysis);
    }

    let rendered = renderer.render(guard.document(), &names, settings);
    let restore_failures = guard.finish();

    let bytes = match rendered {
        Ok(bytes) => bytes,
        Err(source) => {
            tracing::warn!("Rendering failed: {}", source);
            return Err(ExportError::Render {
                source,
                restore_failures,
            });
        }
    };
    if !restore_failures.is_empty() {
        return Err(ExportError::Restore(restore_failures));
    }

    tracing::info!("Rendered {} bytes", bytes.len());
    Ok(ExportReport {
        bytes,
        analyses,
        layouts,
        warnings,
        output_path: None,
    })
}

/// Export the selected sheets and write the output to `path`
///
/// Nothing is written unless the export succeeds.
pub fn export_to_file<D, R, S, P>(
    document: &mut D,
    sheet_names: &[S],
    settings: &RenderSettings,
    renderer: &mut R,
    path: P,
) -> ExportResult<ExportReport>
where
    D: SheetDocument + ?Sized,
    R: DocumentRenderer<D> + ?Sized,
    S: AsRef<str>,
    P: AsRef<Path>,
{
    let mut report = export(document, sheet_names, settings, renderer)?;
    let path = path.as_ref();
    fs::write(path, &report.bytes)?;
    tracing::info!("Wrote {}", path.display());
    report.output_path = Some(path.to_path_buf());
    Ok(report)
}
