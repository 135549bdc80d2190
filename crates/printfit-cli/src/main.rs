//! printfit CLI - spreadsheet print layout tool

mod plan;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use printfit::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::plan::JsonPlanRenderer;

#[derive(Parser)]
#[command(name = "printfit")]
#[command(
    author,
    version,
    about = "Analyze spreadsheets and lay them out for printing"
)]
struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze sheets and show layout recommendations
    Analyze {
        /// Input files (csv, tsv), one sheet each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Sheet to analyze (repeatable, default: all)
        #[arg(short, long)]
        sheet: Vec<String>,

        /// Print the analyses as JSON
        #[arg(long)]
        json: bool,
    },

    /// Lay out sheets for printing and write the print plan
    Export {
        /// Input files (csv, tsv), one sheet each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Sheet to export (repeatable, default: all)
        #[arg(short, long)]
        sheet: Vec<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List the sheets the inputs load as
    Sheets {
        /// Input files (csv, tsv), one sheet each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct LayoutArgs {
    /// JSON file with render settings; flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Margin on every side, in inches
    #[arg(long)]
    margin: Option<f64>,

    /// Print at a fixed scale in percent instead of fitting to width
    #[arg(long, conflicts_with = "fit_width")]
    scale: Option<u16>,

    /// Fit each sheet to one page wide
    #[arg(long)]
    fit_width: bool,

    /// Leave out page headers and footers
    #[arg(long)]
    no_headers: bool,

    #[arg(long)]
    gridlines: bool,

    /// Do not wrap long text
    #[arg(long)]
    no_wrap: bool,

    /// Leave merged regions as they are
    #[arg(long)]
    no_merge_fit: bool,

    #[arg(long)]
    high_quality: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrientationArg {
    Auto,
    Portrait,
    Landscape,
}

impl From<OrientationArg> for OrientationChoice {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Auto => OrientationChoice::Auto,
            OrientationArg::Portrait => OrientationChoice::Portrait,
            OrientationArg::Landscape => OrientationChoice::Landscape,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    Tabloid,
    A3,
    A4,
    A5,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => PaperSize::Letter,
            PaperArg::Legal => PaperSize::Legal,
            PaperArg::Tabloid => PaperSize::Tabloid,
            PaperArg::A3 => PaperSize::A3,
            PaperArg::A4 => PaperSize::A4,
            PaperArg::A5 => PaperSize::A5,
        }
    }
}

impl LayoutArgs {
    /// Settings file (or defaults) with the flag overrides applied
    fn resolve(&self) -> Result<RenderSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => RenderSettings::default(),
        };

        if let Some(orientation) = self.orientation {
            settings = settings.with_orientation(orientation.into());
        }
        if let Some(paper) = self.paper {
            settings = settings.with_paper_size(paper.into());
        }
        if let Some(margin) = self.margin {
            settings = settings.with_margins(Margins::uniform(margin));
        }
        if let Some(scale) = self.scale {
            settings = settings.with_scale(scale);
        }
        if self.fit_width {
            settings = settings.fit_to_width();
        }
        if self.no_headers {
            settings = settings.with_headers_footers(false);
        }
        if self.gridlines {
            settings = settings.with_gridlines(true);
        }
        if self.no_wrap {
            settings = settings.with_wrap_long_text(false);
        }
        if self.no_merge_fit {
            settings = settings.with_optimize_merged_cells(false);
        }
        if self.high_quality {
            settings = settings.with_quality(Quality::High);
        }

        settings.validate().context("Invalid render settings")?;
        Ok(settings)
    }
}

fn load_settings(path: &Path) -> Result<RenderSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings '{}'", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            inputs,
            sheet,
            json,
        } => analyze_sheets(&inputs, &sheet, json),
        Commands::Export {
            inputs,
            sheet,
            output,
            layout,
        } => export_sheets(&inputs, &sheet, output.as_deref(), &layout),
        Commands::Sheets { inputs } => list_sheets(&inputs),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn open_inputs(inputs: &[PathBuf]) -> Result<Workbook> {
    let workbook = Workbook::open_many(inputs).with_context(|| {
        let names: Vec<_> = inputs.iter().map(|p| p.display().to_string()).collect();
        format!("Failed to open {}", names.join(", "))
    })?;
    tracing::info!("Loaded {} sheet(s)", workbook.sheet_count());
    Ok(workbook)
}

/// Requested sheets, or every sheet when none were named
fn selected_sheets(workbook: &Workbook, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(workbook.sheet_names());
    }
    for name in requested {
        if workbook.worksheet_by_name(name).is_none() {
            bail!(
                "Sheet '{}' not found (available: {})",
                name,
                workbook.sheet_names().join(", ")
            );
        }
    }
    Ok(requested.to_vec())
}

fn analyze_sheets(inputs: &[PathBuf], requested: &[String], json: bool) -> Result<()> {
    let workbook = open_inputs(inputs)?;
    let sheets = selected_sheets(&workbook, requested)?;

    let mut analyses = Vec::with_capacity(sheets.len());
    for name in &sheets {
        let analysis =
            analyze(&workbook, name).with_context(|| format!("Failed to analyze '{}'", name))?;
        analyses.push(analysis);
    }

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &analyses)
            .context("Failed to write analysis")?;
        writeln!(stdout)?;
    } else {
        for analysis in &analyses {
            writeln!(stdout, "{}", AnalysisReport::new(analysis))?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn export_sheets(
    inputs: &[PathBuf],
    requested: &[String],
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<()> {
    let settings = layout.resolve()?;
    let mut workbook = open_inputs(inputs)?;
    let sheets = selected_sheets(&workbook, requested)?;
    let mut renderer = JsonPlanRenderer::new().pretty(true);

    let report = match output {
        Some(path) => export_to_file(&mut workbook, &sheets, &settings, &mut renderer, path),
        None => export(&mut workbook, &sheets, &settings, &mut renderer),
    }
    .context("Export failed")?;

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
    for (name, layout) in &report.layouts {
        tracing::info!(
            "'{}': wrapped {} long cell(s), fitted {} row(s) and {} column(s)",
            name,
            layout.wrapped_long_cells,
            layout.rows_fitted,
            layout.columns_fitted
        );
    }

    match report.output_path {
        Some(path) => eprintln!(
            "Wrote plan for {} sheet(s) to '{}'",
            sheets.len(),
            path.display()
        ),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&report.bytes)
                .context("Failed to write to stdout")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn list_sheets(inputs: &[PathBuf]) -> Result<()> {
    let workbook = open_inputs(inputs)?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        match sheet.used_range() {
            Some(range) => println!("{}\t{}\t{}", i, sheet.name(), range.to_a1_string()),
            None => println!("{}\t{}\t(empty)", i, sheet.name()),
        }
    }
    Ok(())
}
