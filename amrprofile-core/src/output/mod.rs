//! Rendering of pipeline tables.
//!
//! Every stage of a [`ProfileReport`] can be written as a table: the parsed
//! records, the full descriptor table, the column subset fed to the
//! classifier, and the predictions.
//!
//! ## Supported Formats
//!
//! - **TSV**: tab-separated, header row first
//! - **CSV**: comma-separated, RFC 4180 quoting
//! - **Table**: space-aligned columns for reading in a terminal, followed by
//!   the table shape for descriptor tables
//!
//! ## Examples
//!
//! ### Write predictions to stdout
//!
//! ```rust,no_run
//! use amrprofile_core::{Profiler, config::{OutputFormat, ProfilerConfig}};
//! use amrprofile_core::output::write_predictions;
//! use std::io::stdout;
//!
//! let profiler = Profiler::with_config(ProfilerConfig::default())?;
//! let report = profiler.run_fasta_file("proteins.fasta")?;
//!
//! write_predictions(&mut stdout(), &report.predictions, OutputFormat::Tsv)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Write every stage to a file
//!
//! ```rust,no_run
//! use amrprofile_core::{Profiler, config::{OutputFormat, ProfilerConfig}};
//! use amrprofile_core::output::write_report;
//! use std::fs::File;
//!
//! let profiler = Profiler::with_config(ProfilerConfig::default())?;
//! let report = profiler.run_fasta_file("proteins.fasta")?;
//!
//! let mut file = File::create("report.txt")?;
//! write_report(&mut file, &report, OutputFormat::Table, true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;

use crate::config::OutputFormat;
use crate::constants::{PREDICTION_COLUMNS, RECORD_COLUMNS};
use crate::results::{Prediction, ProfileReport};
use crate::table::FeatureTable;
use crate::types::{AmrError, SequenceRecord};

mod formats {
    pub mod delimited;
    pub mod text;
}

use formats::{delimited::write_delimited_format, text::write_text_format};

const RECORDS_TITLE: &str = "Parsed FASTA records";
const FEATURES_TITLE: &str = "Protein properties";
const SUBSET_TITLE: &str = "Descriptor subset";
const PREDICTIONS_TITLE: &str = "Prediction output";

/// Header plus rows of already formatted cells.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    fn from_records(records: &[SequenceRecord]) -> Self {
        Self {
            header: RECORD_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records
                .iter()
                .map(|r| vec![r.id.clone(), r.description.clone(), r.sequence.clone()])
                .collect(),
        }
    }

    fn from_table(table: &FeatureTable) -> Self {
        Self {
            header: table.columns().to_vec(),
            rows: table
                .rows()
                .iter()
                .map(|row| row.iter().map(f64::to_string).collect())
                .collect(),
        }
    }

    fn from_predictions(predictions: &[Prediction]) -> Self {
        Self {
            header: PREDICTION_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: predictions
                .iter()
                .map(|p| vec![p.id.clone(), p.profile.to_string()])
                .collect(),
        }
    }
}

fn write_grid<W: Write>(writer: &mut W, grid: &Grid, format: OutputFormat) -> Result<(), AmrError> {
    match format {
        OutputFormat::Tsv => write_delimited_format(writer, grid, b'\t'),
        OutputFormat::Csv => write_delimited_format(writer, grid, b','),
        OutputFormat::Table => write_text_format(writer, grid),
    }
}

fn write_shape<W: Write>(
    writer: &mut W,
    table: &FeatureTable,
    format: OutputFormat,
) -> Result<(), AmrError> {
    if format == OutputFormat::Table {
        let (rows, cols) = table.shape();
        writeln!(writer, "[{} rows x {} columns]", rows, cols)?;
    }
    Ok(())
}

/// Writes the parsed records: identifier, full description and sequence.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[SequenceRecord],
    format: OutputFormat,
) -> Result<(), AmrError> {
    write_grid(writer, &Grid::from_records(records), format)
}

/// Writes a descriptor table, with its shape in [`OutputFormat::Table`] mode.
pub fn write_features<W: Write>(
    writer: &mut W,
    table: &FeatureTable,
    format: OutputFormat,
) -> Result<(), AmrError> {
    write_grid(writer, &Grid::from_table(table), format)?;
    write_shape(writer, table, format)
}

/// Writes one `Sequence`/`Antimicrobial Profile` row per prediction.
pub fn write_predictions<W: Write>(
    writer: &mut W,
    predictions: &[Prediction],
    format: OutputFormat,
) -> Result<(), AmrError> {
    write_grid(writer, &Grid::from_predictions(predictions), format)
}

/// Writes a whole report.
///
/// With `show_stages` the records, features and subset tables come first,
/// each under a `# title` line and separated by blank lines. Without it only
/// the bare predictions table is written.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &ProfileReport,
    format: OutputFormat,
    show_stages: bool,
) -> Result<(), AmrError> {
    if !show_stages {
        return write_predictions(writer, &report.predictions, format);
    }

    writeln!(writer, "# {}", RECORDS_TITLE)?;
    write_records(writer, &report.records, format)?;
    writeln!(writer)?;

    writeln!(writer, "# {}", FEATURES_TITLE)?;
    write_features(writer, &report.features, format)?;
    writeln!(writer)?;

    writeln!(writer, "# {}", SUBSET_TITLE)?;
    write_features(writer, &report.subset, format)?;
    writeln!(writer)?;

    writeln!(writer, "# {}", PREDICTIONS_TITLE)?;
    write_predictions(writer, &report.predictions, format)
}
