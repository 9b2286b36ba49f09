//! # amrprofile
//!
//! Antimicrobial resistance profiling from protein sequences.
//!
//! ## Overview
//!
//! Each protein in a FASTA file is described by a fixed set of
//! physicochemical descriptors (charge, molecular weight, GRAVY, isoelectric
//! point, aromaticity, instability index, flexibility, residue composition,
//! extinction coefficients and secondary-structure fractions). The descriptor
//! table is projected onto the columns a pre-trained classifier expects, and
//! the classifier labels every sequence `Resistant` or `Sensitive`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use amrprofile_core::{Profiler, config::ProfilerConfig};
//!
//! let profiler = Profiler::with_config(ProfilerConfig::default())?;
//! let report = profiler.run_fasta_file("proteins.fasta")?;
//!
//! for prediction in &report.predictions {
//!     println!("{}\t{}", prediction.id, prediction.profile);
//! }
//! # Ok::<(), amrprofile_core::types::AmrError>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`sequence::parse_fasta`] reads records; text without a `>` header
//!    yields no records
//! 2. [`features::encode_records`] computes one descriptor row per record
//! 3. [`table::FeatureTable::select`] keeps the classifier's columns, in the
//!    order of the column list file
//! 4. [`model::load_model`] reads the classifier and
//!    [`predict::build_predictions`] pairs its labels with record identifiers
//!
//! ## Module Organization
//!
//! - [`config`]: Run configuration
//! - [`engine`]: The [`Profiler`] pipeline
//! - [`types`]: Records, labels and [`AmrError`]
//! - [`sequence`]: FASTA input
//! - [`protparam`]: Protein descriptor formulas
//! - [`features`]: Descriptor table encoding
//! - [`table`]: Named-column tables and column lists
//! - [`model`]: Classifier artifacts
//! - [`predict`]: Label to identifier join
//! - [`results`]: Run output
//! - [`output`]: Table rendering
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, AmrError>`](types::AmrError).
//! Nothing is recovered internally: an invalid residue, a missing column or
//! an unreadable model aborts the run.

pub mod config;
pub mod constants;
pub mod engine;
pub mod features;
pub mod model;
pub mod output;
pub mod predict;
pub mod protparam;
pub mod results;
pub mod sequence;
pub mod table;
pub mod types;

pub use engine::Profiler;
pub use types::AmrError;
