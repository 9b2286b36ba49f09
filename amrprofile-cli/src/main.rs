//! # amrprofile - Antimicrobial Resistance Profiles from Protein Sequences
//!
//! Computes physicochemical descriptors for every protein in a FASTA file,
//! keeps the columns a trained classifier expects, and labels each sequence
//! `Resistant` or `Sensitive`.
//!
//! ## Usage
//!
//! ```bash
//! # Predict with the default model and column list in the working directory
//! amrprofile -i proteins.fasta
//!
//! # Explicit model and column list, CSV output to a file
//! amrprofile -i proteins.fasta -m models/rf.json -l models/features_list.csv -f csv -o calls.csv
//!
//! # Show every intermediate table as an aligned text table
//! amrprofile -i proteins.fasta -s -f table
//!
//! # Read FASTA from stdin and compute descriptors on four threads
//! cat proteins.fasta | amrprofile -t 4
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input FASTA file (default: stdin)
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-m, --model <FILE>`: Classifier artifact (default: amr_predict_model.json)
//! - `--model-format <FORMAT>`: json, gbdt or xgboost-dump (default: from extension)
//! - `-l, --features-list <FILE>`: CSV whose header lists the model's columns (default: features_list.csv)
//! - `-f, --format <FORMAT>`: Output format: tsv, csv, table (default: tsv)
//! - `-s, --show-stages`: Also write parsed records, all descriptors and the subset
//! - `-c, --config <FILE>`: JSON configuration file; flags override its values
//! - `-t, --threads <N>`: Compute descriptors on N threads
//! - `-q, --quiet`: Suppress the summary and all but error logs
//! - `-v, --verbose`: Log stage progress
//!
//! Logging can be tuned further with `AMRPROFILE_LOG`, e.g.
//! `AMRPROFILE_LOG=amrprofile_core=debug`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use amrprofile_core::config::{ModelFormat, OutputFormat, ProfilerConfig};
use amrprofile_core::constants::VERSION;
use amrprofile_core::output::write_report;
use amrprofile_core::sequence::{read_fasta_from, read_fasta_text};
use amrprofile_core::Profiler;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, info};

fn build_cli() -> Command {
    Command::new("amrprofile")
        .version(VERSION)
        .about("Predict antimicrobial resistance profiles from protein sequences")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input FASTA file (default: stdin)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Classifier artifact (default: amr_predict_model.json)"),
        )
        .arg(
            Arg::new("model-format")
                .long("model-format")
                .value_name("FORMAT")
                .value_parser(["json", "gbdt", "xgboost-dump"])
                .help("Classifier artifact format (default: inferred from extension)"),
        )
        .arg(
            Arg::new("features-list")
                .short('l')
                .long("features-list")
                .value_name("FILE")
                .help("CSV file whose header lists the classifier's columns (default: features_list.csv)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(["tsv", "csv", "table"])
                .help("Output format: tsv, csv, table (default: tsv)"),
        )
        .arg(
            Arg::new("show-stages")
                .short('s')
                .long("show-stages")
                .action(ArgAction::SetTrue)
                .help("Also write parsed records, all descriptors and the column subset"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON configuration file; command-line flags take precedence"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of threads for descriptor computation"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Quiet mode"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log progress of each stage"),
        )
}

fn init_logging(matches: &ArgMatches) {
    let default_filter = if matches.get_flag("verbose") {
        "info"
    } else if matches.get_flag("quiet") {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::default()
        .parse_env(env_logger::Env::default().filter_or("AMRPROFILE_LOG", default_filter))
        .init();
}

/// Builds the run configuration: defaults, then the config file, then flags.
fn resolve_config(matches: &ArgMatches) -> Result<ProfilerConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ProfilerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config file {}", path))?,
        None => ProfilerConfig::default(),
    };

    if let Some(model) = matches.get_one::<String>("model") {
        config.model_path = PathBuf::from(model);
    }
    if let Some(format) = matches.get_one::<String>("model-format") {
        config.model_format = Some(format.parse::<ModelFormat>()?);
    }
    if let Some(list) = matches.get_one::<String>("features-list") {
        config.features_list_path = PathBuf::from(list);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.output_format = format.parse::<OutputFormat>()?;
    }
    if matches.get_flag("show-stages") {
        config.show_stages = true;
    }
    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config.num_threads = Some(threads);
    }
    if matches.get_flag("quiet") {
        config.quiet = true;
    }

    config.validate()?;
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    init_logging(&matches);

    let config = resolve_config(&matches)?;
    let profiler = Profiler::with_config(config)?;

    let fasta_text = match matches.get_one::<String>("input") {
        Some(path) => read_fasta_text(path)
            .with_context(|| format!("Failed to read input file {}", path))?,
        None => {
            info!("Reading FASTA from stdin");
            read_fasta_from(io::stdin().lock()).context("Failed to read FASTA from stdin")?
        }
    };

    let report = profiler.run(&fasta_text).context("Profiling failed")?;

    let mut writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output file {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    write_report(
        &mut writer,
        &report,
        profiler.config.output_format,
        profiler.config.show_stages,
    )?;
    writer.flush()?;

    if !profiler.config.quiet {
        eprintln!(
            "Profiling complete! {} sequences: {} resistant, {} sensitive.",
            report.predictions.len(),
            report.resistant_count(),
            report.sensitive_count()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let matches = build_cli().get_matches_from([
            "amrprofile",
            "-m",
            "booster.gbdt",
            "-f",
            "csv",
            "-t",
            "2",
            "-s",
        ]);
        let config = resolve_config(&matches).unwrap();

        assert_eq!(config.model_path, PathBuf::from("booster.gbdt"));
        assert_eq!(config.resolved_model_format(), ModelFormat::Gbdt);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.num_threads, Some(2));
        assert!(config.show_stages);
        assert!(!config.quiet);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let matches = build_cli().get_matches_from(["amrprofile", "-t", "0"]);
        assert!(resolve_config(&matches).is_err());
    }
}
