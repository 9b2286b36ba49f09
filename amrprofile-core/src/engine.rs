use std::path::Path;

use log::{debug, info};

use crate::config::ProfilerConfig;
use crate::features::{encode_records, encode_records_parallel};
use crate::model::load_model;
use crate::predict::build_predictions;
use crate::results::{Prediction, ProfileReport};
use crate::sequence::{parse_fasta, read_fasta_text};
use crate::table::{FeatureTable, read_column_list};
use crate::types::{AmrError, SequenceRecord};

/// Runs the profiling pipeline: parse, encode, subset, predict.
///
/// Each stage is also exposed on its own. The column list and the model are
/// read from disk on every call to [`Profiler::subset`] and
/// [`Profiler::predict`]; nothing is cached between runs.
///
/// # Examples
///
/// ## Profile a FASTA file
///
/// ```rust,no_run
/// use amrprofile_core::{Profiler, config::ProfilerConfig};
///
/// let profiler = Profiler::with_config(ProfilerConfig::default())?;
/// let report = profiler.run_fasta_file("proteins.fasta")?;
///
/// for prediction in &report.predictions {
///     println!("{}: {}", prediction.id, prediction.profile);
/// }
/// # Ok::<(), amrprofile_core::types::AmrError>(())
/// ```
///
/// ## Encode only
///
/// ```rust
/// use amrprofile_core::{Profiler, config::ProfilerConfig};
///
/// let profiler = Profiler::new(ProfilerConfig::default());
/// let records = profiler.parse(">p1\nMKTAYIAKQRQISFVKSHFSRQ\n");
/// let features = profiler.encode(&records)?;
/// assert_eq!(features.n_rows(), 1);
/// # Ok::<(), amrprofile_core::types::AmrError>(())
/// ```
#[derive(Debug)]
pub struct Profiler {
    /// Paths and options for the run
    pub config: ProfilerConfig,
    /// Dedicated pool for descriptor computation, when `num_threads` is set
    pool: Option<rayon::ThreadPool>,
}

impl Profiler {
    /// Creates a profiler that encodes sequentially, ignoring `num_threads`.
    pub const fn new(config: ProfilerConfig) -> Self {
        Self { config, pool: None }
    }

    /// Creates a profiler, building a thread pool if `num_threads` is set.
    ///
    /// # Errors
    ///
    /// [`AmrError::InvalidConfig`] if the configuration is invalid or the
    /// thread pool cannot be built.
    pub fn with_config(config: ProfilerConfig) -> Result<Self, AmrError> {
        config.validate()?;

        let pool = match config.num_threads {
            Some(num_threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        AmrError::InvalidConfig(format!("Failed to configure thread pool: {}", e))
                    })?,
            ),
            None => None,
        };

        Ok(Self { config, pool })
    }

    /// Parses FASTA text into records. Text without any record gives an empty list.
    #[must_use]
    pub fn parse(&self, fasta_text: &str) -> Vec<SequenceRecord> {
        let records = parse_fasta(fasta_text);
        info!("Parsed {} sequence records", records.len());
        records
    }

    /// Computes the full descriptor table, on the thread pool if there is one.
    pub fn encode(&self, records: &[SequenceRecord]) -> Result<FeatureTable, AmrError> {
        match &self.pool {
            Some(pool) => {
                debug!("Encoding on {} threads", pool.current_num_threads());
                pool.install(|| encode_records_parallel(records))
            }
            None => encode_records(records),
        }
    }

    /// Projects `features` onto the columns listed in the configured column file.
    pub fn subset(&self, features: &FeatureTable) -> Result<FeatureTable, AmrError> {
        let columns = read_column_list(&self.config.features_list_path)?;
        let subset = features.select(&columns)?;
        let (rows, cols) = subset.shape();
        info!("Subset feature table: {} rows x {} columns", rows, cols);
        Ok(subset)
    }

    /// Loads the configured classifier and labels every row of `subset`.
    ///
    /// `fasta_text` is the text the table was built from; it supplies the
    /// identifiers.
    pub fn predict(
        &self,
        subset: &FeatureTable,
        fasta_text: &str,
    ) -> Result<Vec<Prediction>, AmrError> {
        let format = self.config.resolved_model_format();
        let model = load_model(&self.config.model_path, format)?;
        let labels = model.predict(subset)?;
        build_predictions(&labels, fasta_text)
    }

    /// Runs every stage on in-memory FASTA text.
    ///
    /// # Errors
    ///
    /// The first failing stage aborts the run; see [`AmrError`].
    pub fn run(&self, fasta_text: &str) -> Result<ProfileReport, AmrError> {
        let records = self.parse(fasta_text);
        let features = self.encode(&records)?;
        let subset = self.subset(&features)?;
        let predictions = self.predict(&subset, fasta_text)?;

        Ok(ProfileReport {
            records,
            features,
            subset,
            predictions,
        })
    }

    /// Reads a FASTA file and runs every stage on it.
    pub fn run_fasta_file<P: AsRef<Path>>(&self, path: P) -> Result<ProfileReport, AmrError> {
        let text = read_fasta_text(path)?;
        self.run(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelFormat;
    use crate::features::FEATURE_COLUMN_COUNT;
    use crate::types::ResistanceProfile;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const FASTA: &str = ">trp_rich putative efflux pump\nMWWKWLWWAWWRWTWWLW\n>trp_free porin fragment\nMKKLLPTAAAGLLLLAAQPAMA\n";

    /// Column list and a logistic model on the tryptophan percentage.
    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("features_list.csv"),
            "W ,Molecular Weight\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("model.json"),
            r#"{"kind": "logistic_regression", "feature_names": ["W ", "Molecular Weight"],
                "coefficients": [1.0, 0.0], "intercept": -5.0}"#,
        )
        .unwrap();
        dir
    }

    fn config_for(dir: &TempDir) -> ProfilerConfig {
        ProfilerConfig {
            model_path: dir.path().join("model.json"),
            features_list_path: dir.path().join("features_list.csv"),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = fixture_dir();
        let profiler = Profiler::with_config(config_for(&dir)).unwrap();
        let report = profiler.run(FASTA).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.features.shape(), (2, FEATURE_COLUMN_COUNT));
        assert_eq!(
            report.subset.columns(),
            &["W ".to_string(), "Molecular Weight".to_string()]
        );
        assert_eq!(
            report.predictions,
            vec![
                Prediction::new("trp_rich", ResistanceProfile::Resistant),
                Prediction::new("trp_free", ResistanceProfile::Sensitive),
            ]
        );
        assert_eq!(report.resistant_count(), 1);
        assert_eq!(report.sensitive_count(), 1);
    }

    #[test]
    fn test_threaded_run_matches_sequential() {
        let dir = fixture_dir();
        let sequential = Profiler::with_config(config_for(&dir)).unwrap();
        let threaded = Profiler::with_config(ProfilerConfig {
            num_threads: Some(2),
            ..config_for(&dir)
        })
        .unwrap();

        let a = sequential.run(FASTA).unwrap();
        let b = threaded.run(FASTA).unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.predictions, b.predictions);
    }

    #[test]
    fn test_missing_subset_column() {
        let dir = fixture_dir();
        fs::write(dir.path().join("features_list.csv"), "W ,Charge\n").unwrap();

        let profiler = Profiler::new(config_for(&dir));
        match profiler.run(FASTA) {
            Err(AmrError::MissingColumn(name)) => assert_eq!(name, "Charge"),
            other => panic!("Expected MissingColumn, got {:?}", other.map(|r| r.predictions)),
        }
    }

    #[test]
    fn test_missing_model_file() {
        let dir = fixture_dir();
        let profiler = Profiler::new(ProfilerConfig {
            model_path: dir.path().join("absent.json"),
            ..config_for(&dir)
        });
        assert!(matches!(profiler.run(FASTA), Err(AmrError::ModelLoad(_))));
    }

    #[test]
    fn test_model_reloaded_each_prediction() {
        let dir = fixture_dir();
        let profiler = Profiler::new(config_for(&dir));
        let first = profiler.run(FASTA).unwrap();
        assert_eq!(first.resistant_count(), 1);

        fs::write(
            dir.path().join("model.json"),
            r#"{"kind": "logistic_regression", "coefficients": [0.0, 0.0], "intercept": 3.0}"#,
        )
        .unwrap();
        let second = profiler.run(FASTA).unwrap();
        assert_eq!(second.resistant_count(), 2);
    }

    #[test]
    fn test_empty_input_runs_to_empty_report() {
        let dir = fixture_dir();
        let profiler = Profiler::new(config_for(&dir));
        let report = profiler.run("no records here\n").unwrap();
        assert!(report.records.is_empty());
        assert!(report.predictions.is_empty());
        assert_eq!(report.subset.shape(), (0, 2));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = Profiler::with_config(ProfilerConfig {
            num_threads: Some(0),
            ..Default::default()
        });
        assert!(matches!(result, Err(AmrError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_fasta_file() {
        let dir = fixture_dir();
        let fasta = dir.path().join("input.fasta");
        fs::write(&fasta, FASTA).unwrap();

        let profiler = Profiler::new(config_for(&dir));
        let report = profiler.run_fasta_file(&fasta).unwrap();
        assert_eq!(report.predictions.len(), 2);
        assert_eq!(profiler.config.resolved_model_format(), ModelFormat::Json);
    }
}
