use crate::table::FeatureTable;
use crate::types::{ResistanceProfile, SequenceRecord};

/// Resistance call for one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Record identifier, the first token of the FASTA header.
    pub id: String,
    pub profile: ResistanceProfile,
}

impl Prediction {
    pub fn new(id: impl Into<String>, profile: ResistanceProfile) -> Self {
        Self {
            id: id.into(),
            profile,
        }
    }
}

/// Everything produced by one profiling run.
///
/// Every stage of the pipeline is kept so the intermediate tables can be
/// rendered next to the predictions.
///
/// # Examples
///
/// ```rust,no_run
/// use amrprofile_core::{Profiler, config::ProfilerConfig};
///
/// let profiler = Profiler::with_config(ProfilerConfig::default())?;
/// let report = profiler.run_fasta_file("proteins.fasta")?;
///
/// println!("{} records, feature table {:?}", report.records.len(), report.features.shape());
/// for prediction in &report.predictions {
///     println!("{}\t{}", prediction.id, prediction.profile);
/// }
/// # Ok::<(), amrprofile_core::types::AmrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProfileReport {
    /// Parsed input records, in file order.
    pub records: Vec<SequenceRecord>,

    /// Full descriptor table, one row per record.
    pub features: FeatureTable,

    /// `features` projected onto the classifier's input columns.
    pub subset: FeatureTable,

    /// One call per record, in record order.
    pub predictions: Vec<Prediction>,
}

impl ProfileReport {
    /// Number of sequences called resistant.
    #[must_use]
    pub fn resistant_count(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.profile == ResistanceProfile::Resistant)
            .count()
    }

    /// Number of sequences called sensitive.
    #[must_use]
    pub fn sensitive_count(&self) -> usize {
        self.predictions.len() - self.resistant_count()
    }
}
