use std::fmt;

use thiserror::Error;

/// A single protein record parsed from FASTA input.
///
/// # Examples
///
/// ```rust
/// use amrprofile_core::types::SequenceRecord;
///
/// let record = SequenceRecord::new("sp|P0A7B8", "sp|P0A7B8 Protein HslV", "MTTIVSVRRN");
/// assert_eq!(record.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// First whitespace-delimited token of the header line (after '>').
    pub id: String,
    /// The full header line (after '>'), identifier included.
    pub description: String,
    /// Residue sequence as it appeared in the file, line breaks removed.
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Antimicrobial susceptibility call for one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResistanceProfile {
    /// Raw class label `1`
    Resistant,
    /// Raw class label `0`
    Sensitive,
}

impl ResistanceProfile {
    /// Raw class label the classifier emits for this profile.
    #[must_use]
    pub const fn to_label(self) -> u8 {
        match self {
            Self::Resistant => 1,
            Self::Sensitive => 0,
        }
    }
}

impl TryFrom<u8> for ResistanceProfile {
    type Error = AmrError;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        match label {
            1 => Ok(Self::Resistant),
            0 => Ok(Self::Sensitive),
            other => Err(AmrError::Prediction(format!(
                "unexpected class label {other}, expected 0 or 1"
            ))),
        }
    }
}

impl fmt::Display for ResistanceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resistant => write!(f, "Resistant"),
            Self::Sensitive => write!(f, "Sensitive"),
        }
    }
}

/// Errors that can occur while profiling sequences.
#[derive(Error, Debug)]
pub enum AmrError {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Residue outside the 20 standard amino acids
    #[error("Invalid residue '{residue}' at position {position} of sequence {id}")]
    InvalidResidue {
        id: String,
        residue: char,
        position: usize,
    },
    /// Sequence has no residues
    #[error("Empty sequence: {0}")]
    EmptySequence(String),
    /// Sequence is shorter than a descriptor window
    #[error("Sequence {id} is too short ({length} residues, need at least {required})")]
    SequenceTooShort {
        id: String,
        length: usize,
        required: usize,
    },
    /// A requested column is not present in the feature table
    #[error("Missing column: '{0}'")]
    MissingColumn(String),
    /// Row or model width disagrees with the table schema
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    /// Classifier artifact could not be read or is malformed
    #[error("Failed to load model: {0}")]
    ModelLoad(String),
    /// Classifier failed while predicting
    #[error("Prediction failed: {0}")]
    Prediction(String),
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
