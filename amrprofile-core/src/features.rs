//! Feature encoding: one row of physicochemical descriptors per sequence.
//!
//! Composite descriptors (residue composition, extinction coefficient,
//! secondary-structure fraction) are flattened into scalar columns, so every
//! table produced here has the schema returned by [`feature_columns`]:
//!
//! | columns | count |
//! |---|---|
//! | `Sequence` (1-based index) | 1 |
//! | scalar descriptors | 7 |
//! | residue percentages `A ` .. `Y ` | 20 |
//! | `MEC_*` | 2 |
//! | `SSF_*` | 3 |

use log::{debug, info};
use rayon::prelude::*;

use crate::constants::*;
use crate::protparam::{ExtinctionCoefficient, ProteinAnalysis, SecondaryStructure};
use crate::sequence::parse_fasta;
use crate::table::FeatureTable;
use crate::types::{AmrError, SequenceRecord};

/// Total number of columns in an encoded feature table.
pub const FEATURE_COLUMN_COUNT: usize = 1 + 7 + NUM_AMINO_ACIDS + 2 + 3;

/// Descriptors of one sequence before flattening.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinDescriptors {
    /// 1-based position of the record in the input
    pub index: usize,
    pub charge_at_neutral_ph: f64,
    pub molecular_weight: f64,
    pub hydrophobicity: f64,
    pub isoelectric_point: f64,
    pub aromaticity: f64,
    pub instability_index: f64,
    pub mean_flexibility: f64,
    pub amino_acids_percent: [f64; NUM_AMINO_ACIDS],
    pub extinction: ExtinctionCoefficient,
    pub secondary_structure: SecondaryStructure,
}

impl ProteinDescriptors {
    /// Computes every descriptor for `record`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmrError::InvalidResidue`], [`AmrError::EmptySequence`]
    /// and [`AmrError::SequenceTooShort`] from [`ProteinAnalysis`].
    pub fn compute(index: usize, record: &SequenceRecord) -> Result<Self, AmrError> {
        let analysis = ProteinAnalysis::new(record.id.as_str(), &record.sequence)?;

        Ok(Self {
            index,
            charge_at_neutral_ph: analysis.charge_at_ph(NEUTRAL_PH),
            molecular_weight: analysis.molecular_weight(),
            hydrophobicity: analysis.gravy(),
            isoelectric_point: analysis.isoelectric_point(),
            aromaticity: analysis.aromaticity(),
            instability_index: analysis.instability_index(),
            mean_flexibility: analysis.mean_flexibility()?,
            amino_acids_percent: analysis.amino_acids_percent(),
            extinction: analysis.molar_extinction_coefficient(),
            secondary_structure: analysis.secondary_structure_fraction(),
        })
    }

    /// Flattens into one value per [`feature_columns`] entry.
    #[must_use]
    pub fn flatten(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(FEATURE_COLUMN_COUNT);
        row.extend([
            self.index as f64,
            self.charge_at_neutral_ph,
            self.molecular_weight,
            self.hydrophobicity,
            self.isoelectric_point,
            self.aromaticity,
            self.instability_index,
            self.mean_flexibility,
        ]);
        row.extend(self.amino_acids_percent);
        row.extend([
            f64::from(self.extinction.reduced_cysteines),
            f64::from(self.extinction.disulfide_bridges),
            self.secondary_structure.helix,
            self.secondary_structure.turn,
            self.secondary_structure.sheet,
        ]);
        row
    }
}

/// Column names of an encoded feature table, in order.
///
/// Residue percentage columns are the one-letter code followed by a single
/// space (`"A "`), matching the column lists shipped with trained models.
#[must_use]
pub fn feature_columns() -> Vec<String> {
    let mut columns: Vec<String> = [
        COL_SEQUENCE_INDEX,
        COL_CHARGE,
        COL_MOLECULAR_WEIGHT,
        COL_HYDROPHOBICITY,
        COL_ISOELECTRIC_POINT,
        COL_AROMATICITY,
        COL_INSTABILITY_INDEX,
        COL_FLEXIBILITY,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    columns.extend(amino_acid_columns());
    columns.extend(
        [
            COL_MEC_REDUCED,
            COL_MEC_DISULFIDE,
            COL_SSF_HELIX,
            COL_SSF_TURN,
            COL_SSF_SHEET,
        ]
        .iter()
        .map(|c| c.to_string()),
    );
    columns
}

/// The 20 residue percentage column names.
#[must_use]
pub fn amino_acid_columns() -> Vec<String> {
    STANDARD_AMINO_ACIDS
        .iter()
        .map(|&aa| format!("{} ", aa as char))
        .collect()
}

/// Encodes already-parsed records, sequentially.
///
/// # Errors
///
/// The first per-record failure aborts the whole encoding.
pub fn encode_records(records: &[SequenceRecord]) -> Result<FeatureTable, AmrError> {
    let descriptors = records
        .iter()
        .enumerate()
        .map(|(i, record)| ProteinDescriptors::compute(i + 1, record))
        .collect::<Result<Vec<_>, _>>()?;
    build_table(descriptors)
}

/// Encodes records on the current rayon thread pool.
///
/// Row order always matches record order.
pub fn encode_records_parallel(records: &[SequenceRecord]) -> Result<FeatureTable, AmrError> {
    let descriptors = records
        .par_iter()
        .enumerate()
        .map(|(i, record)| ProteinDescriptors::compute(i + 1, record))
        .collect::<Result<Vec<_>, _>>()?;
    build_table(descriptors)
}

/// Parses FASTA text and encodes every record.
///
/// # Examples
///
/// ```rust
/// use amrprofile_core::features::{encode_features, FEATURE_COLUMN_COUNT};
///
/// let table = encode_features(">p1\nMKTAYIAKQRQISFVKSHFSRQ\n>p2\nMSIQHFRVALIPFFAAFCLPVFA\n")?;
/// assert_eq!(table.shape(), (2, FEATURE_COLUMN_COUNT));
/// # Ok::<(), amrprofile_core::types::AmrError>(())
/// ```
pub fn encode_features(fasta_text: &str) -> Result<FeatureTable, AmrError> {
    encode_records(&parse_fasta(fasta_text))
}

fn build_table(descriptors: Vec<ProteinDescriptors>) -> Result<FeatureTable, AmrError> {
    let mut table = FeatureTable::new(feature_columns());
    for descriptor in &descriptors {
        debug!(
            "Sequence {}: MW={:.2} pI={:.3}",
            descriptor.index, descriptor.molecular_weight, descriptor.isoelectric_point
        );
        table.push_row(descriptor.flatten())?;
    }
    let (rows, cols) = table.shape();
    info!("Encoded feature table: {} rows x {} columns", rows, cols);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_RECORDS: &str = ">blaTEM-1 class A beta-lactamase\nMSIQHFRVALIPFFAAFCLPVFAHPETLVKVKDAEDQLGARVGYIELDLNSGKILESFRPEERFPMMSTFKVLLCGAVLSRVDAGQEQLGRRIHYSQNDLVEYSPVTEKHLTDGMTVRELCSAAITMSDNTAANLLLTTIGGPKELTAFLHNMGDHVTRLDRWEPELNEAIPNDERDTTMPAAMATTLRKLLTGELLTLASRQQLIDWMEADKVAGPLLRSALPAGWFIADKSGAGERGSRGIIAALGPDGKPSRIVVIYTTGSQATMDERNRQIAEIGASLIKHW\n>ompF porin\nMMKRNILAVIVPALLVAGTANAAEIYNKDGNKVDLYGKAVGLHYFSKGNGENSYGGNGDMTYARLGFKGETQINSDLTGYGQWEYNFQGNNSEGADAQTGNKTRLAFAGLKYADVGSFDYGRNYGVVYDALGYTDMLPEFGGDTAYSDDFFVGRVGGVATYRNSNFFGLVDGLNFAVQYLGKNERDTARRSNGDGVGGSISYEYEGFGIVGAYGAADRTNLQEAQPLGNGKKAEQWATGLKYDANNIYLAANYGETRNATPITNKFTNTSGFANKTQDVLLVAQYQFDFGLRPSIAYTKSKAKDVEGIGDVDLVNYFEVGATYYFNKNMSTYVDYIINQIDSDNKLGVGSDDTVAVGIVYQF\n";

    #[test]
    fn test_feature_columns_schema() {
        let columns = feature_columns();
        assert_eq!(columns.len(), FEATURE_COLUMN_COUNT);
        assert_eq!(columns[0], "Sequence");
        assert_eq!(columns[1], "charge at pH =7");
        assert!(columns.contains(&"A ".to_string()));
        assert!(columns.contains(&"Y ".to_string()));
        assert_eq!(
            &columns[FEATURE_COLUMN_COUNT - 5..],
            &[
                "MEC_reduced cysteines",
                "MEC_disulfid bridges",
                "SSF_Helix",
                "SSF_Turn",
                "SSF_Sheet"
            ]
        );
    }

    #[test]
    fn test_feature_columns_unique() {
        let columns = feature_columns();
        let mut deduped = columns.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), columns.len());
    }

    #[test]
    fn test_single_record_percentages_sum_to_100() {
        let table = encode_features(">single\nMKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ\n").unwrap();
        assert_eq!(table.n_rows(), 1);

        let total: f64 = amino_acid_columns()
            .iter()
            .map(|c| table.get(0, c).unwrap())
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ssf_columns_in_unit_interval() {
        let table = encode_features(TWO_RECORDS).unwrap();
        for row in 0..table.n_rows() {
            for col in [COL_SSF_HELIX, COL_SSF_TURN, COL_SSF_SHEET] {
                let value = table.get(row, col).unwrap();
                assert!((0.0..=1.0).contains(&value), "{} = {}", col, value);
            }
        }
    }

    #[test]
    fn test_two_records_shape_and_index() {
        let table = encode_features(TWO_RECORDS).unwrap();
        assert_eq!(table.shape(), (2, FEATURE_COLUMN_COUNT));
        assert_eq!(table.column(COL_SEQUENCE_INDEX), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = encode_features(TWO_RECORDS).unwrap();
        let second = encode_features(TWO_RECORDS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = parse_fasta(TWO_RECORDS);
        let sequential = encode_records(&records).unwrap();
        let parallel = encode_records_parallel(&records).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_invalid_residue_aborts_encoding() {
        let result = encode_features(">ok\nMKTAYIAKQRQISFV\n>bad\nMKTAYIAKQBQISFV\n");
        assert!(matches!(result, Err(AmrError::InvalidResidue { .. })));
    }

    #[test]
    fn test_short_sequence_aborts_encoding() {
        let result = encode_features(">short\nMKTAY\n");
        assert!(matches!(result, Err(AmrError::SequenceTooShort { .. })));
    }

    #[test]
    fn test_no_records_gives_empty_table() {
        let table = encode_features("not a fasta file").unwrap();
        assert_eq!(table.shape(), (0, FEATURE_COLUMN_COUNT));
    }

    #[test]
    fn test_extinction_columns_are_flattened() {
        let table = encode_features(">w\nWWYCCAAAAAAA\n").unwrap();
        assert_eq!(table.get(0, COL_MEC_REDUCED), Some(12490.0));
        assert_eq!(table.get(0, COL_MEC_DISULFIDE), Some(12615.0));
    }
}
