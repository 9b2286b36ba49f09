// =============================================================================
// =============================================================================

/// Version string for amrprofile
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// =============================================================================

/// Default path of the serialized classifier
pub const DEFAULT_MODEL_PATH: &str = "amr_predict_model.json";

/// Default path of the CSV whose header lists the classifier's input columns
pub const DEFAULT_FEATURES_LIST_PATH: &str = "features_list.csv";

/// Probability above which a sequence is called resistant
pub const DECISION_THRESHOLD: f64 = 0.5;

// =============================================================================
// =============================================================================

/// The 20 standard amino acids in alphabetical one-letter order.
///
/// Every per-residue table in [`crate::protparam`] is indexed in this order.
pub const STANDARD_AMINO_ACIDS: [u8; 20] = *b"ACDEFGHIKLMNPQRSTVWY";

/// Number of standard amino acids
pub const NUM_AMINO_ACIDS: usize = 20;

/// Window length of the flexibility profile
pub const FLEXIBILITY_WINDOW: usize = 9;

/// pH at which the net charge descriptor is reported
pub const NEUTRAL_PH: f64 = 7.0;

/// Molar absorptivity of tryptophan at 280 nm
pub const TRP_EXTINCTION: u32 = 5500;

/// Molar absorptivity of tyrosine at 280 nm
pub const TYR_EXTINCTION: u32 = 1490;

/// Molar absorptivity of one cystine (disulfide bridge) at 280 nm
pub const CYSTINE_EXTINCTION: u32 = 125;

/// Average mass of water lost per peptide bond
pub const WATER_AVERAGE_MASS: f64 = 18.0153;

// =============================================================================
// =============================================================================

/// Column holding the 1-based record index
pub const COL_SEQUENCE_INDEX: &str = "Sequence";
pub const COL_CHARGE: &str = "charge at pH =7";
pub const COL_MOLECULAR_WEIGHT: &str = "Molecular Weight";
pub const COL_HYDROPHOBICITY: &str = "Hydrophobicity";
pub const COL_ISOELECTRIC_POINT: &str = "Isoelectric Point";
pub const COL_AROMATICITY: &str = "Aromaticity";
pub const COL_INSTABILITY_INDEX: &str = "Instability Index";
pub const COL_FLEXIBILITY: &str = "Flexibility";
pub const COL_MEC_REDUCED: &str = "MEC_reduced cysteines";
pub const COL_MEC_DISULFIDE: &str = "MEC_disulfid bridges";
pub const COL_SSF_HELIX: &str = "SSF_Helix";
pub const COL_SSF_TURN: &str = "SSF_Turn";
pub const COL_SSF_SHEET: &str = "SSF_Sheet";

/// Header of the parsed-records table
pub const RECORD_COLUMNS: [&str; 3] = ["#", "sequence description", "sequence"];

/// Header of the predictions table
pub const PREDICTION_COLUMNS: [&str; 2] = ["Sequence", "Antimicrobial Profile"];
